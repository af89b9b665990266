//! Wire types of the engine's schema-write contract.

use serde::{Deserialize, Serialize};

/// A single schema write, mirroring the engine's `WriteSchemaRequest`.
///
/// The body is free-form schema language text; the engine validates it.
/// Bundled definition files decode into this type, so unknown keys are
/// rejected rather than silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaWriteRequest {
    pub schema: String,
}

impl SchemaWriteRequest {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    /// Returns true if the schema body contains no text.
    pub fn is_blank(&self) -> bool {
        self.schema.trim().is_empty()
    }

    /// Names of the `definition` blocks declared in the schema body.
    pub fn definitions(&self) -> Vec<&str> {
        self.schema
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("definition "))
            .filter_map(|rest| rest.split(|c: char| c.is_whitespace() || c == '{').next())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Revision token returned by the engine after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZedToken {
    pub token: String,
}

/// Response to a schema write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSchemaResponse {
    #[serde(rename = "writtenAt", default, skip_serializing_if = "Option::is_none")]
    pub written_at: Option<ZedToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_are_listed_in_order() {
        let req = SchemaWriteRequest::new(
            "definition user {}\n\ndefinition link {\n  relation owner: user\n}\n",
        );
        assert_eq!(req.definitions(), vec!["user", "link"]);
    }

    #[test]
    fn definitions_with_namespace_prefix() {
        let req = SchemaWriteRequest::new("definition shortlink/user{}\n");
        assert_eq!(req.definitions(), vec!["shortlink/user"]);
    }

    #[test]
    fn blank_schema() {
        assert!(SchemaWriteRequest::new("  \n\t").is_blank());
        assert!(!SchemaWriteRequest::new("definition user {}").is_blank());
    }

    #[test]
    fn response_uses_engine_field_names() {
        let resp: WriteSchemaResponse =
            serde_json::from_str(r#"{"writtenAt":{"token":"GhUKEzE3"}}"#).unwrap();
        assert_eq!(resp.written_at.unwrap().token, "GhUKEzE3");

        let empty: WriteSchemaResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.written_at.is_none());
    }

    #[test]
    fn request_rejects_unknown_fields() {
        let result: Result<SchemaWriteRequest, _> =
            serde_json::from_str(r#"{"schema":"definition user {}","extra":1}"#);
        assert!(result.is_err());
    }
}
