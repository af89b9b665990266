//! Decoding of definition files into schema-write requests.
//!
//! A definition file is the YAML form of the engine's write request:
//!
//! ```yaml
//! schema: |-
//!   definition user {}
//! ```

use crate::error::{ParseFailure, SchemaError, SchemaResult};
use crate::loader::SchemaResource;
use authz_engine::SchemaWriteRequest;

/// Decodes one resource. Unknown keys and blank schema bodies are errors.
pub fn parse_schema(resource: &SchemaResource) -> SchemaResult<SchemaWriteRequest> {
    decode(resource.bytes()).map_err(|source| SchemaError::SchemaParse {
        path: resource.path().to_string(),
        source,
    })
}

fn decode(bytes: &[u8]) -> Result<SchemaWriteRequest, ParseFailure> {
    let request: SchemaWriteRequest = serde_yaml::from_slice(bytes)?;
    if request.is_blank() {
        return Err(ParseFailure::EmptySchema);
    }
    Ok(request)
}
