//! Discovery of schema definition files in a resource tree.

use crate::error::{SchemaError, SchemaResult};
use crate::tree::{join, ResourceTree, TreeEntry};
use std::io;
use std::path::Path;
use tracing::debug;

/// File extension of schema definitions.
pub const SCHEMA_EXTENSION: &str = "yaml";

/// Raw bytes of one definition file plus its path in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaResource {
    path: String,
    bytes: Vec<u8>,
}

impl SchemaResource {
    pub fn new(path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Collects every file with the given extension, depth first.
///
/// Entries of each directory are visited in name order and directories are
/// descended into at their sorted position, so the result order depends
/// only on the tree's contents. A missing tree root yields no resources.
/// Any other I/O error aborts the load and nothing is returned.
pub fn load_resources(
    tree: &dyn ResourceTree,
    extension: &str,
) -> SchemaResult<Vec<SchemaResource>> {
    let mut resources = Vec::new();

    match tree.read_dir("") {
        Ok(entries) => walk(tree, "", entries, extension, &mut resources)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Schema bundle root not found, nothing to load");
        }
        Err(source) => {
            return Err(SchemaError::ResourceLoad {
                path: ".".to_string(),
                source,
            });
        }
    }

    Ok(resources)
}

fn walk(
    tree: &dyn ResourceTree,
    dir: &str,
    mut entries: Vec<TreeEntry>,
    extension: &str,
    out: &mut Vec<SchemaResource>,
) -> SchemaResult<()> {
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        let path = join(dir, &entry.name);

        if entry.is_dir {
            let children = tree
                .read_dir(&path)
                .map_err(|source| SchemaError::ResourceLoad {
                    path: path.clone(),
                    source,
                })?;
            walk(tree, &path, children, extension, out)?;
            continue;
        }

        if Path::new(&entry.name).extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let bytes = tree
            .read_file(&path)
            .map_err(|source| SchemaError::ResourceLoad {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path, bytes = bytes.len(), "Discovered schema resource");
        out.push(SchemaResource { path, bytes });
    }

    Ok(())
}
