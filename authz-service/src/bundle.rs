//! Permission schemas compiled into the binary.
//!
//! The table is generated by `build.rs` from the crate's `permissions/`
//! directory, so the schema applied at startup always matches the binary
//! version.

use authz_schema::{DirTree, EmbeddedTree, ResourceTree};
use std::path::Path;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/bundle.rs"));
}

/// The bundled schema tree.
pub fn permissions() -> EmbeddedTree<'static> {
    EmbeddedTree::new(generated::FILES)
}

/// The embedded bundle, or an on-disk directory when one is configured.
pub fn resolve(dir: Option<&Path>) -> Box<dyn ResourceTree> {
    match dir {
        Some(dir) => Box::new(DirTree::new(dir)),
        None => Box::new(permissions()),
    }
}
