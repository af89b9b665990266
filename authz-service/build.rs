//! Build script that embeds `permissions/` into the binary.
//!
//! Generates `$OUT_DIR/bundle.rs` containing a static `(path, bytes)` table
//! with one `include_bytes!` per file. Paths are relative to `permissions/`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const BUNDLE_DIR: &str = "permissions";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let root = manifest_dir.join(BUNDLE_DIR);
    println!("cargo:rerun-if-changed={}", root.display());

    let mut files = Vec::new();
    if root.is_dir() {
        collect(&root, &root, &mut files)?;
    }
    files.sort();

    let out = PathBuf::from(std::env::var("OUT_DIR")?).join("bundle.rs");
    let mut f = fs::File::create(out)?;
    writeln!(f, "pub static FILES: &[(&str, &[u8])] = &[")?;
    for (logical, absolute) in &files {
        println!("cargo:rerun-if-changed={}", absolute.display());
        writeln!(
            f,
            "    ({:?}, include_bytes!({:?})),",
            logical,
            absolute.display().to_string()
        )?;
    }
    writeln!(f, "];")?;

    Ok(())
}

fn collect(
    root: &Path,
    dir: &Path,
    out: &mut Vec<(String, PathBuf)>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", dir.display());
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(root, &path, out)?;
            continue;
        }
        let logical = path
            .strip_prefix(root)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        out.push((logical, path));
    }
    Ok(())
}
