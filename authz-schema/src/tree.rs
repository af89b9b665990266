//! Read-only resource trees that schema definitions are loaded from.
//!
//! Paths are logical and `/`-separated, relative to the tree root. The root
//! itself is the empty path.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// One child of a directory in a [`ResourceTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub is_dir: bool,
}

/// A hierarchical, read-only file set.
pub trait ResourceTree: Send + Sync {
    /// Lists the direct children of a directory, in no particular order.
    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>>;

    /// Reads the full contents of a file.
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Joins a logical directory path and a child name.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// A tree compiled into the binary as a table of `(path, contents)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTree<'a> {
    files: &'a [(&'a str, &'a [u8])],
}

impl<'a> EmbeddedTree<'a> {
    pub const fn new(files: &'a [(&'a str, &'a [u8])]) -> Self {
        Self { files }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl ResourceTree for EmbeddedTree<'_> {
    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut children: BTreeMap<&str, bool> = BTreeMap::new();
        for (file, _) in self.files {
            let Some(rest) = file.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    children.insert(dir, true);
                }
                None => {
                    children.entry(rest).or_insert(false);
                }
            }
        }

        if children.is_empty() && !path.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no embedded directory '{path}'"),
            ));
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| TreeEntry {
                name: name.to_string(),
                is_dir,
            })
            .collect())
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .iter()
            .find(|(file, _)| *file == path)
            .map(|(_, bytes)| bytes.to_vec())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no embedded file '{path}'"))
            })
    }
}

/// A tree backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl ResourceTree for DirTree {
    fn read_dir(&self, path: &str) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            let name = entry.file_name().into_string().map_err(|raw| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("non UTF-8 file name {raw:?}"),
                )
            })?;
            entries.push(TreeEntry {
                name,
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILES: &[(&str, &[u8])] = &[
        ("b.yaml", b"b"),
        ("a/inner.yaml", b"inner"),
        ("a/deep/leaf.yaml", b"leaf"),
        ("README.md", b"readme"),
    ];

    #[test]
    fn join_paths() {
        assert_eq!(join("", "a.yaml"), "a.yaml");
        assert_eq!(join("a/b", "c.yaml"), "a/b/c.yaml");
    }

    #[test]
    fn embedded_root_listing() {
        let tree = EmbeddedTree::new(FILES);
        let entries = tree.read_dir("").unwrap();
        assert_eq!(
            entries,
            vec![
                TreeEntry { name: "README.md".into(), is_dir: false },
                TreeEntry { name: "a".into(), is_dir: true },
                TreeEntry { name: "b.yaml".into(), is_dir: false },
            ]
        );
    }

    #[test]
    fn embedded_nested_listing() {
        let tree = EmbeddedTree::new(FILES);
        let entries = tree.read_dir("a").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.name == "deep" && e.is_dir));
        assert!(entries.iter().any(|e| e.name == "inner.yaml" && !e.is_dir));
    }

    #[test]
    fn embedded_missing_dir_is_not_found() {
        let tree = EmbeddedTree::new(FILES);
        let err = tree.read_dir("nope").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn embedded_empty_root_lists_nothing() {
        let tree = EmbeddedTree::new(&[]);
        assert!(tree.read_dir("").unwrap().is_empty());
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn embedded_read_file() {
        let tree = EmbeddedTree::new(FILES);
        assert_eq!(tree.read_file("a/deep/leaf.yaml").unwrap(), b"leaf");
        assert_eq!(
            tree.read_file("a/missing.yaml").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn dir_tree_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/x.yaml"), b"x").unwrap();
        std::fs::write(dir.path().join("top.yaml"), b"top").unwrap();

        let tree = DirTree::new(dir.path());
        let mut entries = tree.read_dir("").unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                TreeEntry { name: "sub".into(), is_dir: true },
                TreeEntry { name: "top.yaml".into(), is_dir: false },
            ]
        );
        assert_eq!(tree.read_file("sub/x.yaml").unwrap(), b"x");
        assert_eq!(tree.root(), dir.path());
    }
}
