//! Directory-walk collaborator (§6, external interface).
//!
//! The core never walks the filesystem itself beyond this seam: it asks a
//! [`DirectoryWalker`] for the subdirectories of `sqpack/` and for every file
//! recursively under a repository's folder, then filters those lists itself
//! (by extension, by exact `.datN` name match, etc). [`StdDirectoryWalker`] is
//! the default, `std::fs`-backed implementation so the crate works out of the
//! box; callers with a virtual or instrumented filesystem can supply their
//! own.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait DirectoryWalker {
    /// Immediate subdirectory names under `path` (not recursive, names only).
    fn list_subdirs(&self, path: &Path) -> io::Result<Vec<String>>;

    /// All files found anywhere under `path`, as absolute paths.
    fn list_files_recursive(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Default [`DirectoryWalker`] backed directly by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDirectoryWalker;

impl DirectoryWalker for StdDirectoryWalker {
    fn list_subdirs(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    out.push(name.to_string());
                }
            }
        }
        Ok(out)
    }

    fn list_files_recursive(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        let mut stack = vec![path.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    stack.push(entry.path());
                } else if file_type.is_file() {
                    out.push(entry.path());
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_subdirs_and_recursive_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("ffxiv")).unwrap();
        fs::create_dir(root.join("ex1")).unwrap();
        fs::write(root.join("ffxiv").join("000000.win32.index"), b"x").unwrap();
        fs::write(root.join("ex1").join("0a0000.win32.dat0"), b"y").unwrap();

        let walker = StdDirectoryWalker;
        let mut subdirs = walker.list_subdirs(root).unwrap();
        subdirs.sort();
        assert_eq!(subdirs, vec!["ex1".to_string(), "ffxiv".to_string()]);

        let files = walker.list_files_recursive(root).unwrap();
        assert_eq!(files.len(), 2);
    }
}
