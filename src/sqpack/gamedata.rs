//! Top-level entry point (C6): a game installation's `sqpack/` folder, opened
//! once and queried by logical path thereafter.

use std::collections::HashMap;
use std::path::Path;

use super::error::{Error, Result};
use super::path::{expansion_id_of, ParsedFileName};
use super::repository::Repository;
use super::walker::{DirectoryWalker, StdDirectoryWalker};

pub struct GameData {
    repositories: HashMap<u32, Repository>,
}

impl GameData {
    /// Open `root` (the game's installation directory, containing `sqpack/`)
    /// using the default `std::fs`-backed directory walker.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_with_walker(root, &StdDirectoryWalker)
    }

    /// Same as [`Self::open`] but with an injected [`DirectoryWalker`], for
    /// callers that enumerate a virtual or instrumented filesystem.
    pub fn open_with_walker<P: AsRef<Path>>(root: P, walker: &dyn DirectoryWalker) -> Result<Self> {
        let root = root.as_ref();
        let sqpack_dir = root.join("sqpack");
        if !sqpack_dir.is_dir() {
            return Err(Error::RootInvalid { root: root.to_path_buf() });
        }
        let mut repositories = HashMap::new();

        for name in walker.list_subdirs(&sqpack_dir)? {
            let expansion_id = expansion_id_of(&name);
            let mut repo = Repository::new(expansion_id, sqpack_dir.join(&name));
            repo.parse_version()?;
            repo.setup_indexes(walker)?;
            repositories.insert(expansion_id, repo);
        }

        Ok(Self { repositories })
    }

    /// Resolve a logical path (e.g. `exd/root.exl`) to its uncompressed bytes.
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let parsed = ParsedFileName::parse(path);
        let repo = self.repository(expansion_id_of(&parsed.repo)).ok_or(Error::NotFound { hash: parsed.index })?;
        repo.get_file(parsed.index)
    }

    pub fn repository(&self, expansion_id: u32) -> Option<&Repository> {
        self.repositories.get(&expansion_id)
    }

    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }
}
