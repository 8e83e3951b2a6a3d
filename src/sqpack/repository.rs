//! Repository (C5): one `sqpack/<name>/` folder — either the base game
//! (`ffxiv`) or an expansion (`exN`) — and the merged view over all of its
//! `.index` volumes.
//!
//! A repository does not hold its volumes' data files open. [`Repository::get_file`]
//! re-opens the chosen `.datN` sibling as its own transient [`Volume`] for the
//! duration of a single read; see `volume.rs` for why.

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use super::error::{Error, Result};
use super::header::IndexHashTableEntry;
use super::volume::Volume;
use super::walker::DirectoryWalker;

pub struct Repository {
    pub expansion_id: u32,
    pub name: String,
    root: PathBuf,
    pub version: String,
    volumes: Vec<Volume<File>>,
    hash_index: HashMap<u64, (IndexHashTableEntry, usize)>,
}

impl Repository {
    /// `root` is the repository's own folder, e.g. `sqpack/ffxiv` or `sqpack/ex1`.
    pub fn new(expansion_id: u32, root: PathBuf) -> Self {
        let name = repo_name(expansion_id);
        Self {
            expansion_id,
            name,
            root,
            version: String::new(),
            volumes: Vec::new(),
            hash_index: HashMap::new(),
        }
    }

    /// Read this repository's `.ver` file. The base game stores it as
    /// `ffxivgame.ver`; expansions store it as `<name>.ver`.
    pub fn parse_version(&mut self) -> Result<()> {
        let filename = if self.expansion_id == 0 {
            "ffxivgame.ver".to_string()
        } else {
            format!("{}.ver", self.name)
        };
        let contents = std::fs::read_to_string(self.root.join(filename))?;
        self.version = contents.trim().to_string();
        Ok(())
    }

    /// Enumerate this repository's `.index` files, load each as a [`Volume`],
    /// and fold every hash-table entry into one flat lookup. Entries from a
    /// later-enumerated volume win on hash collision.
    pub fn setup_indexes(&mut self, walker: &dyn DirectoryWalker) -> Result<()> {
        let candidates = walker.list_files_recursive(&self.root)?;
        let mut index_paths: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("index"))
            .collect();
        index_paths.sort();

        let mut volumes = Vec::with_capacity(index_paths.len());
        let mut hash_index = HashMap::new();
        for path in index_paths {
            let mut volume = Volume::open(&path)?;
            volume.load_index_header()?;
            volume.load_hash_table()?;
            volume.discover_data_files(walker)?;

            let volume_idx = volumes.len();
            for entry in volume.hash_table() {
                hash_index.insert(entry.hash, (*entry, volume_idx));
            }
            volumes.push(volume);
        }

        self.volumes = volumes;
        self.hash_index = hash_index;
        Ok(())
    }

    /// Resolve `hash` against the merged index and read the located file out
    /// of its `.datN` sibling.
    pub fn get_file(&self, hash: u64) -> Result<Vec<u8>> {
        let (entry, volume_idx) = self.hash_index.get(&hash).ok_or(Error::NotFound { hash })?;
        let volume = &self.volumes[*volume_idx];
        let data_path = volume.data_file_path(entry.data_file_id())?;
        let mut data_volume = Volume::open(data_path)?;
        data_volume.read_file(entry.data_file_offset())
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.hash_index.contains_key(&hash)
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }
}

fn repo_name(expansion_id: u32) -> String {
    if expansion_id == 0 {
        "ffxiv".to_string()
    } else {
        format!("ex{expansion_id}")
    }
}
