//! SqPack volume (C4): one physical `.index`/`.index2` file plus its
//! associated `.datN` siblings.
//!
//! A `Volume` is also reused, transiently, to read a single file out of a
//! `.datN` sibling: [`Repository::get_file`](super::repository::Repository::get_file)
//! opens the target data file as its own `Volume`, re-decoding its SqPack
//! header (data files share the index header's shape) purely to exercise the
//! same platform check, then calls [`Volume::read_file`].

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use super::block;
use super::error::{Error, Result};
use super::header::{
    FileInfo, FileType, IndexHashTableEntry, IndexHeader, SqPackHeader, FILE_INFO_SIZE,
    INDEX_HASH_ENTRY_SIZE, INDEX_HEADER_SIZE,
};
use super::reader::StreamReader;
use super::walker::DirectoryWalker;

pub struct Volume<R> {
    reader: StreamReader<R>,
    header: SqPackHeader,
    index_header: Option<IndexHeader>,
    hash_table: Vec<IndexHashTableEntry>,
    data_files: Vec<Option<PathBuf>>,
    /// Set when this volume was opened from a path, for the `.datN`
    /// sanity check in `read_file` and for `discover_data_files`'s sibling
    /// name matching.
    path: Option<PathBuf>,
}

impl Volume<File> {
    /// Open an `.index` (or `.datN`) file by path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut volume = Self::from_reader(file)?;
        volume.path = Some(path);
        Ok(volume)
    }
}

impl<R: Read + Seek> Volume<R> {
    /// Wrap an already-open reader. Decodes the SqPack header immediately,
    /// which is where a console-platform archive is rejected.
    pub fn from_reader(r: R) -> Result<Self> {
        let mut reader = StreamReader::new(r);
        let header = SqPackHeader::read(&mut reader)?;
        Ok(Self { reader, header, index_header: None, hash_table: Vec::new(), data_files: Vec::new(), path: None })
    }

    pub fn header(&self) -> &SqPackHeader {
        &self.header
    }

    pub fn index_header(&self) -> Option<&IndexHeader> {
        self.index_header.as_ref()
    }

    pub fn hash_table(&self) -> &[IndexHashTableEntry] {
        &self.hash_table
    }

    /// Seek to `header.header_size` and decode the 1024-byte index header.
    pub fn load_index_header(&mut self) -> Result<()> {
        self.reader.seek(u64::from(self.header.header_size))?;
        let buf = self.reader.read_exact_vec(INDEX_HEADER_SIZE)?;
        self.index_header = Some(IndexHeader::from_bytes(&buf)?);
        Ok(())
    }

    /// Seek to `index_data_offset` and decode `index_data_size / 16` entries.
    /// Must be called after [`Self::load_index_header`].
    pub fn load_hash_table(&mut self) -> Result<()> {
        let index_header = self
            .index_header
            .as_ref()
            .ok_or(Error::MalformedHeader { reason: "index header not loaded" })?;

        self.reader.seek(u64::from(index_header.index_data_offset))?;
        let count = index_header.index_data_size as usize / INDEX_HASH_ENTRY_SIZE;
        let mut table = Vec::with_capacity(count);
        for _ in 0..count {
            let buf = self.reader.read_exact_vec(INDEX_HASH_ENTRY_SIZE)?;
            table.push(IndexHashTableEntry::from_bytes(&buf)?);
        }
        self.hash_table = table;
        Ok(())
    }

    /// Enumerate sibling files of this volume's containing directory via
    /// `walker` and keep those that exactly match `<stem>.dat<i>` for
    /// `i` in `[0, number_of_data_files)`. A missing sibling is left as
    /// `None` rather than failing eagerly; the gap surfaces as
    /// [`Error::MissingDataFile`] at read time.
    pub fn discover_data_files(&mut self, walker: &dyn DirectoryWalker) -> Result<()> {
        let index_header = self
            .index_header
            .as_ref()
            .ok_or(Error::MalformedHeader { reason: "index header not loaded" })?;
        let index_path = self
            .path
            .clone()
            .ok_or(Error::MalformedHeader { reason: "volume has no backing path" })?;

        let dir = index_path.parent().unwrap_or_else(|| Path::new("."));
        let candidates = walker.list_files_recursive(dir)?;
        let stem = index_path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

        let mut data_files = vec![None; index_header.number_of_data_files as usize];
        for (i, slot) in data_files.iter_mut().enumerate() {
            let name = format!("{stem}.dat{i}");
            *slot = candidates
                .iter()
                .find(|p| p.file_name().and_then(|f| f.to_str()) == Some(name.as_str()))
                .cloned();
        }
        self.data_files = data_files;
        Ok(())
    }

    pub fn data_file_path(&self, id: u8) -> Result<&Path> {
        self.data_files
            .get(id as usize)
            .and_then(|slot| slot.as_deref())
            .ok_or(Error::MissingDataFile { id })
    }

    /// The sibling `.index2` path for an `.index` path. Recognized but never
    /// opened by the core read path.
    pub fn index2_path(index_path: &Path) -> PathBuf {
        index_path.with_extension("index2")
    }

    /// Read the file located at `offset` within this volume's data stream.
    /// Requires this `Volume` to have been opened against a `.datN` sibling,
    /// not the `.index` file itself.
    pub fn read_file(&mut self, offset: u64) -> Result<Vec<u8>> {
        if let Some(path) = self.path.as_ref() {
            if !is_data_file_path(path) {
                return Err(Error::MalformedHeader {
                    reason: "read_file called on a volume that isn't a .datN file",
                });
            }
        }

        self.reader.seek(offset)?;
        let info_bytes = self.reader.read_exact_vec(FILE_INFO_SIZE)?;
        let info = FileInfo::from_bytes(&info_bytes, offset)?;

        match info.file_type {
            FileType::Empty => Err(Error::EmptyAsset { offset }),
            FileType::Standard => block::read_standard_file(self.reader.get_mut(), &info),
            FileType::Model => Err(Error::Unimplemented { kind: FileType::Model }),
            FileType::Texture => Err(Error::Unimplemented { kind: FileType::Texture }),
        }
    }
}

fn is_data_file_path(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.starts_with("dat"))
}
