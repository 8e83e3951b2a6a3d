//! Error taxonomy for the SqPack core.
//!
//! Each kind is surfaced as-is to the immediate caller; nothing here is
//! retried or retranslated by a higher layer (see `gamedata.rs`).

use std::io;
use std::path::PathBuf;

use super::header::FileType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// `open`'s `root` does not contain a `sqpack/` directory.
    #[error("{} is not a valid game installation root (no sqpack/ directory)", root.display())]
    RootInvalid { root: PathBuf },

    /// The console platform id was encountered in a SqPack header. Fatal; never retried.
    #[error("unsupported platform: PS3 archives are not supported")]
    UnsupportedPlatform,

    /// `hash` was not present in a repository's merged hash table.
    #[error("hash {hash:#x} not found in index")]
    NotFound { hash: u64 },

    /// The located `FileInfo` has type `Empty`.
    #[error("asset at offset {offset:#x} is empty")]
    EmptyAsset { offset: u64 },

    /// `FileInfo.type` is `Model` or `Texture`; recognized but not decoded by this core.
    #[error("file type {kind:?} is recognized but not implemented")]
    Unimplemented { kind: FileType },

    /// An index entry referenced a `.datN` beyond the set discovered for its volume.
    #[error("data file id {id} has no corresponding .dat{id} sibling")]
    MissingDataFile { id: u8 },

    /// A raw deflate stream was rejected by the decompressor.
    #[error("failed to inflate block: {0}")]
    InflateError(io::Error),

    /// A decoded length or type value violated a format invariant.
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: &'static str },

    /// Short read, seek past EOF, missing `.ver` file, or any other I/O failure.
    #[error("i/o error: {0}")]
    IoError(#[from] io::Error),
}
