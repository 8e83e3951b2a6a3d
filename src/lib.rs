//! Read-only access to the SqPack archive format.
//!
//! SqPack packs tens of thousands of game assets into a handful of large
//! container files and locates individual assets with a CRC32-hashed path
//! lookup against a side-car index. This crate opens the archive rooted at a
//! game installation directory and returns the decompressed bytes of any
//! asset by its logical path.
//!
//! # Usage Example
//! ```no_run
//! use sqpack::GameData;
//! fn read_root_exl() -> sqpack::Result<()> {
//!     let game = GameData::open("/path/to/game")?;
//!     let bytes = game.read("exd/root.exl")?;
//!     println!("read {} bytes", bytes.len());
//!     Ok(())
//! }
//! ```
//!
//! # Scope
//! This crate materializes whole files only; it does not support streaming
//! partial reads, writing/mutating archives, or the Model/Texture file
//! layouts (recognized but unimplemented). The top-level CLI, the `.exl` row
//! parser, and filesystem enumeration policy are intentionally left to
//! callers — see [`sqpack::walker`] for the enumeration seam.

pub mod sqpack;

pub use sqpack::error::{Error, Result};
pub use sqpack::gamedata::GameData;
pub use sqpack::path::{hash_path, ParsedFileName};
