//! Header/struct decoders (C3): pure decoders for every fixed-layout record in
//! the format. All but `SqPackHeader` are slice decoders that do no I/O;
//! `SqPackHeader` is the one exception because it must refuse the console
//! platform before reading the remaining fields (see `superblock.rs`'s
//! `Superblock::read` for the teacher's equivalent stream-based decode).

use std::io::{Read, Seek};

use super::error::{Error, Result};
use super::reader::{read_bytes, read_u32, read_u64, read_u8, StreamReader};

/// Console platform id; any header carrying this is rejected before further
/// fields are read.
const PLATFORM_PS3: u8 = 1;

pub const INDEX_HASH_ENTRY_SIZE: usize = 16;
pub const INDEX_HEADER_SIZE: usize = 1024;
pub const FILE_INFO_SIZE: usize = 24;
pub const BLOCK_INFO_SIZE: usize = 8;
pub const BLOCK_HEADER_SIZE: usize = 16;

#[derive(Debug, Clone)]
pub struct SqPackHeader {
    pub magic: [u8; 8],
    pub platform_id: u8,
    pub header_size: u32,
    pub version: u32,
    pub file_type: u32,
}

impl SqPackHeader {
    /// Decode from a stream, refusing the console platform before advancing
    /// past the version/type fields.
    pub fn read<R: Read + Seek>(r: &mut StreamReader<R>) -> Result<Self> {
        let magic_bytes = r.read_exact_vec(8)?;
        let mut magic = [0u8; 8];
        magic.copy_from_slice(&magic_bytes);

        let platform_id = r.read_u8()?;
        if platform_id == PLATFORM_PS3 {
            return Err(Error::UnsupportedPlatform);
        }
        let _reserved = r.read_exact_vec(3)?;

        let header_size = r.read_u32()?;
        let version = r.read_u32()?;
        let file_type = r.read_u32()?;

        Ok(Self { magic, platform_id, header_size, version, file_type })
    }
}

#[derive(Debug, Clone)]
pub struct SectionLocator {
    pub offset: u32,
    pub size: u32,
}

#[derive(Debug, Clone)]
pub struct IndexHeader {
    pub size: u32,
    pub version: u32,
    pub index_data_offset: u32,
    pub index_data_size: u32,
    pub number_of_data_files: u32,
    pub synonym: SectionLocator,
    pub empty_block: SectionLocator,
    pub dir_index: SectionLocator,
    pub index_type: u32,
}

impl IndexHeader {
    /// Decode the fixed 1024-byte index header record.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != INDEX_HEADER_SIZE {
            return Err(Error::MalformedHeader { reason: "index header is not 1024 bytes" });
        }

        let size = read_u32(data, 0)?;
        let version = read_u32(data, 4)?;
        let index_data_offset = read_u32(data, 8)?;
        let index_data_size = read_u32(data, 12)?;
        // data[16..80] is a 64-byte hash we don't validate.
        let number_of_data_files = read_u32(data, 80)?;
        let synonym = SectionLocator { offset: read_u32(data, 84)?, size: read_u32(data, 88)? };
        // data[92..156] is the synonym section hash.
        let empty_block = SectionLocator { offset: read_u32(data, 156)?, size: read_u32(data, 160)? };
        // data[164..228] is the empty-block section hash.
        let dir_index = SectionLocator { offset: read_u32(data, 228)?, size: read_u32(data, 232)? };
        // data[236..300] is the dir-index section hash.
        let index_type = read_u32(data, 300)?;
        // data[304..960] reserved, data[960..1024] trailing hash.

        if index_data_size % (INDEX_HASH_ENTRY_SIZE as u32) != 0 {
            return Err(Error::MalformedHeader {
                reason: "index_data_size is not a multiple of 16",
            });
        }

        Ok(Self {
            size,
            version,
            index_data_offset,
            index_data_size,
            number_of_data_files,
            synonym,
            empty_block,
            dir_index,
            index_type,
        })
    }
}

/// One 16-byte hash-table entry. `hash` is `(folder_crc << 32) | file_crc`;
/// `data` is the packed locator described on [`IndexHashTableEntry::data_file_id`]
/// and [`IndexHashTableEntry::data_file_offset`].
#[derive(Debug, Clone, Copy)]
pub struct IndexHashTableEntry {
    pub hash: u64,
    pub data: u32,
}

impl IndexHashTableEntry {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != INDEX_HASH_ENTRY_SIZE {
            return Err(Error::MalformedHeader { reason: "hash table entry is not 16 bytes" });
        }
        Ok(Self { hash: read_u64(data, 0)?, data: read_u32(data, 8)? })
        // data[12..16] is reserved padding.
    }

    pub fn is_synonym(&self) -> bool {
        self.data & 0b1 == 0b1
    }

    /// Which `.datN` sibling (0–7) holds the payload.
    pub fn data_file_id(&self) -> u8 {
        ((self.data & 0b1110) >> 1) as u8
    }

    /// Byte offset into the selected data file. The `~0xF` mask clears the
    /// flag and id bits before the shift; the result is 128-byte aligned.
    pub fn data_file_offset(&self) -> u64 {
        u64::from(self.data & !0xF) << 3
    }

    /// Pack `(file_id, offset)` back into a locator `data` value.
    /// `offset` must be a multiple of 16. Used by tests to round-trip the
    /// locator invariant; production code only ever decodes, never encodes.
    #[cfg(test)]
    fn pack(file_id: u8, offset: u64) -> u32 {
        ((offset >> 3) as u32) | (u32::from(file_id) << 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_enum::IntoPrimitive, num_enum::TryFromPrimitive)]
#[repr(u32)]
pub enum FileType {
    Empty = 1,
    Standard = 2,
    Model = 3,
    Texture = 4,
}

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub header_size: u32,
    pub file_type: FileType,
    pub raw_file_size: u32,
    pub number_of_blocks: u32,
    /// Absolute offset of this record within its data file.
    pub offset: u64,
}

impl FileInfo {
    pub fn from_bytes(data: &[u8], offset: u64) -> Result<Self> {
        if data.len() != FILE_INFO_SIZE {
            return Err(Error::MalformedHeader { reason: "file info is not 24 bytes" });
        }
        let header_size = read_u32(data, 0)?;
        let file_type = FileType::try_from(read_u32(data, 4)?)
            .map_err(|_| Error::MalformedHeader { reason: "unrecognized file info type" })?;
        let raw_file_size = read_u32(data, 8)?;
        // data[12..20] is reserved.
        let number_of_blocks = read_u32(data, 20)?;
        Ok(Self { header_size, file_type, raw_file_size, number_of_blocks, offset })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BlockInfoStandard {
    pub offset: u32,
    pub compressed_size: u16,
    pub uncompressed_size: u16,
}

impl BlockInfoStandard {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != BLOCK_INFO_SIZE {
            return Err(Error::MalformedHeader { reason: "block info is not 8 bytes" });
        }
        Ok(Self {
            offset: read_u32(data, 0)?,
            compressed_size: u16::from_le_bytes([read_u8(data, 4)?, read_u8(data, 5)?]),
            uncompressed_size: u16::from_le_bytes([read_u8(data, 6)?, read_u8(data, 7)?]),
        })
    }
}

/// Block type marking a block as stored verbatim (no deflate envelope).
pub const BLOCK_TYPE_UNCOMPRESSED: u32 = 32000;

#[derive(Debug, Clone, Copy)]
pub struct BlockHeader {
    pub size: u32,
    pub block_data_size: u32,
    pub block_type: u32,
}

impl BlockHeader {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != BLOCK_HEADER_SIZE {
            return Err(Error::MalformedHeader { reason: "block header is not 16 bytes" });
        }
        Ok(Self {
            size: read_u32(data, 0)?,
            // data[4..8] reserved.
            block_data_size: read_u32(data, 8)?,
            block_type: read_u32(data, 12)?,
        })
    }

    pub fn is_uncompressed(&self) -> bool {
        self.block_type == BLOCK_TYPE_UNCOMPRESSED
    }
}
