//! Block reader / decompressor (C7).
//!
//! Given a `Standard` [`FileInfo`], walks its per-block directory, reads each
//! block header, and reassembles the logical payload via raw deflate or a
//! verbatim copy. State machine per block:
//! `ReadDirectory -> ReadBlockHeader -> {Inflate | Copy} -> NextBlock`.

use std::io::{self, Read, Seek, SeekFrom};

use flate2::read::DeflateDecoder;

use super::error::{Error, Result};
use super::header::{BlockHeader, BlockInfoStandard, FileInfo, BLOCK_HEADER_SIZE, BLOCK_INFO_SIZE};

/// Read and reassemble the logical bytes of a `Standard` file.
///
/// The sum of emitted block bytes is cross-checked against
/// `info.raw_file_size`; a mismatch is logged as a warning, not a fatal
/// error, since the format does not forbid trailing padding.
pub fn read_standard_file<R: Read + Seek>(r: &mut R, info: &FileInfo) -> Result<Vec<u8>> {
    let directory_len = info.number_of_blocks as usize * BLOCK_INFO_SIZE;
    let mut directory_buf = vec![0u8; directory_len];
    r.read_exact(&mut directory_buf)?;

    let mut out = Vec::with_capacity(info.raw_file_size as usize);
    for i in 0..info.number_of_blocks as usize {
        let block_info = BlockInfoStandard::from_bytes(
            &directory_buf[i * BLOCK_INFO_SIZE..(i + 1) * BLOCK_INFO_SIZE],
        )?;

        let block_start = info.offset + info.header_size as u64 + block_info.offset as u64;
        r.seek(SeekFrom::Start(block_start))?;

        let mut header_buf = [0u8; BLOCK_HEADER_SIZE];
        r.read_exact(&mut header_buf)?;
        let block_header = BlockHeader::from_bytes(&header_buf)?;

        let mut payload = vec![0u8; block_header.block_data_size as usize];
        r.read_exact(&mut payload)?;

        if block_header.is_uncompressed() {
            out.extend_from_slice(&payload);
        } else {
            let mut decoder = DeflateDecoder::new(&payload[..]);
            decoder.read_to_end(&mut out).map_err(Error::InflateError)?;
        }
    }

    if out.len() as u64 != info.raw_file_size as u64 {
        eprintln!(
            "sqpack: block concatenation produced {} bytes, expected raw_file_size {}",
            out.len(),
            info.raw_file_size,
        );
    }

    Ok(out)
}

/// Reader adapter used by tests to exercise [`read_standard_file`] over an
/// in-memory buffer rather than an open file.
#[cfg(test)]
pub(crate) fn cursor_of(bytes: Vec<u8>) -> io::Cursor<Vec<u8>> {
    io::Cursor::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqpack::header::{FileType, BLOCK_TYPE_UNCOMPRESSED};
    use std::io::Write;

    fn block_header(data_size: u32, block_type: u32) -> [u8; BLOCK_HEADER_SIZE] {
        let mut buf = [0u8; BLOCK_HEADER_SIZE];
        buf[0..4].copy_from_slice(&16u32.to_le_bytes());
        buf[8..12].copy_from_slice(&data_size.to_le_bytes());
        buf[12..16].copy_from_slice(&block_type.to_le_bytes());
        buf
    }

    fn deflate_raw(payload: &[u8]) -> Vec<u8> {
        let mut enc = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(payload).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn two_block_file_round_trips_copy_and_inflate() {
        let payload0 = b"raw bytes, stored verbatim".to_vec();
        let payload1 = b"these bytes go through deflate and back".to_vec();
        let compressed1 = deflate_raw(&payload1);

        let block0_header = block_header(payload0.len() as u32, BLOCK_TYPE_UNCOMPRESSED);
        let block0_total = BLOCK_HEADER_SIZE as u32 + payload0.len() as u32;
        let block1_header = block_header(compressed1.len() as u32, 4713);

        let mut dir0 = [0u8; BLOCK_INFO_SIZE];
        dir0[0..4].copy_from_slice(&0u32.to_le_bytes());
        dir0[4..6].copy_from_slice(&0u16.to_le_bytes());
        dir0[6..8].copy_from_slice(&(payload0.len() as u16).to_le_bytes());

        let mut dir1 = [0u8; BLOCK_INFO_SIZE];
        dir1[0..4].copy_from_slice(&block0_total.to_le_bytes());
        dir1[4..6].copy_from_slice(&(compressed1.len() as u16).to_le_bytes());
        dir1[6..8].copy_from_slice(&(payload1.len() as u16).to_le_bytes());

        // The 24-byte FileInfo record itself precedes the block directory;
        // `header_size` covers both, so block offsets are relative to the
        // first byte after the directory.
        let mut archive = vec![0u8; 24];
        archive.extend_from_slice(&dir0);
        archive.extend_from_slice(&dir1);
        archive.extend_from_slice(&block0_header);
        archive.extend_from_slice(&payload0);
        archive.extend_from_slice(&block1_header);
        archive.extend_from_slice(&compressed1);

        let info = FileInfo {
            header_size: 24 + 2 * BLOCK_INFO_SIZE as u32,
            file_type: FileType::Standard,
            raw_file_size: (payload0.len() + payload1.len()) as u32,
            number_of_blocks: 2,
            offset: 0,
        };

        // Position the reader where `Volume::read_file` would leave it: right
        // after the 24-byte FileInfo record, at the start of the directory.
        let mut r = cursor_of(archive);
        r.seek(SeekFrom::Start(24)).unwrap();
        let result = read_standard_file(&mut r, &info).unwrap();

        let mut expected = payload0.clone();
        expected.extend_from_slice(&payload1);
        assert_eq!(result, expected);
    }

    #[test]
    fn mismatched_raw_file_size_is_not_fatal() {
        let payload = b"short".to_vec();
        let mut dir0 = [0u8; BLOCK_INFO_SIZE];
        dir0[4..6].copy_from_slice(&0u16.to_le_bytes());
        dir0[6..8].copy_from_slice(&(payload.len() as u16).to_le_bytes());

        let mut archive = vec![0u8; 24];
        archive.extend_from_slice(&dir0);
        archive.extend_from_slice(&block_header(payload.len() as u32, BLOCK_TYPE_UNCOMPRESSED));
        archive.extend_from_slice(&payload);

        let info = FileInfo {
            header_size: 24 + BLOCK_INFO_SIZE as u32,
            file_type: FileType::Standard,
            raw_file_size: 999, // deliberately wrong
            number_of_blocks: 1,
            offset: 0,
        };

        let mut r = cursor_of(archive);
        r.seek(SeekFrom::Start(24)).unwrap();
        let result = read_standard_file(&mut r, &info).unwrap();
        assert_eq!(result, payload);
    }
}
