//! Little-endian field extraction (C1).
//!
//! Every multi-byte integer in SqPack is little-endian and unsigned; nothing
//! here sign-extends. The slice functions are pure and do no I/O; `StreamReader`
//! wraps a seekable source for the one decoder (`SqPackHeader`) that needs to
//! read incrementally so it can refuse unsupported platforms before consuming
//! the rest of the header.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::error::{Error, Result};

fn field<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    let end = offset + N;
    if buf.len() < end {
        return Err(Error::IoError(io::Error::from(io::ErrorKind::UnexpectedEof)));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..end]);
    Ok(out)
}

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    Ok(field::<1>(buf, offset)?[0])
}

pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(field(buf, offset)?))
}

pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(field(buf, offset)?))
}

pub fn read_u64(buf: &[u8], offset: usize) -> Result<u64> {
    Ok(u64::from_le_bytes(field(buf, offset)?))
}

pub fn read_bytes<'a>(buf: &'a [u8], offset: usize, len: usize) -> Result<&'a [u8]> {
    if buf.len() < offset + len {
        return Err(Error::IoError(io::Error::from(io::ErrorKind::UnexpectedEof)));
    }
    Ok(&buf[offset..offset + len])
}

/// Thin wrapper over a seekable byte source, used by decoders that must read
/// incrementally rather than over an already-materialized slice.
pub struct StreamReader<R> {
    inner: R,
}

impl<R: Read + Seek> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    pub fn read_exact_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.inner.read_u8()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}
