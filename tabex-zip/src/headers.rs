//! ZIP record layouts.
//!
//! Only the subset needed for stored entries is modelled: no extra fields,
//! no comments, no data descriptors, no ZIP64.

use crate::binary::{read_u16_le, read_u32_le, ByteWriter};
use crate::errors::{Error, Result};

/// `PK\x03\x04`
pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4B50;
/// `PK\x01\x02`
pub const CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0201_4B50;
/// `PK\x05\x06`
pub const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4B50;

/// Version 2.0: the minimum for plain stored/deflated entries.
pub const VERSION_NEEDED: u16 = 20;
/// Compression method 0.
pub const METHOD_STORED: u16 = 0;

/// Timestamps are left at zero so output is byte-for-byte reproducible.
const NULL_DOS_TIME: u16 = 0;
const NULL_DOS_DATE: u16 = 0;

pub(crate) const LOCAL_FILE_HEADER_LEN: usize = 30;
pub(crate) const CENTRAL_DIRECTORY_HEADER_LEN: usize = 46;
pub(crate) const END_OF_CENTRAL_DIRECTORY_LEN: usize = 22;

fn expect_signature(data: &[u8], offset: usize, expected: u32) -> Result<()> {
    let found = read_u32_le(data, offset).ok_or(Error::Truncated { offset, needed: 4 })?;
    if found != expected {
        return Err(Error::InvalidSignature {
            offset,
            expected,
            found,
        });
    }
    Ok(())
}

fn fixed_part(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(Error::Truncated {
            offset,
            needed: len,
        })
}

/// Header written immediately before each entry's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileHeader<'a> {
    pub version_needed: u16,
    pub flags: u16,
    pub method: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name: &'a [u8],
}

impl<'a> LocalFileHeader<'a> {
    /// Header for a stored entry; both sizes equal the data length.
    pub fn stored(file_name: &'a [u8], crc32: u32, size: u32) -> Self {
        Self {
            version_needed: VERSION_NEEDED,
            flags: 0,
            method: METHOD_STORED,
            crc32,
            compressed_size: size,
            uncompressed_size: size,
            file_name,
        }
    }

    /// Encoded length including the file name.
    pub fn encoded_len(&self) -> usize {
        LOCAL_FILE_HEADER_LEN + self.file_name.len()
    }

    pub fn write_to(&self, w: &mut ByteWriter) {
        w.write_u32_le(LOCAL_FILE_HEADER_SIGNATURE)
            .write_u16_le(self.version_needed)
            .write_u16_le(self.flags)
            .write_u16_le(self.method)
            .write_u16_le(NULL_DOS_TIME)
            .write_u16_le(NULL_DOS_DATE)
            .write_u32_le(self.crc32)
            .write_u32_le(self.compressed_size)
            .write_u32_le(self.uncompressed_size)
            .write_u16_le(self.file_name.len() as u16)
            .write_u16_le(0) // extra field length
            .write_bytes(self.file_name);
    }

    /// Parse a local header at `offset`, returning it and the offset of the
    /// entry data that follows it.
    pub fn parse(data: &'a [u8], offset: usize) -> Result<(Self, usize)> {
        expect_signature(data, offset, LOCAL_FILE_HEADER_SIGNATURE)?;
        let fixed = fixed_part(data, offset, LOCAL_FILE_HEADER_LEN)?;
        let u16_at = |at| read_u16_le(fixed, at).unwrap_or_default();
        let u32_at = |at| read_u32_le(fixed, at).unwrap_or_default();

        let name_len = usize::from(u16_at(26));
        let extra_len = usize::from(u16_at(28));
        let name_start = offset + LOCAL_FILE_HEADER_LEN;
        let file_name = fixed_part(data, name_start, name_len)?;
        let data_start = name_start + name_len + extra_len;

        Ok((
            Self {
                version_needed: u16_at(4),
                flags: u16_at(6),
                method: u16_at(8),
                crc32: u32_at(14),
                compressed_size: u32_at(18),
                uncompressed_size: u32_at(22),
                file_name,
            },
            data_start,
        ))
    }
}

/// One central directory record, mirroring a local header plus its offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralDirectoryHeader<'a> {
    pub version_made_by: u16,
    pub version_needed: u16,
    pub flags: u16,
    pub method: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub local_header_offset: u32,
    pub file_name: &'a [u8],
}

impl<'a> CentralDirectoryHeader<'a> {
    /// Record describing `local`, whose header starts at `local_header_offset`.
    pub fn for_local(local: &LocalFileHeader<'a>, local_header_offset: u32) -> Self {
        Self {
            version_made_by: VERSION_NEEDED,
            version_needed: local.version_needed,
            flags: local.flags,
            method: local.method,
            crc32: local.crc32,
            compressed_size: local.compressed_size,
            uncompressed_size: local.uncompressed_size,
            local_header_offset,
            file_name: local.file_name,
        }
    }

    pub fn encoded_len(&self) -> usize {
        CENTRAL_DIRECTORY_HEADER_LEN + self.file_name.len()
    }

    pub fn write_to(&self, w: &mut ByteWriter) {
        w.write_u32_le(CENTRAL_DIRECTORY_SIGNATURE)
            .write_u16_le(self.version_made_by)
            .write_u16_le(self.version_needed)
            .write_u16_le(self.flags)
            .write_u16_le(self.method)
            .write_u16_le(NULL_DOS_TIME)
            .write_u16_le(NULL_DOS_DATE)
            .write_u32_le(self.crc32)
            .write_u32_le(self.compressed_size)
            .write_u32_le(self.uncompressed_size)
            .write_u16_le(self.file_name.len() as u16)
            .write_u16_le(0) // extra field length
            .write_u16_le(0) // file comment length
            .write_u16_le(0) // disk number start
            .write_u16_le(0) // internal attributes
            .write_u32_le(0) // external attributes
            .write_u32_le(self.local_header_offset)
            .write_bytes(self.file_name);
    }

    /// Parse a record at `offset`, returning it and the offset of the next one.
    pub fn parse(data: &'a [u8], offset: usize) -> Result<(Self, usize)> {
        expect_signature(data, offset, CENTRAL_DIRECTORY_SIGNATURE)?;
        let fixed = fixed_part(data, offset, CENTRAL_DIRECTORY_HEADER_LEN)?;
        let u16_at = |at| read_u16_le(fixed, at).unwrap_or_default();
        let u32_at = |at| read_u32_le(fixed, at).unwrap_or_default();

        let name_len = usize::from(u16_at(28));
        let extra_len = usize::from(u16_at(30));
        let comment_len = usize::from(u16_at(32));
        let name_start = offset + CENTRAL_DIRECTORY_HEADER_LEN;
        let file_name = fixed_part(data, name_start, name_len)?;
        let next = name_start + name_len + extra_len + comment_len;

        Ok((
            Self {
                version_made_by: u16_at(4),
                version_needed: u16_at(6),
                flags: u16_at(8),
                method: u16_at(10),
                crc32: u32_at(16),
                compressed_size: u32_at(20),
                uncompressed_size: u32_at(24),
                local_header_offset: u32_at(42),
                file_name,
            },
            next,
        ))
    }
}

/// Trailer locating the central directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    /// Entries on this disk; always equal to `total_entries` here.
    pub disk_entries: u16,
    pub total_entries: u16,
    pub central_directory_size: u32,
    pub central_directory_offset: u32,
}

impl EndOfCentralDirectory {
    pub fn new(entries: u16, central_directory_size: u32, central_directory_offset: u32) -> Self {
        Self {
            disk_entries: entries,
            total_entries: entries,
            central_directory_size,
            central_directory_offset,
        }
    }

    pub fn write_to(&self, w: &mut ByteWriter) {
        w.write_u32_le(END_OF_CENTRAL_DIRECTORY_SIGNATURE)
            .write_u16_le(0) // number of this disk
            .write_u16_le(0) // disk where central directory starts
            .write_u16_le(self.disk_entries)
            .write_u16_le(self.total_entries)
            .write_u32_le(self.central_directory_size)
            .write_u32_le(self.central_directory_offset)
            .write_u16_le(0); // comment length
    }

    /// Scan backwards for the trailer. Returns it and its offset.
    pub fn locate(data: &[u8]) -> Result<(Self, usize)> {
        if data.len() < END_OF_CENTRAL_DIRECTORY_LEN {
            return Err(Error::MissingEndOfCentralDirectory);
        }
        // The trailer is followed by at most a 65535-byte comment.
        let last = data.len() - END_OF_CENTRAL_DIRECTORY_LEN;
        let first = last.saturating_sub(usize::from(u16::MAX));

        let offset = (first..=last)
            .rev()
            .find(|&at| read_u32_le(data, at) == Some(END_OF_CENTRAL_DIRECTORY_SIGNATURE))
            .ok_or(Error::MissingEndOfCentralDirectory)?;

        let fixed = fixed_part(data, offset, END_OF_CENTRAL_DIRECTORY_LEN)?;
        let u16_at = |at| read_u16_le(fixed, at).unwrap_or_default();
        let u32_at = |at| read_u32_le(fixed, at).unwrap_or_default();

        Ok((
            Self {
                disk_entries: u16_at(8),
                total_entries: u16_at(10),
                central_directory_size: u32_at(12),
                central_directory_offset: u32_at(16),
            },
            offset,
        ))
    }
}
