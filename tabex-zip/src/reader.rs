//! Verifying reader for store-only archives.
//!
//! Reading is mostly used to check archives produced by [`ZipArchiveWriter`]:
//! every structural invariant the writer promises is checked while indexing,
//! so a successfully constructed [`ArchiveReader`] means the archive is sound.
//!
//! [`ZipArchiveWriter`]: crate::ZipArchiveWriter

use std::collections::HashMap;

use crate::crc::crc32;
use crate::errors::{Error, Result};
use crate::headers::{CentralDirectoryHeader, EndOfCentralDirectory, LocalFileHeader, METHOD_STORED};

/// Information about an archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub path: String,
    pub crc32: u32,
    pub size: u32,
    pub local_header_offset: u32,
    /// Offset of the first data byte, just past the local header.
    pub data_offset: usize,
}

/// Archive reader over a byte slice.
///
/// # Example
/// ```rust
/// use tabex_zip::{ArchiveReader, ZipArchiveWriter};
///
/// let mut writer = ZipArchiveWriter::new();
/// writer.write_stored_file("a.txt", b"alpha")?;
/// let bytes = writer.finish()?;
///
/// let archive = ArchiveReader::new(&bytes)?;
/// assert_eq!(archive.file_names().collect::<Vec<_>>(), ["a.txt"]);
/// assert_eq!(archive.read_string("a.txt")?, "alpha");
/// # Ok::<(), tabex_zip::Error>(())
/// ```
pub struct ArchiveReader<'data> {
    data: &'data [u8],
    entries: Vec<EntryInfo>,
    /// Pre-built index for fast file lookup by name
    index: HashMap<String, usize>,
    eocd: EndOfCentralDirectory,
}

impl<'data> ArchiveReader<'data> {
    /// Index and verify an archive.
    ///
    /// Fails if the trailer's counts or offsets disagree with the central
    /// directory, if any central record disagrees with its local header, or
    /// if any entry's data does not match its CRC-32.
    pub fn new(data: &'data [u8]) -> Result<Self> {
        let (eocd, eocd_offset) = EndOfCentralDirectory::locate(data)?;
        if eocd.disk_entries != eocd.total_entries {
            return Err(Error::SizeMismatch {
                path: String::new(),
                detail: format!(
                    "per-disk entry count {} differs from total {}",
                    eocd.disk_entries, eocd.total_entries
                ),
            });
        }

        let cd_start = eocd.central_directory_offset as usize;
        let cd_end = cd_start + eocd.central_directory_size as usize;
        if cd_end != eocd_offset {
            return Err(Error::SizeMismatch {
                path: String::new(),
                detail: format!(
                    "central directory ends at {cd_end} but the trailer starts at {eocd_offset}"
                ),
            });
        }

        let mut entries = Vec::with_capacity(usize::from(eocd.total_entries));
        let mut index = HashMap::with_capacity(usize::from(eocd.total_entries));
        let mut cursor = cd_start;

        for _ in 0..eocd.total_entries {
            let (central, next) = CentralDirectoryHeader::parse(data, cursor)?;
            let entry = verify_entry(data, &central)?;
            if index.insert(entry.path.clone(), entries.len()).is_some() {
                return Err(Error::DuplicatePath(entry.path));
            }
            entries.push(entry);
            cursor = next;
        }

        if cursor != cd_end {
            return Err(Error::SizeMismatch {
                path: String::new(),
                detail: format!(
                    "central directory records end at {cursor}, declared end is {cd_end}"
                ),
            });
        }

        Ok(Self {
            data,
            entries,
            index,
            eocd,
        })
    }

    /// Get the number of entries in the archive.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the archive is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a file exists in the archive.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        let normalized = name.strip_prefix('/').unwrap_or(name);
        self.index.contains_key(normalized)
    }

    /// File names in central directory order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// All entries in central directory order.
    pub fn entries(&self) -> &[EntryInfo] {
        &self.entries
    }

    /// Offset of the central directory, as declared by the trailer.
    pub fn central_directory_offset(&self) -> u32 {
        self.eocd.central_directory_offset
    }

    /// Length of the central directory, as declared by the trailer.
    pub fn central_directory_size(&self) -> u32 {
        self.eocd.central_directory_size
    }

    /// Borrow the bytes of a file.
    pub fn read_slice(&self, name: &str) -> Result<&'data [u8]> {
        let normalized = name.strip_prefix('/').unwrap_or(name);
        let entry = self
            .index
            .get(normalized)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::FileNotFound(normalized.to_string()))?;
        Ok(&self.data[entry.data_offset..entry.data_offset + entry.size as usize])
    }

    /// Read a file's contents.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.read_slice(name).map(<[u8]>::to_vec)
    }

    /// Read a file as a UTF-8 string.
    pub fn read_string(&self, name: &str) -> Result<String> {
        let bytes = self.read(name)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8(name.to_string()))
    }
}

impl std::fmt::Debug for ArchiveReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveReader")
            .field("file_count", &self.entries.len())
            .finish()
    }
}

/// Cross-check a central record against its local header and data.
fn verify_entry(data: &[u8], central: &CentralDirectoryHeader<'_>) -> Result<EntryInfo> {
    let path = std::str::from_utf8(central.file_name)
        .map_err(|_| Error::InvalidUtf8(String::from_utf8_lossy(central.file_name).into_owned()))?
        .to_string();

    if central.method != METHOD_STORED {
        return Err(Error::UnsupportedCompressionMethod(central.method));
    }

    let (local, data_offset) = LocalFileHeader::parse(data, central.local_header_offset as usize)?;
    if local.file_name != central.file_name {
        return Err(Error::SizeMismatch {
            path,
            detail: "local header names a different file".to_string(),
        });
    }
    if local.method != central.method {
        return Err(Error::UnsupportedCompressionMethod(local.method));
    }
    if local.compressed_size != local.uncompressed_size
        || local.compressed_size != central.compressed_size
        || local.uncompressed_size != central.uncompressed_size
    {
        return Err(Error::SizeMismatch {
            path,
            detail: format!(
                "local sizes {}/{} disagree with central sizes {}/{}",
                local.compressed_size,
                local.uncompressed_size,
                central.compressed_size,
                central.uncompressed_size
            ),
        });
    }

    let size = central.uncompressed_size;
    let content = data_offset
        .checked_add(size as usize)
        .and_then(|end| data.get(data_offset..end))
        .ok_or(Error::Truncated {
            offset: data_offset,
            needed: size as usize,
        })?;

    let actual = crc32(content);
    if local.crc32 != central.crc32 || actual != central.crc32 {
        return Err(Error::CrcMismatch {
            path,
            expected: central.crc32,
            actual,
        });
    }

    Ok(EntryInfo {
        path,
        crc32: actual,
        size,
        local_header_offset: central.local_header_offset,
        data_offset,
    })
}
