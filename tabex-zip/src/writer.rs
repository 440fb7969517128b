//! In-memory writer for store-only ZIP archives.

use std::collections::HashSet;

use crate::binary::ByteWriter;
use crate::crc::crc32;
use crate::errors::{Error, Result};
use crate::headers::{
    CentralDirectoryHeader, EndOfCentralDirectory, LocalFileHeader, END_OF_CENTRAL_DIRECTORY_LEN,
};

/// A named byte buffer destined for an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    /// Archive-relative path using `/` separators, unique within an archive.
    pub path: String,
    pub bytes: Vec<u8>,
}

impl ZipEntry {
    pub fn new(path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }
}

/// What the central directory needs to know about an entry already written.
#[derive(Debug)]
struct WrittenEntry {
    path: String,
    crc32: u32,
    size: u32,
    local_header_offset: u32,
}

/// Writer producing a complete ZIP archive in memory.
///
/// Every entry uses the stored method: the local header is followed by the
/// raw bytes, and [`finish`](Self::finish) appends the central directory and
/// end-of-central-directory record.
#[derive(Debug, Default)]
pub struct ZipArchiveWriter {
    out: ByteWriter,
    entries: Vec<WrittenEntry>,
    seen: HashSet<String>,
}

impl ZipArchiveWriter {
    /// Create a new archive writer that writes to memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write a file without compression (stored).
    pub fn write_stored_file(&mut self, path: &str, data: &[u8]) -> Result<()> {
        validate_path(path)?;
        if self.seen.contains(path) {
            return Err(Error::DuplicatePath(path.to_string()));
        }
        if self.entries.len() >= usize::from(u16::MAX) {
            return Err(Error::TooManyEntries(self.entries.len() + 1));
        }
        let size = u32::try_from(data.len()).map_err(|_| Error::EntryTooLarge {
            path: path.to_string(),
            size: data.len() as u64,
        })?;
        let local_header_offset =
            u32::try_from(self.out.position()).map_err(|_| Error::ArchiveTooLarge)?;

        let crc = crc32(data);
        let header = LocalFileHeader::stored(path.as_bytes(), crc, size);
        header.write_to(&mut self.out);
        self.out.write_bytes(data);

        self.seen.insert(path.to_string());
        self.entries.push(WrittenEntry {
            path: path.to_string(),
            crc32: crc,
            size,
            local_header_offset,
        });
        Ok(())
    }

    /// Write a prepared entry.
    pub fn write_entry(&mut self, entry: &ZipEntry) -> Result<()> {
        self.write_stored_file(&entry.path, &entry.bytes)
    }

    /// Write the central directory and trailer, returning the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let Self {
            mut out, entries, ..
        } = self;

        let central_directory_offset =
            u32::try_from(out.position()).map_err(|_| Error::ArchiveTooLarge)?;

        for entry in &entries {
            let local = LocalFileHeader::stored(entry.path.as_bytes(), entry.crc32, entry.size);
            CentralDirectoryHeader::for_local(&local, entry.local_header_offset)
                .write_to(&mut out);
        }

        let central_directory_size = out.position() - central_directory_offset as usize;
        let central_directory_size =
            u32::try_from(central_directory_size).map_err(|_| Error::ArchiveTooLarge)?;
        if out.position() + END_OF_CENTRAL_DIRECTORY_LEN > u32::MAX as usize {
            return Err(Error::ArchiveTooLarge);
        }

        // Checked against u16::MAX on every write.
        let count = entries.len() as u16;
        EndOfCentralDirectory::new(count, central_directory_size, central_directory_offset)
            .write_to(&mut out);

        Ok(out.into_inner())
    }
}

/// Build an archive from `entries`, in order.
pub fn write_archive<'a, I>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a ZipEntry>,
{
    let mut writer = ZipArchiveWriter::new();
    for entry in entries {
        writer.write_entry(entry)?;
    }
    writer.finish()
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }
    if path.starts_with('/') || path.contains('\\') || path.len() > usize::from(u16::MAX) {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::read_u32_le;
    use crate::headers::{CENTRAL_DIRECTORY_SIGNATURE, LOCAL_FILE_HEADER_SIGNATURE};

    #[test]
    fn empty_archive_is_just_a_trailer() {
        let bytes = ZipArchiveWriter::new().finish().unwrap();
        assert_eq!(bytes.len(), 22);
        assert_eq!(&bytes[0..4], b"PK\x05\x06");
        assert!(bytes[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn single_entry_layout() {
        let mut writer = ZipArchiveWriter::new();
        writer.write_stored_file("test.txt", b"Hello, World!").unwrap();
        assert_eq!(writer.len(), 1);
        let bytes = writer.finish().unwrap();

        let local_len = 30 + "test.txt".len() + "Hello, World!".len();
        let central_len = 46 + "test.txt".len();
        assert_eq!(bytes.len(), local_len + central_len + 22);

        assert_eq!(read_u32_le(&bytes, 0), Some(LOCAL_FILE_HEADER_SIGNATURE));
        assert_eq!(&bytes[38..51], b"Hello, World!");
        assert_eq!(read_u32_le(&bytes, local_len), Some(CENTRAL_DIRECTORY_SIGNATURE));

        let eocd = bytes.len() - 22;
        assert_eq!(read_u32_le(&bytes, eocd + 12), Some(central_len as u32));
        assert_eq!(read_u32_le(&bytes, eocd + 16), Some(local_len as u32));
    }

    #[test]
    fn offsets_account_for_previous_entries() {
        let entries = vec![
            ZipEntry::new("a.txt", b"aaaa".to_vec()),
            ZipEntry::new("dir/b.txt", b"bb".to_vec()),
        ];
        let bytes = write_archive(&entries).unwrap();

        let second_offset = 30 + 5 + 4;
        assert_eq!(
            read_u32_le(&bytes, second_offset),
            Some(LOCAL_FILE_HEADER_SIGNATURE)
        );
        let central_start = second_offset + 30 + 9 + 2;
        // Second central record's local header offset field
        let second_central = central_start + 46 + 5;
        assert_eq!(
            read_u32_le(&bytes, second_central + 42),
            Some(second_offset as u32)
        );
    }

    #[test]
    fn rejects_duplicates_and_bad_paths() {
        let mut writer = ZipArchiveWriter::new();
        writer.write_stored_file("a.xml", b"<a/>").unwrap();
        assert_eq!(
            writer.write_stored_file("a.xml", b"<b/>"),
            Err(Error::DuplicatePath("a.xml".to_string()))
        );
        assert_eq!(writer.write_stored_file("", b""), Err(Error::EmptyPath));
        assert!(matches!(
            writer.write_stored_file("xl\\workbook.xml", b""),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            writer.write_stored_file("/abs.xml", b""),
            Err(Error::InvalidPath(_))
        ));
        assert_eq!(writer.len(), 1);
    }

    #[test]
    fn output_is_deterministic() {
        let entries = vec![ZipEntry::new("x.xml", "<x/>")];
        assert_eq!(
            write_archive(&entries).unwrap(),
            write_archive(&entries).unwrap()
        );
    }
}
