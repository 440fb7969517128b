use thiserror::Error;

/// Errors raised while building or verifying an archive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An entry was given an empty path
    #[error("ZIP entry path is empty")]
    EmptyPath,

    /// Paths must be relative and use forward slashes
    #[error("invalid ZIP entry path {0:?}: paths must be relative and use '/' separators")]
    InvalidPath(String),

    /// The same path was written twice
    #[error("duplicate ZIP entry path {0:?}")]
    DuplicatePath(String),

    /// Entry does not fit the 32-bit size fields (ZIP64 is not written)
    #[error("ZIP entry {path:?} is {size} bytes, larger than the 4 GiB stored-entry limit")]
    EntryTooLarge { path: String, size: u64 },

    /// More entries than a 16-bit count field can describe
    #[error("archive has {0} entries, more than the 65535 supported without ZIP64")]
    TooManyEntries(usize),

    /// An offset no longer fits in 32 bits
    #[error("archive exceeds the 4 GiB offset limit")]
    ArchiveTooLarge,

    /// Ran out of bytes while reading a record
    #[error("truncated archive: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    /// A record did not start with its expected signature
    #[error("invalid signature 0x{found:08X} at offset {offset}, expected 0x{expected:08X}")]
    InvalidSignature {
        offset: usize,
        expected: u32,
        found: u32,
    },

    /// No end-of-central-directory record was found
    #[error("end of central directory record not found")]
    MissingEndOfCentralDirectory,

    /// Stored data does not match the declared checksum
    #[error("CRC mismatch for {path:?}: header says 0x{expected:08X}, data is 0x{actual:08X}")]
    CrcMismatch {
        path: String,
        expected: u32,
        actual: u32,
    },

    /// Header fields disagree with each other or with the data
    #[error("size mismatch for {path:?}: {detail}")]
    SizeMismatch { path: String, detail: String },

    /// Only stored (method 0) entries are understood
    #[error("unsupported compression method {0}")]
    UnsupportedCompressionMethod(u16),

    /// No entry with the requested path
    #[error("file not found in archive: {0}")]
    FileNotFound(String),

    /// Entry path or content is not valid UTF-8
    #[error("entry {0:?} is not valid UTF-8")]
    InvalidUtf8(String),
}

/// Result alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;
