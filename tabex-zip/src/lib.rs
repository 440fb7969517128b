//! Store-only ZIP archives for spreadsheet export.
//!
//! This crate builds ZIP containers entirely in memory using the "stored"
//! method (no compression), which every OOXML consumer accepts. It also ships
//! a small verifying reader so callers can check what they produced.
//!
//! # Quick Start
//!
//! ```rust
//! use tabex_zip::{ArchiveReader, ZipArchiveWriter};
//!
//! // Writing
//! let mut writer = ZipArchiveWriter::new();
//! writer.write_stored_file("mimetype", b"text/plain")?;
//! writer.write_stored_file("docs/readme.txt", b"hello")?;
//! let bytes = writer.finish()?;
//!
//! // Reading back
//! let archive = ArchiveReader::new(&bytes)?;
//! assert_eq!(archive.read("docs/readme.txt")?, b"hello");
//! # Ok::<(), tabex_zip::Error>(())
//! ```
#![forbid(unsafe_code)]

mod binary;
mod crc;
mod errors;
mod headers;
mod reader;
mod writer;

pub use binary::ByteWriter;
pub use crc::{crc32, crc32_chunk};
pub use errors::{Error, Result};
pub use headers::{
    CentralDirectoryHeader, EndOfCentralDirectory, LocalFileHeader, CENTRAL_DIRECTORY_SIGNATURE,
    END_OF_CENTRAL_DIRECTORY_SIGNATURE, LOCAL_FILE_HEADER_SIGNATURE, METHOD_STORED,
    VERSION_NEEDED,
};
pub use reader::{ArchiveReader, EntryInfo};
pub use writer::{write_archive, ZipArchiveWriter, ZipEntry};
