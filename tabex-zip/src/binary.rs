//! Little-endian byte buffer used to lay out ZIP records.
//!
//! Every multi-byte ZIP field is little-endian. Records are written field by
//! field through this type so header layouts read top to bottom in the same
//! order as the format description, with no manual offset arithmetic.

/// Growable little-endian writer over an owned `Vec<u8>`.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append a little-endian `u16`.
    #[inline]
    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append a little-endian `u32`.
    #[inline]
    pub fn write_u32_le(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Number of bytes written so far, i.e. the offset of the next write.
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Borrow the written bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and return its buffer.
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Read a little-endian u16 from a byte slice at the given offset.
#[inline]
pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian u32 from a byte slice at the given offset.
#[inline]
pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
