use once_cell::sync::Lazy;

/// Reflected form of the IEEE 802.3 polynomial `0x04C11DB7`.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Byte-indexed remainder table, built on first use and never written again.
static CRC_TABLE: Lazy<[u32; 256]> = Lazy::new(|| {
    let mut table = [0u32; 256];
    for (n, slot) in table.iter_mut().enumerate() {
        let mut c = n as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
        }
        *slot = c;
    }
    table
});

/// Compute the CRC32 (IEEE) of a byte slice.
///
/// This is the checksum stored in ZIP local and central directory headers.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    crc32_chunk(data, 0)
}

/// Compute CRC32 incrementally, combining with a previous CRC value.
///
/// `crc32_chunk(b, crc32(a))` equals `crc32(a ++ b)`, so data can be hashed
/// as it arrives.
pub fn crc32_chunk(data: &[u8], prev: u32) -> u32 {
    let table = &*CRC_TABLE;
    let mut crc = !prev;
    for &byte in data {
        crc = table[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    !crc
}
