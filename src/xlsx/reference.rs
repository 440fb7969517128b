//! A1-style cell and range references.

/// Convert a 0-based column index to spreadsheet column letters
/// (0=A, 25=Z, 26=AA, 701=ZZ, 702=AAA).
///
/// # Examples
///
/// ```
/// use tabex::xlsx::column_letters;
/// assert_eq!(column_letters(0), "A");
/// assert_eq!(column_letters(27), "AB");
/// assert_eq!(column_letters(702), "AAA");
/// ```
pub fn column_letters(index: u32) -> String {
    // u32::MAX needs 7 letters.
    let mut buf = [0u8; 7];
    let mut pos = buf.len();
    let mut n = u64::from(index) + 1;

    while n > 0 {
        n -= 1;
        pos -= 1;
        buf[pos] = b'A' + (n % 26) as u8;
        n /= 26;
    }

    buf[pos..].iter().map(|&b| char::from(b)).collect()
}

/// Reference to a single cell, both indices 0-based (`(2, 1)` is `B3`).
pub fn cell_reference(row: u32, col: u32) -> String {
    let mut reference = column_letters(col);
    let mut buffer = itoa::Buffer::new();
    reference.push_str(buffer.format(u64::from(row) + 1));
    reference
}

/// Reference to the rectangle spanning two cells, 0-based and inclusive.
pub fn range_reference(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> String {
    let mut reference = cell_reference(first_row, first_col);
    reference.push(':');
    reference.push_str(&cell_reference(last_row, last_col));
    reference
}
