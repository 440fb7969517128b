//! Cell formatting shared by the CSV and worksheet writers.
//!
//! Text cells go through [`sanitize_text`] before they reach any output: NUL
//! characters are removed and text that a spreadsheet application would
//! evaluate as a formula gets a leading apostrophe, so it is displayed as
//! literal text instead.

use std::borrow::Cow;

use crate::cell::Cell;

/// Characters that start a formula when they open a cell's text.
const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

/// Largest magnitude below which every integer is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Check whether text would be evaluated as a formula by a spreadsheet.
///
/// Leading whitespace is ignored, since spreadsheet applications skip it too.
///
/// # Examples
///
/// ```
/// use tabex::needs_formula_guard;
/// assert!(needs_formula_guard("=SUM(A1:A2)"));
/// assert!(needs_formula_guard("  @cmd"));
/// assert!(!needs_formula_guard("Income"));
/// ```
#[inline]
pub fn needs_formula_guard(text: &str) -> bool {
    text.trim_start()
        .starts_with(|c: char| FORMULA_TRIGGERS.contains(&c))
}

/// Neutralize a text value for export.
///
/// NUL characters are stripped, then a `'` is prepended when the text would
/// otherwise be read as a formula. Text needing neither is borrowed as is.
///
/// # Examples
///
/// ```
/// use tabex::sanitize_text;
/// assert_eq!(sanitize_text("=SUM(A1:A2)"), "'=SUM(A1:A2)");
/// assert_eq!(sanitize_text("a\0b"), "ab");
/// assert_eq!(sanitize_text("plain"), "plain");
/// ```
pub fn sanitize_text(text: &str) -> Cow<'_, str> {
    let stripped: Cow<'_, str> = if text.contains('\0') {
        Cow::Owned(text.replace('\0', ""))
    } else {
        Cow::Borrowed(text)
    };

    if !needs_formula_guard(&stripped) {
        return stripped;
    }

    let mut guarded = String::with_capacity(stripped.len() + 1);
    guarded.push('\'');
    guarded.push_str(&stripped);
    Cow::Owned(guarded)
}

/// Format a number as plain decimal text.
///
/// Integral values print without a fractional part; everything else uses the
/// shortest representation that reads back to the same `f64`. Returns `None`
/// for NaN and infinities.
///
/// # Examples
///
/// ```
/// use tabex::format_number;
/// assert_eq!(format_number(1200.0).as_deref(), Some("1200"));
/// assert_eq!(format_number(0.1).as_deref(), Some("0.1"));
/// assert_eq!(format_number(f64::NAN), None);
/// ```
pub fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        // Exact: the magnitude fits in 53 bits. Also folds -0.0 into "0".
        let mut buffer = itoa::Buffer::new();
        return Some(buffer.format(value as i64).to_string());
    }
    let mut buffer = ryu::Buffer::new();
    Some(buffer.format_finite(value).to_string())
}

/// Render a cell as the text a reader of the exported file sees.
///
/// Numbers become decimal text (empty if not finite), booleans `TRUE` or
/// `FALSE`, and text is passed through [`sanitize_text`].
pub fn cell_text(cell: &Cell) -> Cow<'_, str> {
    match cell {
        Cell::Text(text) => sanitize_text(text),
        Cell::Number(n) => format_number(*n).map_or(Cow::Borrowed(""), Cow::Owned),
        Cell::Bool(true) => Cow::Borrowed("TRUE"),
        Cell::Bool(false) => Cow::Borrowed("FALSE"),
        Cell::Empty => Cow::Borrowed(""),
    }
}

/// Render a cell as one CSV field.
///
/// The cell text is wrapped in double quotes, with inner quotes doubled,
/// when it contains the delimiter, a quote, CR or LF.
///
/// # Examples
///
/// ```
/// use tabex::{csv_field, Cell};
/// assert_eq!(csv_field(&Cell::from("a,b"), ','), "\"a,b\"");
/// assert_eq!(csv_field(&Cell::from("say \"hi\""), ','), "\"say \"\"hi\"\"\"");
/// assert_eq!(csv_field(&Cell::from(3), ','), "3");
/// ```
pub fn csv_field(cell: &Cell, delimiter: char) -> Cow<'_, str> {
    let text = cell_text(cell);
    let needs_quote = text
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\r' || c == '\n');
    if !needs_quote {
        return text;
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn guards_every_trigger() {
        for text in ["=1+1", "+1", "-1", "@SUM(A1)", " =x", "\t=x"] {
            let out = sanitize_text(text);
            assert!(out.starts_with('\''), "{text:?} was not guarded");
            assert_eq!(&out[1..], text);
        }
        assert_eq!(sanitize_text(""), "");
        assert_eq!(sanitize_text("a=b"), "a=b");
        assert_eq!(sanitize_text("'=already"), "'=already");
    }

    #[test]
    fn strips_nul_before_guarding() {
        assert_eq!(sanitize_text("\0=1"), "'=1");
        assert_eq!(sanitize_text("\0\0"), "");
        assert!(matches!(sanitize_text("clean"), Cow::Borrowed(_)));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(0.0).as_deref(), Some("0"));
        assert_eq!(format_number(-0.0).as_deref(), Some("0"));
        assert_eq!(format_number(-42.0).as_deref(), Some("-42"));
        assert_eq!(format_number(1234.5).as_deref(), Some("1234.5"));
        assert_eq!(format_number(1e-7).as_deref(), Some("1e-7"));
        assert_eq!(
            format_number(9_007_199_254_740_992.0).as_deref(),
            Some("9007199254740992")
        );
        assert_eq!(format_number(f64::INFINITY), None);
        assert_eq!(format_number(f64::NEG_INFINITY), None);
    }

    #[test]
    fn cell_text_per_variant() {
        assert_eq!(cell_text(&Cell::Bool(true)), "TRUE");
        assert_eq!(cell_text(&Cell::Bool(false)), "FALSE");
        assert_eq!(cell_text(&Cell::Empty), "");
        assert_eq!(cell_text(&Cell::Number(f64::NAN)), "");
        assert_eq!(cell_text(&Cell::Number(1200.0)), "1200");
        assert_eq!(cell_text(&Cell::from("-dash")), "'-dash");
    }

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field(&Cell::from("plain"), ','), "plain");
        assert_eq!(csv_field(&Cell::from("line\nbreak"), ','), "\"line\nbreak\"");
        assert_eq!(csv_field(&Cell::from("cr\r"), ','), "\"cr\r\"");
        assert_eq!(csv_field(&Cell::from("a\tb"), ','), "a\tb");
        assert_eq!(csv_field(&Cell::from("a\tb"), '\t'), "\"a\tb\"");
        assert_eq!(csv_field(&Cell::from("=1,2"), ','), "\"'=1,2\"");
    }

    proptest! {
        #[test]
        fn sanitized_text_never_starts_a_formula(text in "\\PC*") {
            let out = sanitize_text(&text);
            prop_assert!(!out.contains('\0'));
            if needs_formula_guard(&text.replace('\0', "")) {
                prop_assert!(out.starts_with('\''));
            } else {
                prop_assert_eq!(out.as_ref(), text.replace('\0', ""));
            }
        }

        #[test]
        fn finite_numbers_read_back(value in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            let text = format_number(value).unwrap();
            let parsed: f64 = text.parse().unwrap();
            prop_assert_eq!(parsed, value);
        }
    }
}
