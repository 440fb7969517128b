//! Output file names.

use chrono::NaiveDate;

const FALLBACK_BASE_NAME: &str = "export";

/// Reduce a base name to characters that are safe on every file system.
///
/// ASCII letters, digits, `.`, `_` and `-` are kept. Anything else becomes
/// `_`, runs of `_` collapse into one, and leading or trailing `_` are
/// trimmed. An empty result falls back to `export`.
///
/// # Examples
///
/// ```
/// use tabex::sanitize_base_name;
/// assert_eq!(sanitize_base_name("Loan Schedule (30y)"), "Loan_Schedule_30y");
/// assert_eq!(sanitize_base_name("../../etc"), ".._.._etc");
/// assert_eq!(sanitize_base_name("???"), "export");
/// ```
pub fn sanitize_base_name(base: &str) -> String {
    let mut name = String::with_capacity(base.len());
    for c in base.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            c
        } else {
            '_'
        };
        if c == '_' && name.ends_with('_') {
            continue;
        }
        name.push(c);
    }

    let trimmed = name.trim_matches('_');
    if trimmed.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build `<base>_<YYYY-MM-DD>.<extension>`, or `<base>.<extension>` without
/// a date. The base name is sanitized first.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tabex::file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9);
/// assert_eq!(file_name("cash flow", "csv", date), "cash_flow_2024-03-09.csv");
/// assert_eq!(file_name("cash flow", "xlsx", None), "cash_flow.xlsx");
/// ```
pub fn file_name(base: &str, extension: &str, date: Option<NaiveDate>) -> String {
    let base = sanitize_base_name(base);
    match date {
        Some(date) => format!("{base}_{}.{extension}", date.format("%Y-%m-%d")),
        None => format!("{base}.{extension}"),
    }
}
