//! XML text helpers for the generated package parts.

use std::borrow::Cow;

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

const ESCAPE_PATTERNS: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ESCAPE_REPLACEMENTS: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Built once, shared by every export.
static XML_ESCAPER: Lazy<Option<AhoCorasick>> =
    Lazy::new(|| AhoCorasick::builder().build(ESCAPE_PATTERNS).ok());

/// Escape the five XML special characters.
///
/// Text without any of them is returned borrowed.
///
/// # Examples
///
/// ```
/// use tabex::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hi\"</tag>"), "&lt;tag&gt;&quot;hi&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("it's"), "it&apos;s");
/// ```
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    match XML_ESCAPER.as_ref() {
        Some(escaper) => Cow::Owned(escaper.replace_all(text, &ESCAPE_REPLACEMENTS)),
        None => Cow::Owned(escape_slow(text)),
    }
}

fn escape_slow(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Check whether a character may appear in an XML 1.0 document.
#[inline]
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Drop characters that XML 1.0 cannot represent, even as references.
pub fn strip_invalid_xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

/// Make arbitrary text safe as XML character data or attribute content.
pub fn xml_text(text: &str) -> Cow<'_, str> {
    match strip_invalid_xml_chars(text) {
        Cow::Borrowed(valid) => escape_xml(valid),
        Cow::Owned(valid) => Cow::Owned(escape_xml(&valid).into_owned()),
    }
}

/// Panic unless `xml` parses cleanly with matching start and end tags.
#[cfg(test)]
pub(crate) fn assert_well_formed(xml: &str) {
    use quick_xml::events::Event;

    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => panic!("malformed XML at {}: {e}\n{xml}", reader.buffer_position()),
        }
        buf.clear();
    }
    assert_eq!(depth, 0, "unclosed elements in\n{xml}");
}
