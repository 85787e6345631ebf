//! Rule-based field extraction for arrivals reports.

pub mod amounts;
pub mod fields;
pub mod patterns;
pub mod segment;

pub use amounts::normalize_amount;
pub use fields::{extract_fields, RawFields};
pub use patterns::ReportPatterns;
pub use segment::segment_sections;

use regex::Regex;

/// Normalize line endings so downstream patterns only need to match `\n`.
///
/// No other transformation happens here; whitespace collapsing is applied
/// per extracted field, because collapsing globally would destroy the
/// line-based charge pattern.
pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Capture the text between the end of a label match and the earliest
/// occurrence of any terminator, or the end of the input.
///
/// Terminator order carries no precedence; the earliest match position
/// wins.
pub(crate) fn capture_until<'a>(
    text: &'a str,
    label: &Regex,
    terminators: &[&Regex],
) -> Option<&'a str> {
    let label_match = label.find(text)?;
    let rest = &text[label_match.end()..];

    let cut = terminators
        .iter()
        .filter_map(|t| t.find(rest))
        .map(|m| m.start())
        .min()
        .unwrap_or(rest.len());

    Some(&rest[..cut])
}

/// Collapse whitespace runs to single spaces and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
