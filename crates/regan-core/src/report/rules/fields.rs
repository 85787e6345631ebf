//! Per-section field extraction.

use super::patterns::ReportPatterns;
use super::{capture_until, collapse_whitespace};

/// Raw field values pulled from one reservation section, prior to
/// classification and sentinel substitution.
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    /// Confirmation number from the section's anchor.
    pub confirmation_number: Option<String>,
    /// Guest name, whitespace-collapsed.
    pub guest_name: Option<String>,
    /// Previous-stay counter as printed.
    pub stay_count: Option<u32>,
    /// Qualifying fixed-charge line, as matched.
    pub fixed_charge: Option<String>,
    /// Amount token following the charge phrase.
    pub charge_amount: Option<String>,
    /// Accompanying guests, whitespace-collapsed; absent when the report
    /// prints nothing or a literal "none".
    pub accompanying_guests: Option<String>,
}

/// Run the pattern battery over one section.
///
/// Each field is searched independently, first match wins, and absence is
/// never an error; the classifier substitutes sentinels afterwards.
pub fn extract_fields(section: &str, patterns: &ReportPatterns) -> RawFields {
    let confirmation_number = patterns
        .anchor
        .captures(section)
        .map(|caps| caps[1].to_string());

    // The name runs until the next structural label or the word "Return",
    // whichever comes first in the section.
    let name_terminators = [
        &patterns.anchor_label,
        &patterns.stays_label,
        &patterns.return_term,
    ];
    let guest_name = capture_until(section, &patterns.primary_guest, &name_terminators)
        .or_else(|| capture_until(section, &patterns.guest_name, &name_terminators))
        .map(collapse_whitespace)
        .filter(|name| !name.is_empty());

    let stay_count = patterns
        .stays
        .captures(section)
        .and_then(|caps| caps[1].parse().ok());

    let fixed_charge = patterns
        .fixed_charge
        .find(section)
        .map(|m| m.as_str().to_string());

    // Searched unconditionally; the classifier ignores it when no charge
    // line qualified.
    let charge_amount = patterns
        .charge_amount
        .captures(section)
        .map(|caps| caps[1].to_string());

    let accompanying_terminators = [&patterns.anchor_label, &patterns.stays_label];
    let accompanying_guests =
        capture_until(section, &patterns.accompanying, &accompanying_terminators)
            .map(collapse_whitespace)
            .filter(|text| !text.is_empty() && !text.eq_ignore_ascii_case("none"));

    RawFields {
        confirmation_number,
        guest_name,
        stay_count,
        fixed_charge,
        charge_amount,
        accompanying_guests,
    }
}
