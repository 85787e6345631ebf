//! Regex battery compiled from a report vocabulary.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractionError;
use crate::models::config::ReportVocabulary;

lazy_static! {
    /// Patterns for the default report vocabulary.
    pub static ref DEFAULT_PATTERNS: ReportPatterns =
        ReportPatterns::compile(&ReportVocabulary::default())
            .expect("default vocabulary compiles");

    /// First numeric token: optional sign, comma-grouped digits, optional
    /// decimal fraction.
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(r"-?\d[\d,]*(?:\.\d+)?").unwrap();
}

/// Compiled patterns for one report vocabulary.
///
/// Label matches are case-insensitive and tolerate an optional colon or
/// hyphen after the label.
#[derive(Debug)]
pub struct ReportPatterns {
    /// Anchor with its confirmation-number capture.
    pub anchor: Regex,
    /// Anchor label alone, used as a capture terminator.
    pub anchor_label: Regex,
    /// Preferred guest-name label.
    pub primary_guest: Regex,
    /// Fallback guest-name label.
    pub guest_name: Regex,
    /// Stay counter with its integer capture.
    pub stays: Regex,
    /// Stay label alone, used as a capture terminator.
    pub stays_label: Regex,
    /// Qualifying fixed-charge line.
    pub fixed_charge: Regex,
    /// Charge amount token following a charge-amount prefix.
    pub charge_amount: Regex,
    /// Accompanying-guests label.
    pub accompanying: Regex,
    /// Bare "Return", used as a guest-name terminator.
    pub return_term: Regex,
}

impl ReportPatterns {
    /// Compile the battery from a vocabulary.
    pub fn compile(vocab: &ReportVocabulary) -> Result<Self, ExtractionError> {
        if vocab.fixed_charge_variants.is_empty() {
            return Err(invalid("fixed_charge", "empty variant list"));
        }
        if vocab.charge_amount_prefixes.is_empty() {
            return Err(invalid("charge_amount", "empty prefix list"));
        }

        let anchor_label = label_pattern(&vocab.anchor_label);

        Ok(Self {
            anchor: compile(
                "anchor",
                &format!(r"(?i){}\s*[:#]?\s*([A-Za-z0-9][A-Za-z0-9-]*)", anchor_label),
            )?,
            anchor_label: compile("anchor_label", &format!(r"(?i){}", anchor_label))?,
            primary_guest: compile(
                "primary_guest",
                &format!(r"(?i){}\s*[:\-]?\s*", label_pattern(&vocab.primary_guest_label)),
            )?,
            guest_name: compile(
                "guest_name",
                &format!(r"(?i){}\s*[:\-]?\s*", label_pattern(&vocab.guest_name_label)),
            )?,
            stays: compile(
                "stays",
                &format!(r"(?i){}\s*[:\-]?\s*(\d+)", label_pattern(&vocab.stays_label)),
            )?,
            stays_label: compile(
                "stays_label",
                &format!(r"(?i){}", label_pattern(&vocab.stays_label)),
            )?,
            fixed_charge: compile(
                "fixed_charge",
                &format!(r"(?i)(?:{})[^\n]*", alternatives(&vocab.fixed_charge_variants)),
            )?,
            charge_amount: compile(
                "charge_amount",
                &format!(
                    r"(?i)(?:{})\D*?(-?\$?-?\d[\d,]*(?:\.\d+)?)",
                    alternatives(&vocab.charge_amount_prefixes)
                ),
            )?,
            accompanying: compile(
                "accompanying",
                &format!(
                    r"(?i){}(?:\(s\)|s)?\s*[:\-]?\s*",
                    label_pattern(&vocab.accompanying_label)
                ),
            )?,
            return_term: compile("return_term", r"(?i)return")?,
        })
    }
}

/// Whitespace-tolerant pattern for a literal label.
fn label_pattern(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Alternation over whitespace-tolerant literal phrases.
fn alternatives(phrases: &[String]) -> String {
    phrases
        .iter()
        .map(|phrase| label_pattern(phrase))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(field: &str, pattern: &str) -> Result<Regex, ExtractionError> {
    Regex::new(pattern).map_err(|e| invalid(field, &e.to_string()))
}

fn invalid(field: &str, reason: &str) -> ExtractionError {
    ExtractionError::InvalidPattern {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
