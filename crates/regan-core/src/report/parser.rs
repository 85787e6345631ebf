//! Rule-based returning-guest parser.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::models::config::ReportVocabulary;
use crate::models::guest::{
    GuestRecord, IdentifiedBy, AMOUNT_NA, NONE_SENTINEL, UNKNOWN_GUEST, ZERO_STAYS,
};
use crate::pdf::{PdfProcessor, PdfTextExtractor};

use super::rules::{
    collapse_whitespace, extract_fields, normalize_amount, normalize_line_endings,
    segment_sections, RawFields, ReportPatterns,
};
use super::{GuestExtractor, ReportSource, Result};

/// Rule-based extraction over arrivals-report text.
///
/// A pure function of its input: the same text always yields the same
/// record list, and concurrent calls share no state.
pub struct ReportParser {
    vocabulary: ReportVocabulary,
    patterns: ReportPatterns,
}

impl ReportParser {
    /// Create a parser for the default report vocabulary.
    pub fn new() -> Self {
        let vocabulary = ReportVocabulary::default();
        let patterns =
            ReportPatterns::compile(&vocabulary).expect("default vocabulary compiles");
        Self {
            vocabulary,
            patterns,
        }
    }

    /// Create a parser for a custom report vocabulary.
    pub fn with_vocabulary(vocabulary: ReportVocabulary) -> Result<Self> {
        let patterns = ReportPatterns::compile(&vocabulary)?;
        Ok(Self {
            vocabulary,
            patterns,
        })
    }

    /// Parse report text into returning-guest records, in reservation
    /// order. An empty list is a valid outcome meaning "no returning
    /// guests found", not a failure.
    pub fn parse(&self, raw: &str) -> Vec<GuestRecord> {
        info!("Parsing arrivals report from {} characters of text", raw.len());

        let text = normalize_line_endings(raw);
        let sections = segment_sections(&text, &self.patterns);
        debug!("Segmented report into {} sections", sections.len());

        let records: Vec<GuestRecord> = sections
            .iter()
            .filter_map(|section| self.classify(extract_fields(section, &self.patterns)))
            .collect();

        debug!("Identified {} returning guests", records.len());
        records
    }

    /// Decide whether a section's fields describe a returning guest and
    /// normalize them into a record.
    fn classify(&self, fields: RawFields) -> Option<GuestRecord> {
        let confirmation_number = fields.confirmation_number?;

        let has_fixed_charge = fields.fixed_charge.is_some();
        let has_previous_stays = matches!(fields.stay_count, Some(count) if count >= 1);

        // Admission gate: a reservation is a returning guest only when at
        // least one signal fired.
        let identified_by = match (has_fixed_charge, has_previous_stays) {
            (true, true) => IdentifiedBy::Both,
            (true, false) => IdentifiedBy::FixedCharge,
            (false, true) => IdentifiedBy::PreviousStays,
            (false, false) => return None,
        };

        let fixed_charge_description = match &fields.fixed_charge {
            Some(line) => {
                let description = collapse_whitespace(line);
                if description.is_empty() {
                    self.vocabulary.default_charge_description.clone()
                } else {
                    description
                }
            }
            None => NONE_SENTINEL.to_string(),
        };

        // Without a qualifying charge the amount is always "N/A", no
        // matter what amount-looking text the section carries.
        let fixed_charge_amount = if has_fixed_charge {
            fields
                .charge_amount
                .as_deref()
                .map(normalize_amount)
                .unwrap_or_else(|| AMOUNT_NA.to_string())
        } else {
            AMOUNT_NA.to_string()
        };

        // A blank counter and an explicit zero collapse to the same "0".
        let number_of_previous_stays = match fields.stay_count {
            Some(count) if count >= 1 => count.to_string(),
            _ => ZERO_STAYS.to_string(),
        };

        Some(GuestRecord {
            guest_name: fields
                .guest_name
                .unwrap_or_else(|| UNKNOWN_GUEST.to_string()),
            confirmation_number,
            arrival_date: None,
            departure_date: None,
            identified_by,
            number_of_previous_stays,
            fixed_charge_description,
            fixed_charge_amount,
            accompanying_guests: fields
                .accompanying_guests
                .unwrap_or_else(|| NONE_SENTINEL.to_string()),
        })
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GuestExtractor for ReportParser {
    async fn extract(&self, source: &ReportSource) -> Result<Vec<GuestRecord>> {
        match source {
            ReportSource::Text(text) => Ok(self.parse(text)),
            ReportSource::Pdf(data) => {
                let mut pdf = PdfTextExtractor::new();
                pdf.load(data)?;
                let text = pdf.extract_text()?;
                Ok(self.parse(&text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TWO_BLOCK_REPORT: &str = "Castle Hot Springs Arrivals Detailed\n\
         Confirmation Number: ABC123\n\
         Primary Guest: Smith, John\n\
         Number of stays 0\n\
         Fixed Charges\n\
         1185 Return Guest Credit -100.00\n\
         Confirmation Number: XYZ999\n\
         Primary Guest: Doe, Jane\n\
         Number of stays 3\n\
         Accompanying Guests: Doe, Bob\n";

    #[test]
    fn test_two_block_report() {
        let records = ReportParser::new().parse(TWO_BLOCK_REPORT);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.confirmation_number, "ABC123");
        assert_eq!(first.guest_name, "Smith, John");
        assert_eq!(first.identified_by, IdentifiedBy::FixedCharge);
        assert_eq!(first.fixed_charge_description, "Return Guest Credit -100.00");
        assert_eq!(first.fixed_charge_amount, "100.00");
        assert_eq!(first.number_of_previous_stays, "0");
        assert_eq!(first.accompanying_guests, "None");

        let second = &records[1];
        assert_eq!(second.confirmation_number, "XYZ999");
        assert_eq!(second.guest_name, "Doe, Jane");
        assert_eq!(second.identified_by, IdentifiedBy::PreviousStays);
        assert_eq!(second.fixed_charge_description, "None");
        assert_eq!(second.fixed_charge_amount, "N/A");
        assert_eq!(second.number_of_previous_stays, "3");
        assert_eq!(second.accompanying_guests, "Doe, Bob");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = ReportParser::new();
        assert_eq!(parser.parse(TWO_BLOCK_REPORT), parser.parse(TWO_BLOCK_REPORT));
    }

    #[test]
    fn test_admission_gate_rejects_plain_reservations() {
        // Confirmation number present, but neither signal fired.
        let text = "Confirmation Number: QQQ111\n\
                    Primary Guest: Roe, Sam\n\
                    Number of stays 0\n";
        assert!(ReportParser::new().parse(text).is_empty());
    }

    #[test]
    fn test_both_signals_yield_both() {
        let text = "Confirmation Number: RR22\n\
                    Primary Guest: Kim, Lee\n\
                    Number of stays 4\n\
                    Return Guest Credit -75.00\n";
        let records = ReportParser::new().parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identified_by, IdentifiedBy::Both);
        assert_eq!(records[0].number_of_previous_stays, "4");
        assert_eq!(records[0].fixed_charge_amount, "75.00");
    }

    #[test]
    fn test_amount_is_na_without_a_qualifying_charge() {
        // Amount-looking text after a "Returning Guest" phrase, but no
        // qualifying charge line; the stays signal admits the record.
        let text = "Confirmation Number: SS33\n\
                    Primary Guest: Ortiz, Mia\n\
                    Number of stays 2\n\
                    Returning Guest Promotion -25.00\n";
        let records = ReportParser::new().parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identified_by, IdentifiedBy::PreviousStays);
        assert_eq!(records[0].fixed_charge_description, "None");
        assert_eq!(records[0].fixed_charge_amount, "N/A");
    }

    #[test]
    fn test_charge_without_amount() {
        let text = "Confirmation Number: TT44\n\
                    Primary Guest: Park, Jun\n\
                    Return Guest Credit\n";
        let records = ReportParser::new().parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fixed_charge_description, "Return Guest Credit");
        assert_eq!(records[0].fixed_charge_amount, "N/A");
        assert_eq!(records[0].number_of_previous_stays, "0");
    }

    #[test]
    fn test_unresolved_name_gets_sentinel() {
        let text = "Confirmation Number: UU55\nNumber of stays 1\n";
        let records = ReportParser::new().parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].guest_name, "Unknown Guest");
    }

    #[test]
    fn test_empty_and_anchorless_text() {
        let parser = ReportParser::new();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("a report with no reservation headers").is_empty());
    }

    #[test]
    fn test_carriage_returns_are_tolerated() {
        let text = "Confirmation Number: VV66\r\n\
                    Primary Guest: Cho, Dan\r\n\
                    Number of stays 5\r\n";
        let records = ReportParser::new().parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].guest_name, "Cho, Dan");
        assert_eq!(records[0].number_of_previous_stays, "5");
    }

    #[test]
    fn test_alternate_vocabulary() {
        let vocabulary = ReportVocabulary {
            anchor_label: "Buchungsnummer".to_string(),
            primary_guest_label: "Hauptgast".to_string(),
            guest_name_label: "Gastname".to_string(),
            stays_label: "Anzahl Aufenthalte".to_string(),
            fixed_charge_variants: vec!["Stammgast Bonus".to_string()],
            charge_amount_prefixes: vec!["Stammgast".to_string()],
            accompanying_label: "Begleitperson".to_string(),
            default_charge_description: "Stammgast Bonus".to_string(),
        };
        let parser = ReportParser::with_vocabulary(vocabulary).unwrap();

        let text = "Buchungsnummer: DE-77\n\
                    Hauptgast: Muster, Max\n\
                    Anzahl Aufenthalte 2\n\
                    Stammgast Bonus -80.00\n";
        let records = parser.parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].confirmation_number, "DE-77");
        assert_eq!(records[0].identified_by, IdentifiedBy::Both);
        assert_eq!(records[0].fixed_charge_amount, "80.00");
    }

    #[tokio::test]
    async fn test_extract_from_text_source() {
        let parser = ReportParser::new();
        let source = ReportSource::Text(TWO_BLOCK_REPORT.to_string());
        let records = parser.extract(&source).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_rejects_unreadable_pdf() {
        let parser = ReportParser::new();
        let source = ReportSource::Pdf(b"not a pdf".to_vec());
        let result = parser.extract(&source).await;
        assert!(matches!(
            result,
            Err(crate::error::ExtractionError::Document(_))
        ));
    }
}
