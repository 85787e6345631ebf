//! Returning-guest extraction from arrivals-report text.

mod parser;
pub mod rules;

pub use parser::ReportParser;

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::models::guest::GuestRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// A source document handed to an extraction backend.
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// Already-extracted report text.
    Text(String),
    /// Raw PDF bytes.
    Pdf(Vec<u8>),
}

/// Strategy interface over extraction backends.
///
/// The rule engine and the generative backend both implement this; a
/// deployment selects exactly one at runtime. Records come back in the
/// order their reservations appear in the report, and an empty list means
/// "no returning guests found", not failure.
#[async_trait]
pub trait GuestExtractor: Send + Sync {
    /// Extract returning-guest records from a source document.
    async fn extract(&self, source: &ReportSource) -> Result<Vec<GuestRecord>>;
}
