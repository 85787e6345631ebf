//! Core library for arrivals-report analysis.
//!
//! This crate provides:
//! - PDF text extraction (page-ordered embedded text, no rendering or OCR)
//! - Returning-guest detection over "Arrivals Detailed" report text
//! - Record and configuration models shared with alternative backends

pub mod error;
pub mod models;
pub mod pdf;
pub mod report;

pub use error::{ExtractionError, PdfError, ReganError, Result};
pub use models::config::{ReganConfig, ReportVocabulary};
pub use models::guest::{GuestRecord, IdentifiedBy};
pub use pdf::{PdfProcessor, PdfTextExtractor, PAGE_BREAK};
pub use report::{GuestExtractor, ReportParser, ReportSource};
