//! Error types for the regan-core library.

use thiserror::Error;

/// Main error type for the regan library.
#[derive(Error, Debug)]
pub enum ReganError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Report extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to returning-guest extraction.
///
/// The rule pipeline itself has no fatal states: an unresolved field
/// degrades to its sentinel and a text with no anchors yields an empty
/// record list. These variants cover pattern compilation from a custom
/// vocabulary, unreadable source documents, and failures from alternative
/// extraction backends.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A vocabulary entry compiled into an invalid pattern.
    #[error("invalid pattern for {field}: {reason}")]
    InvalidPattern { field: String, reason: String },

    /// The source document could not be read.
    #[error("could not read document: {0}")]
    Document(#[from] PdfError),

    /// An extraction backend failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for the regan library.
pub type Result<T> = std::result::Result<T, ReganError>;
