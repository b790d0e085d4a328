//! Error types for form extraction.

use thiserror::Error;

/// Errors surfaced by the extraction engine.
///
/// Field-level problems (an unreadable checkbox region, a short field list)
/// are not errors: they are explicit result variants so that callers can
/// tell "nothing checked" apart from "could not read". Only document-level
/// failures appear here.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document has no extractable text layer, e.g. a scan.
    #[error("document is not machine readable")]
    NotProcessable,

    /// No page of the document carries the requested form.
    #[error("failed to find form {0:?} in document")]
    DocumentNotFound(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
