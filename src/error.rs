use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("failed to extract PDF text: {0}")]
    PdfExtract(String),

    #[error("document has no pages")]
    EmptyDocument,

    #[error("no pages available after applying selection")]
    NoPagesSelected,

    #[error("invalid layout pattern: {0}")]
    Layout(#[from] regex::Error),
}

impl ExtractError {
    /// True when the page text provider could not open or decode the document.
    #[must_use]
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::PdfLoad(_) | Self::PdfExtract(_) | Self::EmptyDocument
        )
    }
}
