use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::model::PageText;

/// Produces the ordered page texts of one document.
///
/// Implementations either return every page or fail; partial text is never
/// handed to the extractors.
pub trait PageSource {
    /// Identity used when reporting this document.
    fn name(&self) -> String;

    /// # Errors
    ///
    /// Returns an [`ExtractError`] when the document cannot be opened or decoded.
    fn pages(&self) -> Result<Vec<PageText>, ExtractError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    path: PathBuf,
}

impl PdfFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for PdfFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn pages(&self) -> Result<Vec<PageText>, ExtractError> {
        let document = Document::load(&self.path)?;
        let extracted = pdf_extract::extract_text(&self.path).map_err(|error| {
            warn!(%error, path = %self.path.display(), "pdf-extract failed");
            error.to_string()
        });
        pages_from_document(&document, extracted.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfBytes {
    name: String,
    bytes: Vec<u8>,
}

impl PdfBytes {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl PageSource for PdfBytes {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn pages(&self) -> Result<Vec<PageText>, ExtractError> {
        let document = Document::load_mem(&self.bytes)?;
        let extracted = pdf_extract::extract_text_from_mem(&self.bytes).map_err(|error| {
            warn!(%error, name = %self.name, "pdf-extract failed");
            error.to_string()
        });
        pages_from_document(&document, extracted.as_deref())
    }
}

/// Already-extracted text, pages separated by form feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPages {
    name: String,
    text: String,
}

impl TextPages {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl PageSource for TextPages {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn pages(&self) -> Result<Vec<PageText>, ExtractError> {
        numbered_pages(&self.text)
    }
}

/// A text file of form-feed separated pages, read when its pages are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for TextFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn pages(&self) -> Result<Vec<PageText>, ExtractError> {
        let text = std::fs::read_to_string(&self.path)?;
        numbered_pages(&text)
    }
}

fn numbered_pages(raw_text: &str) -> Result<Vec<PageText>, ExtractError> {
    let pages = split_text_into_pages(raw_text)
        .into_iter()
        .zip(1..)
        .map(|(text, page_number)| PageText { page_number, text })
        .collect::<Vec<_>>();
    if pages.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    Ok(pages)
}

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(|page| page.trim().is_empty()) {
        pages.pop();
    }
    pages
}

/// Favours text that kept its rows: multi-token lines weigh most.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut score = 0_i64;
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        score += 1;
        if line.split_whitespace().nth(1).is_some() {
            score += 10;
        }
    }
    let broken = i64::try_from(text.matches('\u{FFFD}').count()).unwrap_or(i64::MAX / 8);
    score - broken * 5
}

/// Picks the better of pdf-extract's and lopdf's text for every page.
///
/// Fails only when neither extractor produced text for any page.
fn pages_from_document(
    document: &Document,
    extracted: Result<&str, &String>,
) -> Result<Vec<PageText>, ExtractError> {
    let pages_map = document.get_pages();
    if pages_map.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    let split = extracted
        .ok()
        .map(split_text_into_pages)
        .filter(|pages| pages.len() == pages_map.len());
    if extracted.is_ok() && split.is_none() {
        debug!("pdf-extract page count differs from the page tree; using lopdf text only");
    }

    let mut decoded_any = split.is_some();
    let mut pages = Vec::with_capacity(pages_map.len());
    for (index, page_no) in pages_map.keys().enumerate() {
        let mut candidates = Vec::new();
        if let Some(text) = split.as_ref().and_then(|pages| pages.get(index)) {
            candidates.push(text.clone());
        }
        match document.extract_text(&[*page_no]) {
            Ok(text) => candidates.push(text),
            Err(error) => debug!(page = *page_no, %error, "lopdf could not extract page text"),
        }
        decoded_any |= !candidates.is_empty();

        let text = candidates
            .into_iter()
            .max_by_key(|text| extraction_quality_score(text))
            .unwrap_or_default();
        pages.push(PageText {
            page_number: *page_no,
            text,
        });
    }

    if !decoded_any {
        let reason = extracted
            .err()
            .map_or_else(|| "no page produced text".to_string(), String::clone);
        return Err(ExtractError::PdfExtract(reason));
    }

    Ok(pages)
}
