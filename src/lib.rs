mod csv_out;
mod error;
mod fields;
mod header;
mod layout;
mod merge;
mod model;
mod options;
mod pdf_reader;
mod shipping;
mod table_detect;
mod table_parse;
mod tokens;
mod warning;

use std::path::Path;

use tracing::{debug, warn};

use crate::layout::Rules;
use crate::merge::scan_page;
use crate::table_detect::has_parts_header;

pub use csv_out::{write_parts_csv, write_summary_csv};
pub use error::ExtractError;
pub use layout::{HEADER_MERGE_RULES, LAYOUT_VERSION, Layout, MergeRule};
pub use merge::PageFindings;
pub use model::{Field, InvoiceRecord, PageText, PartRecord};
pub use options::{ExtractOptions, PageSelection};
pub use pdf_reader::{PageSource, PdfBytes, PdfFile, TextFile, TextPages};
pub use shipping::AddressLine;
pub use warning::{ExtractWarning, WarningCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub record: InvoiceRecord,
    pub pages_scanned: usize,
    /// Pages were left unread because the record was already complete.
    pub stopped_early: bool,
    pub warnings: Vec<ExtractWarning>,
}

fn missing_field_warnings(record: &InvoiceRecord) -> Vec<ExtractWarning> {
    let mut warnings = record
        .missing_fields()
        .map(|field| {
            ExtractWarning::new(
                WarningCode::FieldNotFound,
                format!("{} not found on any scanned page", field.label()),
            )
            .with_field(field)
        })
        .collect::<Vec<_>>();
    if record.parts.is_empty() {
        warnings.push(ExtractWarning::new(
            WarningCode::FieldNotFound,
            "no part rows found",
        ));
    }
    warnings
}

/// Runs every extractor over the pages of one document and folds the results.
///
/// With `early_exit`, scanning stops once the record is complete and no
/// remaining page holds a parts table. Scalars keep their first value and
/// only parts tables can still grow, so the record matches a full scan.
///
/// Missing fields and unusable rows never fail the document; they are left
/// absent and reported as warnings.
///
/// # Errors
///
/// Fails only when the layout patterns do not compile or the page selection
/// excludes every page.
pub fn extract_invoice(
    pages: &[PageText],
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    let rules = Rules::compile(&options.layout)?;
    let selected = pages
        .iter()
        .filter(|page| {
            options
                .pages
                .as_ref()
                .is_none_or(|selection| selection.contains(page.page_number))
        })
        .collect::<Vec<_>>();
    if selected.is_empty() && options.pages.is_some() {
        return Err(ExtractError::NoPagesSelected);
    }

    let mut record = InvoiceRecord::default();
    let mut warnings = Vec::new();
    let mut pages_scanned = 0;
    let mut stopped_early = false;

    for (index, page) in selected.iter().enumerate() {
        if options.early_exit
            && record.is_complete()
            && !selected[index..]
                .iter()
                .any(|rest| has_parts_header(&rest.text, &rules))
        {
            debug!(page = page.page_number, "record complete; skipping remaining pages");
            stopped_early = true;
            break;
        }
        pages_scanned += 1;

        if page.text.trim().is_empty() {
            warnings.push(
                ExtractWarning::new(WarningCode::EmptyPage, "page has no text")
                    .with_page(page.page_number),
            );
            continue;
        }

        let findings = scan_page(page, &rules);
        debug!(
            page = page.page_number,
            parts = findings.parts.len(),
            terminated = findings.parts_terminated,
            "scanned page"
        );
        warnings.extend(findings.malformed_rows.iter().map(|row| {
            ExtractWarning::new(
                WarningCode::MalformedRow,
                format!("skipped parts row '{row}'"),
            )
            .with_page(page.page_number)
        }));
        record = record.absorb(findings);
    }

    let (filled, total) = record.coverage();
    debug!(filled, total, parts = record.parts.len(), "extraction finished");
    warnings.extend(missing_field_warnings(&record));

    Ok(ExtractionReport {
        record,
        pages_scanned,
        stopped_early,
        warnings,
    })
}

/// Reads a document through its page source, then extracts it.
///
/// # Errors
///
/// Returns the source's error when the document is unreadable, or any error
/// from [`extract_invoice`].
pub fn extract_document(
    source: &dyn PageSource,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    let name = source.name();
    let span = tracing::debug_span!("document", name = %name);
    let _guard = span.enter();

    let pages = source.pages()?;
    debug!(pages = pages.len(), "loaded page text");
    extract_invoice(&pages, options)
}

/// # Errors
///
/// See [`extract_document`].
pub fn extract_pdf(
    input_pdf: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    extract_document(&PdfFile::new(input_pdf), options)
}

#[derive(Debug)]
pub struct DocumentOutcome {
    pub name: String,
    pub result: Result<ExtractionReport, ExtractError>,
}

/// Extracts each document independently; one failure never stops the rest.
pub fn extract_batch(
    sources: &[Box<dyn PageSource>],
    options: &ExtractOptions,
) -> Vec<DocumentOutcome> {
    sources
        .iter()
        .map(|source| {
            let name = source.name();
            let result = extract_document(source.as_ref(), options);
            if let Err(error) = &result {
                warn!(document = %name, %error, "document could not be processed");
            }
            DocumentOutcome { name, result }
        })
        .collect()
}
