//! Scalar invoice fields.
//!
//! Labelled fields are read straight from the raw page text with a pattern;
//! the pack-list id has no inline label and is recovered positionally from
//! its header row.

use regex::Regex;
use tracing::trace;

use crate::header::{column_index, locate_headers, merge_header_tokens};
use crate::layout::Rules;
use crate::tokens::{tokenize, tokenize_row};

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|capture| capture.get(1))
        .map(|value| value.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn invoice_id(text: &str, rules: &Rules<'_>) -> Option<String> {
    first_capture(&rules.invoice_id, text)
}

pub(crate) fn harmonization_code(text: &str, rules: &Rules<'_>) -> Option<String> {
    first_capture(&rules.harmonization_code, text)
}

pub(crate) fn customer_po(text: &str, rules: &Rules<'_>) -> Option<String> {
    first_capture(&rules.customer_po, text)
}

pub(crate) fn pack_list_id(lines: &[&str], rules: &Rules<'_>) -> Option<String> {
    let layout = rules.layout;
    for found in locate_headers(lines, layout.pack_list_markers) {
        let columns = merge_header_tokens(&tokenize(found.header), layout.merge_rules);
        let Some(index) = column_index(&columns, layout.pack_list_column) else {
            trace!(line = found.index, "pack list markers without a merged column");
            continue;
        };

        let Some(data) = found.data else {
            continue;
        };
        let row = tokenize_row(data, rules);
        if let Some(value) = row.into_iter().nth(index) {
            return Some(value);
        }
        trace!(
            line = found.index,
            index, "pack list data row is shorter than its header"
        );
    }
    None
}
