//! Marker strings, merge rules and patterns for the supported invoice layout.
//!
//! Header merging and row repair must agree on token positions, so both rule
//! sets live here together and move under a single [`LAYOUT_VERSION`].

use regex::Regex;

use crate::error::ExtractError;

pub const LAYOUT_VERSION: u32 = 1;

/// Consecutive raw header tokens that form one logical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRule {
    pub parts: &'static [&'static str],
    pub label: &'static str,
}

impl MergeRule {
    #[must_use]
    pub fn matches_at(&self, tokens: &[String], index: usize) -> bool {
        tokens
            .get(index..index + self.parts.len())
            .is_some_and(|window| window.iter().zip(self.parts).all(|(token, part)| token == part))
    }
}

/// Tried in order at every header position; the first match wins.
pub const HEADER_MERGE_RULES: &[MergeRule] = &[
    MergeRule {
        parts: &["PACK", "LIST", "ID"],
        label: "PACK LIST ID",
    },
    MergeRule {
        parts: &["PART", "ID"],
        label: "PART ID",
    },
    MergeRule {
        parts: &["SALES", "REP"],
        label: "SALES REP",
    },
    MergeRule {
        parts: &["CUSTOMER", "PO"],
        label: "CUSTOMER PO",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub version: u32,
    pub merge_rules: &'static [MergeRule],

    /// `<decimal><code>` glued together by the text extractor.
    pub fused_token_pattern: &'static str,
    /// Left half of a decimal whose trailing digits moved to the next token.
    pub partial_decimal_pattern: &'static str,
    pub digits_pattern: &'static str,

    pub invoice_id_pattern: &'static str,
    pub harmonization_code_pattern: &'static str,
    pub customer_po_pattern: &'static str,

    pub pack_list_markers: &'static [&'static str],
    pub pack_list_column: &'static str,

    pub parts_markers: &'static [&'static str],
    pub parts_terminator: &'static str,
    /// Leading shipped-quantity residue on the part identifier token, in priority order.
    pub part_id_prefix_patterns: &'static [&'static str],
    pub currency_marker: char,

    pub shipping_markers: &'static [&'static str],

    pub address_markers: &'static [&'static str],
    pub address_terminator: &'static str,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            version: LAYOUT_VERSION,
            merge_rules: HEADER_MERGE_RULES,
            fused_token_pattern: r"^(\d+\.\d+)([A-Za-z0-9\-]+)$",
            partial_decimal_pattern: r"^\d+\.\d*$",
            digits_pattern: r"^\d+$",
            invoice_id_pattern: r"Invoice ID:\s*(\S+)",
            harmonization_code_pattern: r"Harmonization Code:\s*([\d\.]+)",
            customer_po_pattern: r"\b(45\d{8})\b",
            pack_list_markers: &["PACK", "LIST", "ID"],
            pack_list_column: "PACK LIST ID",
            parts_markers: &["PART ID", "DESCRIPTION"],
            parts_terminator: "Country MFG:",
            part_id_prefix_patterns: &[r"^\d+\.\d+", r"^SHIP\d+"],
            currency_marker: '$',
            shipping_markers: &["SHIP VIA", "SHIP DATE"],
            address_markers: &["BILL TO", "SHIP TO"],
            address_terminator: "PACK",
        }
    }
}

/// A [`Layout`] with its patterns compiled, built once per document.
#[derive(Debug, Clone)]
pub(crate) struct Rules<'a> {
    pub layout: &'a Layout,
    pub fused_token: Regex,
    pub partial_decimal: Regex,
    pub digits: Regex,
    pub invoice_id: Regex,
    pub harmonization_code: Regex,
    pub customer_po: Regex,
    pub part_id_prefixes: Vec<Regex>,
}

impl<'a> Rules<'a> {
    pub(crate) fn compile(layout: &'a Layout) -> Result<Self, ExtractError> {
        let part_id_prefixes = layout
            .part_id_prefix_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            layout,
            fused_token: Regex::new(layout.fused_token_pattern)?,
            partial_decimal: Regex::new(layout.partial_decimal_pattern)?,
            digits: Regex::new(layout.digits_pattern)?,
            invoice_id: Regex::new(layout.invoice_id_pattern)?,
            harmonization_code: Regex::new(layout.harmonization_code_pattern)?,
            customer_po: Regex::new(layout.customer_po_pattern)?,
            part_id_prefixes,
        })
    }
}
