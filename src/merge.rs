//! Folding per-page findings into one [`InvoiceRecord`].
//!
//! Scalars keep the first value seen. Parts tables are cumulative: every
//! page's rows are appended in page order, so only a later parts table can
//! change a record whose scalars are all set.

use crate::fields;
use crate::layout::Rules;
use crate::model::{InvoiceRecord, PageText, PartRecord};
use crate::shipping;
use crate::table_parse::extract_parts;

/// Everything the extractors found on a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFindings {
    pub page_number: u32,
    pub invoice_id: Option<String>,
    pub pack_list_id: Option<String>,
    pub harmonization_code: Option<String>,
    pub customer_po: Option<String>,
    pub shipping_method: Option<String>,
    pub ship_date: Option<String>,
    pub order_date: Option<String>,
    pub ship_to_address: Option<String>,
    pub parts: Vec<PartRecord>,
    pub parts_terminated: bool,
    pub malformed_rows: Vec<String>,
}

pub(crate) fn scan_page(page: &PageText, rules: &Rules<'_>) -> PageFindings {
    let text = page.text.as_str();
    let lines = text.lines().collect::<Vec<_>>();
    let ship_via = shipping::shipping(&lines, rules.layout);
    let parts = extract_parts(&lines, rules);

    PageFindings {
        page_number: page.page_number,
        invoice_id: fields::invoice_id(text, rules),
        pack_list_id: fields::pack_list_id(&lines, rules),
        harmonization_code: fields::harmonization_code(text, rules),
        customer_po: fields::customer_po(text, rules),
        shipping_method: ship_via.method,
        ship_date: ship_via.ship_date,
        order_date: ship_via.order_date,
        ship_to_address: shipping::ship_to_address(&lines, rules.layout),
        parts: parts.parts,
        parts_terminated: parts.terminated,
        malformed_rows: parts.malformed_rows,
    }
}

fn keep_first(current: Option<String>, found: Option<String>) -> Option<String> {
    current.or(found)
}

fn always_append(mut parts: Vec<PartRecord>, found: Vec<PartRecord>) -> Vec<PartRecord> {
    parts.extend(found);
    parts
}

impl InvoiceRecord {
    /// Returns the record with one page's findings folded in.
    #[must_use]
    pub fn absorb(self, page: PageFindings) -> Self {
        Self {
            invoice_id: keep_first(self.invoice_id, page.invoice_id),
            pack_list_id: keep_first(self.pack_list_id, page.pack_list_id),
            harmonization_code: keep_first(self.harmonization_code, page.harmonization_code),
            customer_po: keep_first(self.customer_po, page.customer_po),
            shipping_method: keep_first(self.shipping_method, page.shipping_method),
            ship_date: keep_first(self.ship_date, page.ship_date),
            order_date: keep_first(self.order_date, page.order_date),
            ship_to_address: keep_first(self.ship_to_address, page.ship_to_address),
            parts: always_append(self.parts, page.parts),
        }
    }

    /// Every scalar is set and at least one part row exists.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().next().is_none() && !self.parts.is_empty()
    }
}
