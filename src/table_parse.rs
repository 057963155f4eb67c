use tracing::{debug, trace};

use crate::layout::Rules;
use crate::model::PartRecord;
use crate::table_detect::collect_part_rows;
use crate::tokens::tokenize;

pub(crate) const MIN_ROW_TOKENS: usize = 3;

/// Parts found on a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PageParts {
    pub parts: Vec<PartRecord>,
    pub malformed_rows: Vec<String>,
    pub terminated: bool,
}

/// Drops the shipped-quantity residue fused onto the front of the part id.
pub(crate) fn strip_part_prefix<'t>(token: &'t str, rules: &Rules<'_>) -> &'t str {
    rules
        .part_id_prefixes
        .iter()
        .filter_map(|prefix| prefix.find(token))
        .filter(|found| found.start() == 0)
        .map(|found| &token[found.end()..])
        .find(|rest| !rest.is_empty())
        .unwrap_or(token)
}

/// Splits one collected row into a part, or `None` when it is too short to be data.
pub(crate) fn parse_part_row(row: &str, rules: &Rules<'_>) -> Option<PartRecord> {
    let tokens = tokenize(row);
    if tokens.len() < MIN_ROW_TOKENS {
        return None;
    }

    let currency = rules.layout.currency_marker;
    let rest = &tokens[2..];
    let price_start = rest
        .iter()
        .position(|token| token.starts_with(currency))
        .unwrap_or(rest.len());

    let description = rest[..price_start].join(" ");
    let mut prices = rest[price_start..]
        .iter()
        .filter(|token| token.starts_with(currency))
        .cloned();

    Some(PartRecord {
        part_id: strip_part_prefix(&tokens[1], rules).to_string(),
        description,
        unit_price: prices.next(),
        extended_price: prices.next(),
    })
}

pub(crate) fn extract_parts(lines: &[&str], rules: &Rules<'_>) -> PageParts {
    let Some(span) = collect_part_rows(lines, rules) else {
        return PageParts::default();
    };

    let mut page = PageParts {
        terminated: span.terminated,
        ..PageParts::default()
    };
    for row in span.rows {
        match parse_part_row(&row, rules) {
            Some(part) => {
                trace!(part_id = %part.part_id, "parsed part row");
                page.parts.push(part);
            }
            None => {
                debug!(row = %row, "skipping row with too few tokens");
                page.malformed_rows.push(row);
            }
        }
    }
    page
}
