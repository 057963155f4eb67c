use tracing::trace;

use crate::header::{has_markers, locate_header};
use crate::layout::Layout;
use crate::tokens::tokenize;

const MIN_SHIPPING_TOKENS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShippingInfo {
    pub method: Option<String>,
    pub order_date: Option<String>,
    pub ship_date: Option<String>,
}

/// Reads the ship-via row: two fixed ids, a free-width method, then two dates.
pub(crate) fn shipping(lines: &[&str], layout: &Layout) -> ShippingInfo {
    let Some(data) = locate_header(lines, layout.shipping_markers).and_then(|found| found.data)
    else {
        return ShippingInfo::default();
    };

    let tokens = tokenize(data);
    if tokens.len() < MIN_SHIPPING_TOKENS {
        trace!(tokens = tokens.len(), "shipping row too short");
        return ShippingInfo::default();
    }

    let dates = tokens.len() - 2;
    ShippingInfo {
        method: Some(tokens[2..dates].join(" ")),
        order_date: Some(tokens[dates].clone()),
        ship_date: Some(tokens[dates + 1].clone()),
    }
}

/// One line of the side-by-side bill-to / ship-to block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressLine {
    /// Even token count: the left half is bill-to, the right half ship-to.
    Split { bill_to: String, ship_to: String },
    /// Odd token count: the columns cannot be told apart, kept as-is.
    Verbatim(String),
}

impl AddressLine {
    #[must_use]
    pub fn classify(line: &str) -> Self {
        let tokens = tokenize(line);
        if tokens.len() % 2 == 0 {
            let (bill_to, ship_to) = tokens.split_at(tokens.len() / 2);
            Self::Split {
                bill_to: bill_to.join(" "),
                ship_to: ship_to.join(" "),
            }
        } else {
            Self::Verbatim(tokens.join(" "))
        }
    }

    #[must_use]
    pub fn ship_to(&self) -> &str {
        match self {
            Self::Split { ship_to, .. } => ship_to,
            Self::Verbatim(line) => line,
        }
    }
}

pub(crate) fn address_lines(lines: &[&str], layout: &Layout) -> Vec<AddressLine> {
    let Some(header) = locate_header(lines, layout.address_markers) else {
        return Vec::new();
    };

    lines[header.index + 1..]
        .iter()
        .take_while(|line| {
            !line.trim().is_empty()
                && !tokenize(line)
                    .iter()
                    .any(|token| token == layout.address_terminator)
        })
        .filter(|line| !has_markers(line, layout.address_markers))
        .map(|line| AddressLine::classify(line))
        .collect()
}

pub(crate) fn ship_to_address(lines: &[&str], layout: &Layout) -> Option<String> {
    let block = address_lines(lines, layout);
    if block.is_empty() {
        return None;
    }

    Some(
        block
            .iter()
            .map(AddressLine::ship_to)
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
