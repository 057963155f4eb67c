use tracing::debug;

use crate::header::{has_markers, locate_header};
use crate::layout::Rules;

/// Raw parts-table rows collected below the header on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowSpan {
    pub header_index: usize,
    pub rows: Vec<String>,
    /// The terminator marker closed the table on this page.
    pub terminated: bool,
}

/// Cheap check for a parts header anywhere in `text`, without collecting rows.
pub(crate) fn has_parts_header(text: &str, rules: &Rules<'_>) -> bool {
    text.lines()
        .any(|line| has_markers(line, rules.layout.parts_markers))
}

/// Collects the lines between the parts header and the terminator marker.
///
/// A line holding only digits is a quantity the extractor pushed onto its
/// own line, so it is glued back onto the previous row.
pub(crate) fn collect_part_rows(lines: &[&str], rules: &Rules<'_>) -> Option<RowSpan> {
    let layout = rules.layout;
    let header = locate_header(lines, layout.parts_markers)?;

    let mut rows: Vec<String> = Vec::new();
    let mut terminated = false;
    for line in &lines[header.index + 1..] {
        if line.contains(layout.parts_terminator) {
            terminated = true;
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if rules.digits.is_match(line) {
            match rows.last_mut() {
                Some(previous) => {
                    previous.push(' ');
                    previous.push_str(line);
                }
                None => debug!(line, "dropping numeric continuation with no row above"),
            }
            continue;
        }

        rows.push(line.to_string());
    }

    Some(RowSpan {
        header_index: header.index,
        rows,
        terminated,
    })
}
