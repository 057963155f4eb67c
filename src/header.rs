use crate::layout::MergeRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderMatch<'a> {
    pub index: usize,
    pub header: &'a str,
    pub data: Option<&'a str>,
}

pub(crate) fn has_markers(line: &str, markers: &[&str]) -> bool {
    markers.iter().all(|marker| line.contains(marker))
}

/// Every line holding all `markers`, in page order, each paired with the
/// line directly below it. A blank or header line there means no data.
pub(crate) fn locate_headers<'a>(
    lines: &'a [&'a str],
    markers: &'a [&'a str],
) -> impl Iterator<Item = HeaderMatch<'a>> + 'a {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| has_markers(line, markers))
        .map(move |(index, &header)| HeaderMatch {
            index,
            header,
            data: lines
                .get(index + 1)
                .copied()
                .filter(|line| !line.trim().is_empty() && !has_markers(line, markers)),
        })
}

pub(crate) fn locate_header<'a>(
    lines: &'a [&'a str],
    markers: &'a [&'a str],
) -> Option<HeaderMatch<'a>> {
    locate_headers(lines, markers).next()
}

/// Greedy left-to-right merge of raw header tokens into logical columns.
pub(crate) fn merge_header_tokens(tokens: &[String], rules: &[MergeRule]) -> Vec<String> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut index = 0;
    while index < tokens.len() {
        if let Some(rule) = rules.iter().find(|rule| rule.matches_at(tokens, index)) {
            merged.push(rule.label.to_string());
            index += rule.parts.len();
        } else {
            merged.push(tokens[index].clone());
            index += 1;
        }
    }
    merged
}

pub(crate) fn column_index(columns: &[String], label: &str) -> Option<usize> {
    columns.iter().position(|column| column == label)
}
