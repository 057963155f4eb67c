use std::collections::BTreeSet;
use std::str::FromStr;

use crate::layout::Layout;

/// 1-based pages to scan, parsed from strings like `1-3,5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn parse_page(value: &str, what: &str) -> Result<u32, String> {
    let page: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{}'", value.trim()))?;
    if page == 0 {
        return Err("pages are 1-based".to_string());
    }
    Ok(page)
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for part in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page(start, "page range start")?;
                    let end = parse_page(end, "page range end")?;
                    if end < start {
                        return Err(format!("invalid range '{part}': end is smaller than start"));
                    }
                    pages.extend(start..=end);
                }
                None => {
                    pages.insert(parse_page(part, "page number")?);
                }
            }
        }

        if pages.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }
        Ok(Self { pages })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    /// Stop scanning once the record is complete.
    pub early_exit: bool,
    pub layout: Layout,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            early_exit: true,
            layout: Layout::default(),
        }
    }
}
