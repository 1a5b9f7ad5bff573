//! Fixed-size paging over catalog results.

use serde::Serialize;

/// Cards per page.
pub const PER_PAGE: usize = 20;

/// One window over a result list. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPage<T> {
    pub cards: Vec<T>,
    pub total: usize,
    /// The requested page after defaulting (1-indexed).
    pub page: i64,
    pub page_count: usize,
    pub per_page: usize,
}

/// Interpret a raw `page` query value.
///
/// Absent, unparsable or zero values default to page 1. Negative values are
/// kept and produce an empty page.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|r| r.trim().parse::<i64>().ok())
        .filter(|p| *p != 0)
        .unwrap_or(1)
}

/// Slice `items` into page `page`.
///
/// Out-of-range pages yield an empty list, never an error. `total`,
/// `page_count` and `per_page` are the same for every page of a list.
pub fn paginate<T>(items: Vec<T>, page: i64) -> CardPage<T> {
    let total = items.len();
    let page_count = total.div_ceil(PER_PAGE);

    let cards = if page >= 1 && (page as u64) <= page_count as u64 {
        let start = (page as usize - 1) * PER_PAGE;
        items.into_iter().skip(start).take(PER_PAGE).collect()
    } else {
        Vec::new()
    };

    CardPage {
        cards,
        total,
        page,
        page_count,
        per_page: PER_PAGE,
    }
}
