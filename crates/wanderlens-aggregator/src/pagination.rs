//! Pure pagination windows over the ranked image list.

/// A half-open slice window `[start, end)` into a list of `total` items.
///
/// Invariant: `0 <= start <= end <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub has_more: bool,
}

/// Computes the slice window for a 1-based `page` of `per_page` items.
///
/// Pages past the end produce an empty window (`start == end == total`).
/// `has_more` is true iff `page * per_page < total`. Callers are expected to
/// normalize `page >= 1` and `per_page >= 1`; values of 0 are treated as 1.
#[must_use]
pub fn page_window(total: usize, page: usize, per_page: usize) -> PageWindow {
    let page = page.max(1);
    let per_page = per_page.max(1);

    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);

    PageWindow {
        start,
        end,
        has_more: end < total,
    }
}
