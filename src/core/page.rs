//! Paginated result set returned by repository implementations

/// One page of entities plus the pagination metadata needed to build a
/// response envelope.
///
/// Invariants: `items.len() <= per_page` and
/// `total_pages() == ceil(total / per_page)`.
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    /// Entities on this page, in repository order
    pub items: Vec<T>,

    /// Total number of entities across all pages (after filters)
    pub total: usize,

    /// Number of entities per page
    pub per_page: usize,

    /// Current page number (starts at 1)
    pub current_page: usize,
}

impl<T> PageResult<T> {
    /// Slice a full, ordered collection into one page.
    ///
    /// `per_page` of 0 is passed through; the envelope builder rejects it.
    pub fn slice(all: Vec<T>, per_page: usize, current_page: usize) -> Self {
        let total = all.len();
        let start = current_page.saturating_sub(1).saturating_mul(per_page.max(1));
        let items: Vec<T> = all
            .into_iter()
            .skip(start)
            .take(per_page)
            .collect();

        Self {
            items,
            total,
            per_page,
            current_page,
        }
    }

    /// Total number of pages, ceiling division; 0 when the set is empty
    pub fn total_pages(&self) -> usize {
        if self.total == 0 || self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}
