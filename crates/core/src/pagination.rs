//! Page slicing of the catalog.
//!
//! Pages are 1-based. The only state is the current page number; the page
//! count and the visible slice are derived from the item count and the fixed
//! page size.

use std::ops::RangeInclusive;

/// Products shown per catalog page.
pub const PAGE_SIZE: usize = 6;

/// Pagination view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_items: usize,
    page_size: usize,
    current_page: usize,
}

impl Pagination {
    /// Pagination over `total_items` with the default page size, on page 1.
    #[must_use]
    pub const fn new(total_items: usize) -> Self {
        Self::with_page_size(total_items, PAGE_SIZE)
    }

    /// Pagination with an explicit page size. A page size of 0 is treated as 1.
    #[must_use]
    pub const fn with_page_size(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: if page_size == 0 { 1 } else { page_size },
            current_page: 1,
        }
    }

    /// Set the current page. No clamping is done: an out-of-range page simply
    /// shows nothing.
    pub const fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Builder form of [`Self::set_page`].
    #[must_use]
    pub const fn on_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total_items / page_size)`.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Page numbers for the pagination controls.
    #[must_use]
    pub const fn pages(&self) -> RangeInclusive<usize> {
        1..=self.page_count()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1 && self.current_page <= self.page_count()
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page >= 1 && self.current_page < self.page_count()
    }

    /// The items on the current page, cut short at the end of `items`.
    #[must_use]
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(start) = self
            .current_page
            .checked_sub(1)
            .map(|p| p.saturating_mul(self.page_size))
        else {
            return &[];
        };
        let end = start.saturating_add(self.page_size).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }
}
