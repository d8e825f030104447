//! Cursor-driven pagination over an in-memory [`Dataset`].
use std::num::NonZeroUsize;

use thiserror::Error;

use crate::record::{Dataset, Record};

/// The (current page, rows per page) pair that drives slicing.
///
/// `current_page` is 1-based and always within `1..=page_count` of the
/// dataset it was last validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    current_page: usize,
    rows_per_page: NonZeroUsize,
}

impl Cursor {
    fn first_page(rows_per_page: NonZeroUsize) -> Self {
        Self {
            current_page: 1,
            rows_per_page,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> NonZeroUsize {
        self.rows_per_page
    }
}

/// A visible slice of the dataset plus navigation metadata.
///
/// Derived on demand; it borrows the dataset and cannot outlive the next
/// cursor change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView<'a> {
    pub rows: &'a [Record],
    /// Zero-based index of `rows[0]` within the dataset.
    pub row_index_offset: usize,
    pub page_count: usize,
    pub current_page: usize,
    pub rows_per_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page {requested} does not exist (valid pages are {min}..={max})")]
pub struct PageRangeError {
    pub requested: usize,
    pub min: usize,
    pub max: usize,
}

/// Number of pages needed to show `len` rows; an empty dataset still has one page.
pub fn page_count(len: usize, rows_per_page: NonZeroUsize) -> usize {
    len.div_ceil(rows_per_page.get()).max(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paginator {
    dataset: Dataset,
    cursor: Cursor,
}

impl Paginator {
    pub fn new(rows_per_page: NonZeroUsize) -> Self {
        Self {
            dataset: Dataset::empty(),
            cursor: Cursor::first_page(rows_per_page),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn page_count(&self) -> usize {
        page_count(self.dataset.len(), self.cursor.rows_per_page)
    }

    /// Installs a new dataset and returns to page 1, keeping the page size.
    pub fn seed(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.cursor = Cursor::first_page(self.cursor.rows_per_page);
    }

    pub fn compute_view(&self) -> PageView<'_> {
        let records = self.dataset.records();
        let per_page = self.cursor.rows_per_page.get();
        let page_count = self.page_count();
        let current_page = self.cursor.current_page;

        let start = (current_page - 1)
            .saturating_mul(per_page)
            .min(records.len());
        let end = start.saturating_add(per_page).min(records.len());

        PageView {
            rows: &records[start..end],
            row_index_offset: start,
            page_count,
            current_page,
            rows_per_page: per_page,
            has_prev: current_page > 1,
            has_next: current_page < page_count,
        }
    }

    /// Moves to `page`, or leaves the cursor untouched and reports the valid range.
    pub fn go_to_page(&mut self, page: usize) -> Result<PageView<'_>, PageRangeError> {
        let max = self.page_count();
        if !(1..=max).contains(&page) {
            return Err(PageRangeError {
                requested: page,
                min: 1,
                max,
            });
        }
        self.cursor.current_page = page;
        Ok(self.compute_view())
    }

    pub fn next_page(&mut self) -> PageView<'_> {
        if self.cursor.current_page < self.page_count() {
            self.cursor.current_page += 1;
        }
        self.compute_view()
    }

    pub fn prev_page(&mut self) -> PageView<'_> {
        if self.cursor.current_page > 1 {
            self.cursor.current_page -= 1;
        }
        self.compute_view()
    }

    /// Changes the page size. Navigation restarts at page 1.
    pub fn set_rows_per_page(&mut self, rows_per_page: NonZeroUsize) -> PageView<'_> {
        self.cursor = Cursor::first_page(rows_per_page);
        self.compute_view()
    }
}
