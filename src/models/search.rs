use crate::types::RecipeSummary;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

/// Pagination controls rendered under a page of results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageButtons {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl SearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
        }
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        self.results.len().div_ceil(page_size.max(1))
    }

    /// Results for a 1-based page. Empty when the page is out of range.
    pub fn page(&self, page: usize, page_size: usize) -> &[RecipeSummary] {
        let page_size = page_size.max(1);
        let start = page.saturating_sub(1).saturating_mul(page_size);
        if page == 0 || start >= self.results.len() {
            return &[];
        }
        let end = (start + page_size).min(self.results.len());
        &self.results[start..end]
    }

    pub fn buttons(&self, page: usize, page_size: usize) -> PageButtons {
        let pages = self.page_count(page_size);
        PageButtons {
            prev: (page > 1 && page <= pages).then(|| page - 1),
            next: (page >= 1 && page < pages).then(|| page + 1),
        }
    }
}
