//! Paginated search result list with cursor navigation.
//!
//! Backs the result dropdown: the session fills it on every search and hides
//! it whenever navigation gets locked or a result is picked.

use std::ops::Range;

use crate::search::SearchHit;

/// Search hits split into pages, with a highlighted row.
#[derive(Debug, Clone)]
pub struct ResultList {
    /// All hits of the last search
    hits: Vec<SearchHit>,

    /// Number of hits per page
    page_size: usize,

    /// Current page index (0-based)
    current_page: usize,

    /// Highlighted row within the current page (0-based)
    cursor: usize,

    /// Whether the dropdown is shown
    visible: bool,
}

impl ResultList {
    pub fn new() -> Self {
        Self::with_page_size(10)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            hits: Vec::new(),
            page_size: page_size.max(1),
            current_page: 0,
            cursor: 0,
            visible: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the hits and show the list, resetting pagination.
    ///
    /// An empty list is still shown so the front end can render a
    /// "no matching words" row.
    pub fn set_hits(&mut self, hits: Vec<SearchHit>) {
        self.hits = hits;
        self.current_page = 0;
        self.cursor = 0;
        self.visible = true;
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide the dropdown, keeping its contents.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn num_pages(&self) -> usize {
        self.hits.len().div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn current_page_range(&self) -> Range<usize> {
        let start = self.current_page * self.page_size;
        let end = (start + self.page_size).min(self.hits.len());
        start.min(end)..end
    }

    fn current_page_len(&self) -> usize {
        self.current_page_range().len()
    }

    pub fn current_page_hits(&self) -> &[SearchHit] {
        &self.hits[self.current_page_range()]
    }

    /// The highlighted hit.
    pub fn selected_hit(&self) -> Option<&SearchHit> {
        self.current_page_hits().get(self.cursor)
    }

    /// Move the highlight up. Returns true if it moved.
    pub fn cursor_up(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Move the highlight down. Returns true if it moved.
    pub fn cursor_down(&mut self) -> bool {
        if self.cursor + 1 < self.current_page_len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn page_up(&mut self) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.current_page -= 1;
        self.clamp_cursor();
        true
    }

    pub fn page_down(&mut self) -> bool {
        if self.current_page + 1 >= self.num_pages() {
            return false;
        }
        self.current_page += 1;
        self.clamp_cursor();
        true
    }

    /// Highlight a row of the current page and return its hit.
    pub fn select_by_index(&mut self, page_index: usize) -> Option<&SearchHit> {
        if page_index < self.current_page_len() {
            self.cursor = page_index;
            self.selected_hit()
        } else {
            None
        }
    }

    /// Drop all hits and hide.
    pub fn clear(&mut self) {
        self.hits.clear();
        self.current_page = 0;
        self.cursor = 0;
        self.visible = false;
    }

    fn clamp_cursor(&mut self) {
        let len = self.current_page_len();
        if len > 0 && self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

impl Default for ResultList {
    fn default() -> Self {
        Self::new()
    }
}
