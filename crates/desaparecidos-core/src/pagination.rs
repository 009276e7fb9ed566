//! Pager windowing for the roster.
//!
//! The pager always shows the first and last page plus every page within
//! [`WINDOW_RADIUS`] of the current one. Page indices are zero-based.

/// Pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    pub current: u32,
    pub total_pages: u32,
}

impl Pager {
    pub fn new(current: u32, total_pages: u32) -> Self {
        Self {
            current,
            total_pages,
        }
    }

    /// A pager is only rendered when there is at least one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 0
    }

    /// Page indices to render, ascending and without duplicates.
    pub fn window(&self) -> Vec<u32> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        let last = self.total_pages - 1;
        let lo = self.current.saturating_sub(WINDOW_RADIUS).min(last);
        let hi = self.current.saturating_add(WINDOW_RADIUS).min(last);
        let mut pages = vec![0];
        pages.extend((lo..=hi).filter(|&i| i != 0 && i != last));
        if last != 0 {
            pages.push(last);
        }
        pages
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.current < self.total_pages - 1
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }
}
