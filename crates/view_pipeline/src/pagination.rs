//! Page arithmetic and the navigation-bar model.

use serde::Serialize;

pub const PAGE_SIZE: usize = 8;

/// Number of leading page buttons shown before the ellipsis.
const LEADING_PAGE_BUTTONS: usize = 3;

/// Current 1-based page. Page size is fixed at [`PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::first()
    }
}

impl PageState {
    pub fn first() -> Self {
        Self { current: 1 }
    }

    /// Page numbers below 1 are treated as page 1.
    pub fn at(page: usize) -> Self {
        Self {
            current: page.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn offset(&self) -> usize {
        (self.current - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn go_to(&mut self, page: usize) {
        self.current = page.max(1);
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    /// Moves forward without passing `total_pages`.
    pub fn next(&mut self, total_pages: usize) {
        self.current = (self.current + 1).min(total_pages.max(1));
    }

    /// Pulls the page back inside `1..=total_pages`; an empty result keeps page 1.
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.current = self.current.min(total_pages.max(1));
    }
}

pub fn total_pages(total_items: usize) -> usize {
    total_items.div_ceil(PAGE_SIZE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub page: usize,
    pub active: bool,
}

/// Navigation bar: previous, up to three numbered pages, ellipsis, last page, next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerControls {
    pub previous_enabled: bool,
    pub numbered: Vec<PageButton>,
    pub ellipsis: bool,
    pub last: Option<PageButton>,
    pub next_enabled: bool,
}

impl PagerControls {
    pub fn new(current: usize, total_pages: usize) -> Self {
        let numbered = (1..=total_pages.min(LEADING_PAGE_BUTTONS))
            .map(|page| PageButton {
                page,
                active: page == current,
            })
            .collect();

        let (ellipsis, last) = if total_pages > LEADING_PAGE_BUTTONS {
            let ellipsis = current.saturating_add(2) < total_pages;
            let last = (current < total_pages).then_some(PageButton {
                page: total_pages,
                active: false,
            });
            (ellipsis, last)
        } else {
            (false, None)
        };

        Self {
            previous_enabled: current > 1,
            numbered,
            ellipsis,
            last,
            next_enabled: current < total_pages,
        }
    }
}

/// "Showing first to last of total" footer; absent when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShowingRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl ShowingRange {
    /// `None` when nothing matched or the page starts past the last item.
    pub fn new(page: PageState, total: usize) -> Option<Self> {
        if page.offset() >= total {
            return None;
        }
        Some(Self {
            first: page.offset() + 1,
            last: page.offset().saturating_add(PAGE_SIZE).min(total),
            total,
        })
    }
}
