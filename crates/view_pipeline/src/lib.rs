//! Filter, sort and paginate the in-memory employee collection.

use serde::Serialize;
use shared::domain::Employee;

pub mod filter;
pub mod pagination;

pub use filter::{FilterSpec, FilterState, SalaryOrder};
pub use pagination::{
    total_pages, PageButton, PageState, PagerControls, ShowingRange, PAGE_SIZE,
};

/// One derived page of the employee list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<'a> {
    pub items: Vec<&'a Employee>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl PageView<'_> {
    pub fn pager(&self) -> PagerControls {
        PagerControls::new(self.page, self.total_pages)
    }

    pub fn showing(&self) -> Option<ShowingRange> {
        ShowingRange::new(PageState::at(self.page), self.total_filtered)
    }
}

/// Filters (when a filter is applied), sorts by `salary_order`, then slices one page.
///
/// The salary order is taken separately from the applied filter: it follows the current
/// selection whether or not filtering is active. Sorting is stable, so ties and unordered
/// output keep collection order. A page past the end yields no items; clamping is left to
/// the caller.
pub fn derive<'a>(
    collection: &'a [Employee],
    applied: Option<&FilterSpec>,
    salary_order: SalaryOrder,
    page: PageState,
) -> PageView<'a> {
    let mut working: Vec<&Employee> = match applied {
        Some(spec) => collection.iter().filter(|e| spec.matches(e)).collect(),
        None => collection.iter().collect(),
    };

    match salary_order {
        SalaryOrder::Ascending => working.sort_by(|a, b| a.salary.total_cmp(&b.salary)),
        SalaryOrder::Descending => working.sort_by(|a, b| b.salary.total_cmp(&a.salary)),
        SalaryOrder::Unordered => {}
    }

    let total_filtered = working.len();
    let items = working
        .into_iter()
        .skip(page.offset())
        .take(PAGE_SIZE)
        .collect();

    PageView {
        items,
        total_filtered,
        total_pages: total_pages(total_filtered),
        page: page.current(),
    }
}
