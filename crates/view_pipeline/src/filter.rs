//! Filter criteria and the staged/applied filter pair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::domain::{Employee, Gender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryOrder {
    #[default]
    Unordered,
    Ascending,
    Descending,
}

impl SalaryOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Some(SalaryOrder::Unordered),
            "asc" | "ascending" => Some(SalaryOrder::Ascending),
            "desc" | "descending" => Some(SalaryOrder::Descending),
            _ => None,
        }
    }
}

/// User-chosen constraints on the employee list.
///
/// The default value constrains nothing: empty name, any gender, unordered, no date bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub name: String,
    pub gender: Option<Gender>,
    pub salary_order: SalaryOrder,
    pub hired_from: Option<NaiveDate>,
    pub hired_to: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        *self == FilterSpec::default()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.matches_name(employee) && self.matches_gender(employee) && self.matches_hire_date(employee)
    }

    fn predicates(&self) -> FilterSpec {
        FilterSpec {
            salary_order: SalaryOrder::Unordered,
            ..self.clone()
        }
    }

    fn matches_name(&self, employee: &Employee) -> bool {
        self.name.is_empty()
            || employee
                .name
                .to_lowercase()
                .contains(&self.name.to_lowercase())
    }

    fn matches_gender(&self, employee: &Employee) -> bool {
        self.gender.map_or(true, |gender| gender == employee.gender)
    }

    // Both bounds are inclusive.
    fn matches_hire_date(&self, employee: &Employee) -> bool {
        let after_start = self.hired_from.map_or(true, |from| employee.hired_on >= from);
        let before_end = self.hired_to.map_or(true, |to| employee.hired_on <= to);
        after_start && before_end
    }
}

/// Edits land in `staged`; only `apply` makes the predicates visible to derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    staged: FilterSpec,
    applied: Option<FilterSpec>,
}

impl FilterState {
    pub fn staged(&self) -> &FilterSpec {
        &self.staged
    }

    pub fn staged_mut(&mut self) -> &mut FilterSpec {
        &mut self.staged
    }

    pub fn applied(&self) -> Option<&FilterSpec> {
        self.applied.as_ref()
    }

    /// Sort order in effect; it does not wait for `apply`.
    pub fn salary_order(&self) -> SalaryOrder {
        self.staged.salary_order
    }

    pub fn is_active(&self) -> bool {
        self.applied.is_some()
    }

    /// Whether staged predicates differ from what derivation currently filters by.
    /// The salary order is ignored since it never waits for `apply`.
    pub fn has_pending_edits(&self) -> bool {
        let staged = self.staged.predicates();
        match &self.applied {
            Some(applied) => applied.predicates() != staged,
            None => !staged.is_empty(),
        }
    }

    pub fn apply(&mut self) {
        self.applied = Some(self.staged.clone());
    }

    pub fn clear(&mut self) {
        self.staged = FilterSpec::default();
        self.applied = None;
    }
}
