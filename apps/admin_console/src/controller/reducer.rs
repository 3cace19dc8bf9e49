//! Single-owner application state and the transitions that mutate it.
//!
//! Every user action and backend event flows through [`update`] or [`handle_event`];
//! both return the backend commands the transition requires.

use chrono::NaiveDate;
use shared::domain::{Employee, EmployeeId, Gender};
use tracing::{debug, info, warn};
use view_pipeline::{derive, FilterState, PageState, PageView, SalaryOrder};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::form::{EmployeeForm, FormEdit, Submission};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load,
    StageName(String),
    StageGender(Option<Gender>),
    StageSalaryOrder(SalaryOrder),
    StageHiredFrom(Option<NaiveDate>),
    StageHiredTo(Option<NaiveDate>),
    ApplyFilters,
    ClearFilters,
    GoToPage(usize),
    PreviousPage,
    NextPage,
    LastPage,
    OpenCreate { today: NaiveDate },
    OpenEdit(EmployeeId),
    EditForm(FormEdit),
    SubmitForm,
    CancelForm,
    Delete(EmployeeId),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub filters: FilterState,
    pub page: PageState,
    pub form: EmployeeForm,
    pub saving: bool,
    pub last_error: Option<UiError>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            loading: true,
            filters: FilterState::default(),
            page: PageState::first(),
            form: EmployeeForm::Closed,
            saving: false,
            last_error: None,
            status: String::new(),
        }
    }
}

impl AppState {
    pub fn view(&self) -> PageView<'_> {
        derive(
            &self.employees,
            self.filters.applied(),
            self.filters.salary_order(),
            self.page,
        )
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    fn stage(&mut self, edit: impl FnOnce(&mut view_pipeline::FilterSpec)) {
        edit(self.filters.staged_mut());
        self.page.reset();
    }
}

pub fn update(state: &mut AppState, action: Action) -> Vec<BackendCommand> {
    match action {
        Action::Load => {
            state.loading = true;
            vec![BackendCommand::FetchAll]
        }
        Action::StageName(name) => {
            state.stage(|spec| spec.name = name);
            Vec::new()
        }
        Action::StageGender(gender) => {
            state.stage(|spec| spec.gender = gender);
            Vec::new()
        }
        Action::StageSalaryOrder(order) => {
            state.stage(|spec| spec.salary_order = order);
            Vec::new()
        }
        Action::StageHiredFrom(date) => {
            state.stage(|spec| spec.hired_from = date);
            Vec::new()
        }
        Action::StageHiredTo(date) => {
            state.stage(|spec| spec.hired_to = date);
            Vec::new()
        }
        Action::ApplyFilters => {
            state.filters.apply();
            state.page.reset();
            debug!(filter = ?state.filters.applied(), "applied filters");
            Vec::new()
        }
        Action::ClearFilters => {
            state.filters.clear();
            state.page.reset();
            Vec::new()
        }
        Action::GoToPage(page) => {
            let total_pages = state.view().total_pages;
            state.page.go_to(page);
            state.page.clamp_to(total_pages);
            Vec::new()
        }
        Action::PreviousPage => {
            state.page.previous();
            Vec::new()
        }
        Action::NextPage => {
            let total_pages = state.view().total_pages;
            state.page.next(total_pages);
            Vec::new()
        }
        Action::LastPage => {
            let total_pages = state.view().total_pages;
            state.page.go_to(total_pages);
            Vec::new()
        }
        Action::OpenCreate { today } => {
            state.form = EmployeeForm::creating(today);
            state.last_error = None;
            Vec::new()
        }
        Action::OpenEdit(id) => {
            match state.find(&id).map(EmployeeForm::editing) {
                Some(form) => {
                    state.form = form;
                    state.last_error = None;
                }
                None => state.status = format!("No employee with id {id}"),
            }
            Vec::new()
        }
        Action::EditForm(edit) => {
            if !state.form.edit(edit) {
                state.status = "No form is open".to_string();
            }
            Vec::new()
        }
        Action::SubmitForm => submit_form(state),
        Action::CancelForm => {
            state.form.close();
            state.saving = false;
            Vec::new()
        }
        Action::Delete(id) => {
            state.status = format!("Deleting employee {id}...");
            vec![BackendCommand::Delete { id }]
        }
    }
}

fn submit_form(state: &mut AppState) -> Vec<BackendCommand> {
    if state.saving {
        return Vec::new();
    }
    match state.form.submission() {
        Ok(Some(Submission::Create(draft))) => {
            state.saving = true;
            vec![BackendCommand::Create { draft }]
        }
        Ok(Some(Submission::Update { id, draft })) => {
            state.saving = true;
            vec![BackendCommand::Update { id, draft }]
        }
        Ok(None) => {
            state.status = "No form is open".to_string();
            Vec::new()
        }
        Err(err) => {
            warn!("employee form rejected: {err}");
            state.status = format!("Cannot save: {err}");
            state.last_error = Some(UiError::from_validation(&err));
            Vec::new()
        }
    }
}

pub fn handle_event(state: &mut AppState, event: UiEvent) -> Vec<BackendCommand> {
    match event {
        UiEvent::EmployeesLoaded(employees) => {
            state.employees = employees;
            state.loading = false;
            let total_pages = state.view().total_pages;
            state.page.clamp_to(total_pages);
            Vec::new()
        }
        UiEvent::EmployeeSaved(employee) => {
            info!(employee_id = %employee.id(), "employee saved");
            state.saving = false;
            state.form.close();
            state.last_error = None;
            state.status = format!("Saved {}", employee.name);
            vec![BackendCommand::FetchAll]
        }
        UiEvent::EmployeeDeleted(id) => {
            state.status = format!("Deleted employee {id}");
            vec![BackendCommand::FetchAll]
        }
        UiEvent::Error(err) => {
            match err.context() {
                UiErrorContext::SaveEmployee => {
                    warn!("error saving employee: {}", err.message());
                    state.saving = false;
                    state.status = "Save failed; the form is still open".to_string();
                }
                UiErrorContext::DeleteEmployee => {
                    warn!("error deleting employee: {}", err.message());
                    state.status = "Delete failed".to_string();
                }
                UiErrorContext::BackendStartup | UiErrorContext::General => {
                    warn!("backend error: {}", err.message());
                    state.loading = false;
                    state.status = err.message().to_string();
                }
            }
            state.last_error = Some(err);
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
