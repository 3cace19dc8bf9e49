//! Employee form: closed, creating a new record, or editing an existing one.

use chrono::NaiveDate;
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId, Gender},
    error::ValidationError,
};

/// Raw form values. Salary stays text until submit so partial input can be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub position: String,
    pub salary: String,
    pub gender: Gender,
    pub hired_on: NaiveDate,
}

impl FormFields {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            position: String::new(),
            salary: String::new(),
            gender: Gender::Male,
            hired_on: today,
        }
    }

    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            position: employee.position.clone(),
            salary: employee.salary.to_string(),
            gender: employee.gender,
            hired_on: employee.hired_on,
        }
    }

    pub fn to_draft(&self) -> Result<EmployeeDraft, ValidationError> {
        let salary_text = self.salary.trim();
        let salary = salary_text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::InvalidSalary(salary_text.to_string()))?;

        let draft = EmployeeDraft {
            name: self.name.trim().to_string(),
            position: self.position.trim().to_string(),
            salary,
            gender: self.gender,
            hired_on: self.hired_on,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn apply(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Name(name) => self.name = name,
            FormEdit::Position(position) => self.position = position,
            FormEdit::Salary(salary) => self.salary = salary,
            FormEdit::Gender(gender) => self.gender = gender,
            FormEdit::HiredOn(hired_on) => self.hired_on = hired_on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    Name(String),
    Position(String),
    Salary(String),
    Gender(Gender),
    HiredOn(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(EmployeeDraft),
    Update { id: EmployeeId, draft: EmployeeDraft },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmployeeForm {
    #[default]
    Closed,
    Creating(FormFields),
    Editing {
        id: EmployeeId,
        fields: FormFields,
    },
}

impl EmployeeForm {
    pub fn creating(today: NaiveDate) -> Self {
        EmployeeForm::Creating(FormFields::blank(today))
    }

    pub fn editing(employee: &Employee) -> Self {
        EmployeeForm::Editing {
            id: employee.id().clone(),
            fields: FormFields::from_employee(employee),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EmployeeForm::Closed)
    }

    pub fn fields(&self) -> Option<&FormFields> {
        match self {
            EmployeeForm::Closed => None,
            EmployeeForm::Creating(fields) | EmployeeForm::Editing { fields, .. } => Some(fields),
        }
    }

    /// Returns false when the form is closed and the edit was dropped.
    pub fn edit(&mut self, edit: FormEdit) -> bool {
        match self {
            EmployeeForm::Closed => false,
            EmployeeForm::Creating(fields) | EmployeeForm::Editing { fields, .. } => {
                fields.apply(edit);
                true
            }
        }
    }

    /// `Ok(None)` when there is nothing to submit.
    pub fn submission(&self) -> Result<Option<Submission>, ValidationError> {
        match self {
            EmployeeForm::Closed => Ok(None),
            EmployeeForm::Creating(fields) => Ok(Some(Submission::Create(fields.to_draft()?))),
            EmployeeForm::Editing { id, fields } => Ok(Some(Submission::Update {
                id: id.clone(),
                draft: fields.to_draft()?,
            })),
        }
    }

    pub fn close(&mut self) {
        *self = EmployeeForm::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).expect("date")
    }

    #[test]
    fn creating_starts_blank_male_and_today() {
        let form = EmployeeForm::creating(today());
        let fields = form.fields().expect("open form");
        assert!(fields.name.is_empty());
        assert!(fields.salary.is_empty());
        assert_eq!(fields.gender, Gender::Male);
        assert_eq!(fields.hired_on, today());
    }

    #[test]
    fn editing_prepopulates_from_employee() {
        let employee = Employee::from_draft(
            EmployeeId::new("e1"),
            EmployeeDraft {
                name: "Ana".to_string(),
                position: "Lead".to_string(),
                salary: 1250.5,
                gender: Gender::Female,
                hired_on: NaiveDate::from_ymd_opt(2020, 1, 1).expect("date"),
            },
        );

        let form = EmployeeForm::editing(&employee);
        let Some(Submission::Update { id, draft }) = form.submission().expect("valid") else {
            panic!("editing form must submit an update");
        };
        assert_eq!(id.as_str(), "e1");
        assert_eq!(draft, employee.to_draft());
    }

    #[test]
    fn blank_salary_is_rejected_on_submit() {
        let mut form = EmployeeForm::creating(today());
        form.edit(FormEdit::Name("Ana".to_string()));
        form.edit(FormEdit::Position("Lead".to_string()));

        assert_eq!(
            form.submission(),
            Err(ValidationError::InvalidSalary(String::new()))
        );

        form.edit(FormEdit::Salary("NaN".to_string()));
        assert_eq!(
            form.submission(),
            Err(ValidationError::InvalidSalary("NaN".to_string()))
        );
    }

    #[test]
    fn complete_create_form_yields_trimmed_draft() {
        let mut form = EmployeeForm::creating(today());
        form.edit(FormEdit::Name("  Ana  ".to_string()));
        form.edit(FormEdit::Position("Lead".to_string()));
        form.edit(FormEdit::Salary(" 900 ".to_string()));
        form.edit(FormEdit::Gender(Gender::Female));

        let Ok(Some(Submission::Create(draft))) = form.submission() else {
            panic!("expected create submission");
        };
        assert_eq!(draft.name, "Ana");
        assert_eq!(draft.salary, 900.0);
        assert_eq!(draft.gender, Gender::Female);
    }

    #[test]
    fn closed_form_ignores_edits_and_submits_nothing() {
        let mut form = EmployeeForm::Closed;
        assert!(!form.edit(FormEdit::Name("x".to_string())));
        assert_eq!(form.submission(), Ok(None));

        let mut open = EmployeeForm::creating(today());
        open.close();
        assert!(!open.is_open());
    }
}
