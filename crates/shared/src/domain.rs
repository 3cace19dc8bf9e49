use std::fmt;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{error::ValidationError, protocol};

/// Server-assigned identifier of a persisted employee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Accepts the wire codes (`M`/`F`) and the English words, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Employee fields without an identifier: what gets sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "posicion")]
    pub position: String,
    #[serde(rename = "salario", deserialize_with = "protocol::salary::deserialize")]
    pub salary: f64,
    #[serde(rename = "sexo")]
    pub gender: Gender,
    #[serde(rename = "fechaIngreso", with = "protocol::hire_date")]
    pub hired_on: NaiveDate,
}

impl EmployeeDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.position.trim().is_empty() {
            return Err(ValidationError::EmptyPosition);
        }
        if !self.salary.is_finite() {
            return Err(ValidationError::InvalidSalary(self.salary.to_string()));
        }
        if self.salary < 0.0 {
            return Err(ValidationError::NegativeSalary(self.salary));
        }
        Ok(())
    }
}

/// A persisted employee. The identifier is fixed at construction.
///
/// Encodes the identifier as `_id`. Decoding prefers `_id` and falls back to `id`, so
/// documents that carry both keys still decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    id: EmployeeId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "posicion")]
    pub position: String,
    #[serde(rename = "salario")]
    pub salary: f64,
    #[serde(rename = "sexo")]
    pub gender: Gender,
    #[serde(rename = "fechaIngreso", serialize_with = "protocol::hire_date::serialize")]
    pub hired_on: NaiveDate,
}

#[derive(Deserialize)]
struct EmployeeRecord {
    #[serde(rename = "_id", default)]
    store_id: Option<EmployeeId>,
    #[serde(default)]
    id: Option<EmployeeId>,
    #[serde(flatten)]
    fields: EmployeeDraft,
}

impl<'de> Deserialize<'de> for Employee {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = EmployeeRecord::deserialize(deserializer)?;
        let id = record
            .store_id
            .or(record.id)
            .ok_or_else(|| de::Error::missing_field("_id"))?;
        Ok(Employee::from_draft(id, record.fields))
    }
}

impl Employee {
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            position: draft.position,
            salary: draft.salary,
            gender: draft.gender,
            hired_on: draft.hired_on,
        }
    }

    pub fn id(&self) -> &EmployeeId {
        &self.id
    }

    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            position: self.position.clone(),
            salary: self.salary,
            gender: self.gender,
            hired_on: self.hired_on,
        }
    }

    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            name: "Ana".to_string(),
            position: "Engineer".to_string(),
            salary: 500.0,
            gender: Gender::Female,
            hired_on: NaiveDate::from_ymd_opt(2020, 1, 1).expect("date"),
        }
    }

    #[test]
    fn validate_accepts_complete_draft() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_name_and_position() {
        let mut blank_name = draft();
        blank_name.name = "   ".to_string();
        assert_eq!(blank_name.validate(), Err(ValidationError::EmptyName));

        let mut blank_position = draft();
        blank_position.position.clear();
        assert_eq!(
            blank_position.validate(),
            Err(ValidationError::EmptyPosition)
        );
    }

    #[test]
    fn validate_rejects_negative_salary_but_allows_zero() {
        let mut negative = draft();
        negative.salary = -1.0;
        assert_eq!(
            negative.validate(),
            Err(ValidationError::NegativeSalary(-1.0))
        );

        let mut zero = draft();
        zero.salary = 0.0;
        assert_eq!(zero.validate(), Ok(()));
    }

    #[test]
    fn gender_parse_accepts_codes_and_words() {
        assert_eq!(Gender::parse("M"), Some(Gender::Male));
        assert_eq!(Gender::parse(" female "), Some(Gender::Female));
        assert_eq!(Gender::parse("x"), None);
    }

    #[test]
    fn employee_keeps_identifier_from_construction() {
        let employee = Employee::from_draft(EmployeeId::new("abc"), draft());
        assert_eq!(employee.id().as_str(), "abc");
        assert_eq!(employee.to_draft(), draft());
        assert_eq!(employee.initial(), Some('A'));
    }
}
