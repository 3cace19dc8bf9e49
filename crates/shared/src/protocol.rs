//! Wire-format helpers for the employee resource.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a hire date from either a full ISO-8601 date-time or a bare `YYYY-MM-DD`.
///
/// Date-times carrying an offset are converted to UTC before the calendar date is taken.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub mod hire_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid hire date '{raw}'")))
    }
}

pub mod salary {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSalary {
        Number(f64),
        Text(String),
    }

    /// Salaries arrive as JSON numbers, or as numeric strings for records written by older forms.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawSalary::deserialize(deserializer)? {
            RawSalary::Number(value) => Ok(value),
            RawSalary::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid salary '{text}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{Employee, EmployeeDraft, Gender};

    #[test]
    fn parses_dates_with_and_without_time() {
        let expected = NaiveDate::from_ymd_opt(2021, 6, 15).expect("date");
        assert_eq!(parse_calendar_date("2021-06-15"), Some(expected));
        assert_eq!(
            parse_calendar_date("2021-06-15T00:00:00.000Z"),
            Some(expected)
        );
        assert_eq!(parse_calendar_date("2021-06-15T10:30:00"), Some(expected));
        assert_eq!(parse_calendar_date("15/06/2021"), None);
    }

    #[test]
    fn offset_date_times_use_the_utc_calendar_date() {
        assert_eq!(
            parse_calendar_date("2021-06-15T22:00:00-03:00"),
            NaiveDate::from_ymd_opt(2021, 6, 16)
        );
    }

    #[test]
    fn decodes_store_document_and_ignores_unknown_fields() {
        let employee: Employee = serde_json::from_value(json!({
            "_id": "65a1",
            "nombre": "Ana López",
            "posicion": "Analyst",
            "salario": "1200.5",
            "sexo": "F",
            "fechaIngreso": "2020-01-01T00:00:00.000Z",
            "__v": 0
        }))
        .expect("decode employee");

        assert_eq!(employee.id().as_str(), "65a1");
        assert_eq!(employee.salary, 1200.5);
        assert_eq!(employee.gender, Gender::Female);
        assert_eq!(
            employee.hired_on,
            NaiveDate::from_ymd_opt(2020, 1, 1).expect("date")
        );
    }

    #[test]
    fn accepts_plain_id_key() {
        let employee: Employee = serde_json::from_value(json!({
            "id": "7",
            "nombre": "Beto",
            "posicion": "Clerk",
            "salario": 300,
            "sexo": "M",
            "fechaIngreso": "2021-06-15"
        }))
        .expect("decode employee");
        assert_eq!(employee.id().as_str(), "7");
    }

    #[test]
    fn prefers_store_id_when_both_keys_are_present() {
        let employee: Employee = serde_json::from_value(json!({
            "_id": "65a1",
            "id": "65a1-virtual",
            "nombre": "Ana",
            "posicion": "Analyst",
            "salario": 500,
            "sexo": "F",
            "fechaIngreso": "2020-01-01"
        }))
        .expect("decode employee");
        assert_eq!(employee.id().as_str(), "65a1");
    }

    #[test]
    fn record_without_any_identifier_is_rejected() {
        let result = serde_json::from_value::<Employee>(json!({
            "nombre": "Ana",
            "posicion": "Analyst",
            "salario": 500,
            "sexo": "F",
            "fechaIngreso": "2020-01-01"
        }));
        let err = result.expect_err("identifier is required");
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn employee_encodes_identifier_as_store_id() {
        let employee = Employee::from_draft(
            crate::domain::EmployeeId::new("65a1"),
            EmployeeDraft {
                name: "Ana".to_string(),
                position: "Analyst".to_string(),
                salary: 500.0,
                gender: Gender::Female,
                hired_on: NaiveDate::from_ymd_opt(2020, 1, 1).expect("date"),
            },
        );
        let value = serde_json::to_value(&employee).expect("encode");
        assert_eq!(value["_id"], "65a1");
        assert!(value.get("id").is_none());
        assert_eq!(value["fechaIngreso"], "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn draft_encodes_without_identifier() {
        let draft = EmployeeDraft {
            name: "Beto".to_string(),
            position: "Clerk".to_string(),
            salary: 300.0,
            gender: Gender::Male,
            hired_on: NaiveDate::from_ymd_opt(2021, 6, 15).expect("date"),
        };
        let value = serde_json::to_value(&draft).expect("encode");

        assert_eq!(value["nombre"], "Beto");
        assert_eq!(value["sexo"], "M");
        assert_eq!(value["salario"], 300.0);
        assert_eq!(value["fechaIngreso"], "2021-06-15T00:00:00.000Z");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn rejects_non_numeric_salary_text() {
        let result = serde_json::from_value::<EmployeeDraft>(json!({
            "nombre": "Beto",
            "posicion": "Clerk",
            "salario": "lots",
            "sexo": "M",
            "fechaIngreso": "2021-06-15"
        }));
        assert!(result.is_err());
    }
}
