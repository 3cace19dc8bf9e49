//! Text rendering of the employee screen.

use std::fmt::Write as _;

use shared::domain::Employee;
use view_pipeline::{FilterSpec, PagerControls, SalaryOrder};

use crate::controller::events::err_label;
use crate::controller::form::EmployeeForm;
use crate::controller::reducer::AppState;

pub fn screen(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Employee management ==");

    if state.loading {
        let _ = writeln!(out, "Loading...");
        return out;
    }

    filters(&mut out, state);
    table(&mut out, state);
    form(&mut out, &state.form);

    if !state.status.is_empty() {
        let _ = writeln!(out, "status: {}", state.status);
    }
    if let Some(err) = &state.last_error {
        let _ = writeln!(out, "[{}] {}", err_label(err.category()), err.message());
    }
    out
}

fn filters(out: &mut String, state: &AppState) {
    let staged = state.filters.staged();
    let marker = match (state.filters.is_active(), state.filters.has_pending_edits()) {
        (true, false) => "applied",
        (true, true) => "applied; edits pending, type 'apply'",
        (false, false) => "off",
        (false, true) => "not applied, type 'apply'",
    };
    let _ = writeln!(out, "filters ({marker}): {}", describe_filter(staged));
}

pub fn describe_filter(spec: &FilterSpec) -> String {
    let gender = spec.gender.map_or("any", |g| g.label());
    let sort = match spec.salary_order {
        SalaryOrder::Unordered => "none",
        SalaryOrder::Ascending => "salary asc",
        SalaryOrder::Descending => "salary desc",
    };
    let date = |d: Option<chrono::NaiveDate>| d.map_or("-".to_string(), |d| d.to_string());
    format!(
        "name='{}' gender={gender} sort={sort} from={} to={}",
        spec.name,
        date(spec.hired_from),
        date(spec.hired_to)
    )
}

fn table(out: &mut String, state: &AppState) {
    let view = state.view();
    let _ = writeln!(
        out,
        "{:<12} {:<24} {:<18} {:>12} {:<7} {:<10}",
        "ID", "NAME", "POSITION", "SALARY", "GENDER", "HIRED"
    );

    if view.items.is_empty() {
        let suffix = if state.filters.is_active() {
            " with the applied filters"
        } else {
            ""
        };
        let _ = writeln!(out, "No employees found{suffix}");
    }
    for employee in &view.items {
        let _ = writeln!(out, "{}", row(employee));
    }

    if let Some(showing) = view.showing() {
        let filtered = if state.filters.is_active() {
            " (filtered)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "Showing {} to {} of {} results{filtered}",
            showing.first, showing.last, showing.total
        );
        let _ = writeln!(out, "{}", pager_line(&view.pager()));
    }
}

fn row(employee: &Employee) -> String {
    let name = match employee.initial() {
        Some(initial) => format!("({initial}) {}", employee.name),
        None => employee.name.clone(),
    };
    format!(
        "{:<12} {:<24} {:<18} {:>12} {:<7} {:<10}",
        fit(employee.id().as_str(), 12),
        fit(&name, 24),
        fit(&employee.position, 18),
        format_salary(employee.salary),
        employee.gender.label(),
        employee.hired_on.format("%Y-%m-%d")
    )
}

pub fn pager_line(pager: &PagerControls) -> String {
    let mut parts = Vec::new();
    parts.push(if pager.previous_enabled { "< prev" } else { "      " }.to_string());
    for button in &pager.numbered {
        parts.push(if button.active {
            format!("[{}]", button.page)
        } else {
            button.page.to_string()
        });
    }
    if pager.ellipsis {
        parts.push("...".to_string());
    }
    if let Some(last) = pager.last {
        parts.push(last.page.to_string());
    }
    if pager.next_enabled {
        parts.push("next >".to_string());
    }
    parts.join(" ").trim().to_string()
}

fn form(out: &mut String, form: &EmployeeForm) {
    let (title, fields) = match form {
        EmployeeForm::Closed => return,
        EmployeeForm::Creating(fields) => ("Add employee".to_string(), fields),
        EmployeeForm::Editing { id, fields } => (format!("Edit employee {id}"), fields),
    };
    let _ = writeln!(out, "-- {title} --");
    let _ = writeln!(out, "  name:     {}", fields.name);
    let _ = writeln!(out, "  position: {}", fields.position);
    let _ = writeln!(out, "  salary:   {}", fields.salary);
    let _ = writeln!(out, "  gender:   {}", fields.gender.label());
    let _ = writeln!(out, "  hired:    {}", fields.hired_on);
    let _ = writeln!(out, "  (set <field> <value> | save | cancel)");
}

/// Whole units with thousands separators; cents only when present.
pub fn format_salary(salary: f64) -> String {
    let cents = (salary.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if salary < 0.0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{sign}${grouped}"),
        fraction => format!("{sign}${grouped}.{fraction:02}"),
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_uses_thousands_separators() {
        assert_eq!(format_salary(0.0), "$0");
        assert_eq!(format_salary(950.0), "$950");
        assert_eq!(format_salary(1234567.0), "$1,234,567");
        assert_eq!(format_salary(1500.5), "$1,500.50");
    }

    #[test]
    fn pager_line_marks_current_page() {
        assert_eq!(
            pager_line(&PagerControls::new(2, 10)),
            "< prev 1 [2] 3 ... 10 next >"
        );
        assert_eq!(pager_line(&PagerControls::new(1, 1)), "[1]");
    }

    #[test]
    fn long_values_are_clipped() {
        assert_eq!(fit("Bartolomé", 5), "Bart~");
        assert_eq!(fit("Ana", 5), "Ana");
    }

    #[test]
    fn loading_screen_hides_the_table() {
        let state = AppState::default();
        let text = screen(&state);
        assert!(text.contains("Loading..."));
        assert!(!text.contains("NAME"));
    }

    #[test]
    fn empty_filtered_screen_says_so() {
        let mut state = AppState {
            loading: false,
            ..AppState::default()
        };
        state.filters.staged_mut().name = "zzz".to_string();
        state.filters.apply();

        let text = screen(&state);
        assert!(text.contains("No employees found with the applied filters"));
        assert!(text.contains("filters (applied): name='zzz'"));
    }

    #[test]
    fn sort_only_selection_is_not_reported_as_pending() {
        let mut state = AppState {
            loading: false,
            ..AppState::default()
        };
        state.filters.staged_mut().salary_order = SalaryOrder::Descending;

        let text = screen(&state);
        assert!(text.contains("filters (off): name='' gender=any sort=salary desc"));
    }
}
