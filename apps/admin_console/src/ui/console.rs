//! Line-oriented front end: parses commands into actions and re-renders after each one.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use shared::{
    domain::{EmployeeId, Gender},
    protocol::parse_calendar_date,
};
use view_pipeline::SalaryOrder;

use crate::controller::form::FormEdit;
use crate::controller::reducer::Action;
use crate::controller::session::Session;
use crate::ui::render;

pub const HELP: &str = "\
filters:  name [text] | gender m|f|any | sort asc|desc|none | from <date>|none | to <date>|none
          apply | clear
paging:   page <n> | first | prev | next | last
records:  new | edit <id> | set name|position|salary|gender|hired <value> | save | cancel
          delete <id> | refresh
other:    show | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Action(Action),
    ConfirmDelete(EmployeeId),
    Show,
    Help,
    Quit,
}

pub fn parse_line(line: &str, today: NaiveDate) -> Result<ConsoleInput, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "" | "show" => return Ok(ConsoleInput::Show),
        "help" | "?" => return Ok(ConsoleInput::Help),
        "quit" | "exit" | "q" => return Ok(ConsoleInput::Quit),
        "refresh" | "reload" => Action::Load,
        "name" => Action::StageName(rest.to_string()),
        "gender" => Action::StageGender(parse_gender_filter(rest)?),
        "sort" => Action::StageSalaryOrder(
            SalaryOrder::parse(rest).ok_or_else(|| format!("unknown sort order '{rest}'"))?,
        ),
        "from" => Action::StageHiredFrom(parse_optional_date(rest)?),
        "to" => Action::StageHiredTo(parse_optional_date(rest)?),
        "apply" => Action::ApplyFilters,
        "clear" => Action::ClearFilters,
        "page" => Action::GoToPage(
            rest.parse::<usize>()
                .map_err(|_| format!("'{rest}' is not a page number"))?,
        ),
        "first" => Action::GoToPage(1),
        "prev" | "previous" => Action::PreviousPage,
        "next" => Action::NextPage,
        "last" => Action::LastPage,
        "new" | "add" => Action::OpenCreate { today },
        "edit" => Action::OpenEdit(required_id(rest)?),
        "set" => Action::EditForm(parse_form_edit(rest)?),
        "save" => Action::SubmitForm,
        "cancel" => Action::CancelForm,
        "delete" => return Ok(ConsoleInput::ConfirmDelete(required_id(rest)?)),
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(ConsoleInput::Action(action))
}

fn parse_gender_filter(raw: &str) -> Result<Option<Gender>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "any" | "all" => Ok(None),
        other => Gender::parse(other)
            .map(Some)
            .ok_or_else(|| format!("unknown gender '{raw}'")),
    }
}

fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    match raw.trim() {
        "" | "none" | "-" => Ok(None),
        text => parse_calendar_date(text)
            .map(Some)
            .ok_or_else(|| format!("'{text}' is not a date (use YYYY-MM-DD)")),
    }
}

fn required_id(raw: &str) -> Result<EmployeeId, String> {
    if raw.is_empty() {
        return Err("an employee id is required".to_string());
    }
    Ok(EmployeeId::new(raw))
}

fn parse_form_edit(rest: &str) -> Result<FormEdit, String> {
    let (field, value) = rest
        .split_once(char::is_whitespace)
        .map(|(field, value)| (field, value.trim()))
        .unwrap_or((rest, ""));

    match field.to_ascii_lowercase().as_str() {
        "name" => Ok(FormEdit::Name(value.to_string())),
        "position" => Ok(FormEdit::Position(value.to_string())),
        "salary" => Ok(FormEdit::Salary(value.to_string())),
        "gender" => Gender::parse(value)
            .map(FormEdit::Gender)
            .ok_or_else(|| format!("unknown gender '{value}'")),
        "hired" | "date" => parse_calendar_date(value)
            .map(FormEdit::HiredOn)
            .ok_or_else(|| format!("'{value}' is not a date (use YYYY-MM-DD)")),
        other => Err(format!("unknown form field '{other}'")),
    }
}

/// Reads commands until end of input or `quit`, rendering the screen after each one.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
    today: impl Fn() -> NaiveDate,
) -> std::io::Result<()> {
    writeln!(output, "{}", render::screen(&session.state))?;
    writeln!(output, "type 'help' for commands")?;
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let line = line?;
        match parse_line(&line, today()) {
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Help) => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Ok(ConsoleInput::Show) => {}
            Ok(ConsoleInput::Action(action)) => session.perform(action),
            Ok(ConsoleInput::ConfirmDelete(id)) => {
                let label = session
                    .state
                    .find(&id)
                    .map_or_else(|| id.to_string(), |e| format!("{} ({id})", e.name));
                write!(output, "Delete employee {label}? [y/N] ")?;
                output.flush()?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    session.perform(Action::Delete(id));
                }
            }
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        }
        writeln!(output, "{}", render::screen(&session.state))?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Arc};

    use client_core::InMemoryEmployeeStore;
    use shared::domain::{Employee, EmployeeDraft};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).expect("date")
    }

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            parse_line("name Ana López", today()),
            Ok(ConsoleInput::Action(Action::StageName("Ana López".to_string())))
        );
        assert_eq!(
            parse_line("gender F", today()),
            Ok(ConsoleInput::Action(Action::StageGender(Some(Gender::Female))))
        );
        assert_eq!(
            parse_line("gender any", today()),
            Ok(ConsoleInput::Action(Action::StageGender(None)))
        );
        assert_eq!(
            parse_line("from 2021-06-15", today()),
            Ok(ConsoleInput::Action(Action::StageHiredFrom(
                NaiveDate::from_ymd_opt(2021, 6, 15)
            )))
        );
        assert_eq!(
            parse_line("to none", today()),
            Ok(ConsoleInput::Action(Action::StageHiredTo(None)))
        );
        assert_eq!(
            parse_line("sort desc", today()),
            Ok(ConsoleInput::Action(Action::StageSalaryOrder(
                SalaryOrder::Descending
            )))
        );
    }

    #[test]
    fn parses_form_and_record_commands() {
        assert_eq!(
            parse_line("new", today()),
            Ok(ConsoleInput::Action(Action::OpenCreate { today: today() }))
        );
        assert_eq!(
            parse_line("set salary 1200", today()),
            Ok(ConsoleInput::Action(Action::EditForm(FormEdit::Salary(
                "1200".to_string()
            ))))
        );
        assert_eq!(
            parse_line("delete 65a1", today()),
            Ok(ConsoleInput::ConfirmDelete(EmployeeId::new("65a1")))
        );
        assert!(parse_line("edit", today()).is_err());
        assert!(parse_line("set hired yesterday", today()).is_err());
        assert!(parse_line("page two", today()).is_err());
        assert!(parse_line("launch", today()).is_err());
    }

    #[test]
    fn delete_requires_confirmation() {
        let store = Arc::new(InMemoryEmployeeStore::with_employees(vec![
            Employee::from_draft(
                EmployeeId::new("a"),
                EmployeeDraft {
                    name: "Ana".to_string(),
                    position: "Lead".to_string(),
                    salary: 500.0,
                    gender: Gender::Female,
                    hired_on: today(),
                },
            ),
        ]));
        let mut session = Session::start(store, 8);
        session.perform(Action::Load);

        let mut output = Vec::new();
        run(
            &mut session,
            Cursor::new("delete a\nn\nname an\napply\n"),
            &mut output,
            today,
        )
        .expect("run console");
        assert_eq!(session.state.employees.len(), 1);
        assert!(session.state.filters.is_active());

        let mut output = Vec::new();
        run(&mut session, Cursor::new("delete a\ny\nquit\n"), &mut output, today)
            .expect("run console");
        assert!(session.state.employees.is_empty());

        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("Delete employee Ana (a)? [y/N]"));
        assert!(text.contains("No employees found with the applied filters"));
    }
}
