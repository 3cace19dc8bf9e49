mod backend_bridge;
mod config;
mod controller;
mod ui;

use std::{io, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::HttpEmployeeStore;
use serde::Serialize;
use shared::{
    domain::{EmployeeId, Gender},
    protocol::parse_calendar_date,
};
use tracing_subscriber::EnvFilter;
use view_pipeline::{FilterSpec, PageView, PagerControls, SalaryOrder};

use controller::reducer::Action;
use controller::session::Session;

#[derive(Parser, Debug)]
#[command(about = "Employee management console")]
struct Args {
    /// Employees collection endpoint, e.g. http://localhost:3000/empleados
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of the (optionally filtered) employee list and exit.
    List(ListArgs),
    /// Delete an employee by identifier without prompting.
    Delete { id: String },
}

#[derive(ClapArgs, Debug, Default)]
struct ListArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long, value_parser = parse_gender)]
    gender: Option<Gender>,
    #[arg(long, value_parser = parse_sort)]
    sort: Option<SalaryOrder>,
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(name) = &self.name {
            actions.push(Action::StageName(name.clone()));
        }
        if self.gender.is_some() {
            actions.push(Action::StageGender(self.gender));
        }
        if let Some(order) = self.sort {
            actions.push(Action::StageSalaryOrder(order));
        }
        if self.from.is_some() {
            actions.push(Action::StageHiredFrom(self.from));
        }
        if self.to.is_some() {
            actions.push(Action::StageHiredTo(self.to));
        }
        if !actions.is_empty() {
            actions.push(Action::ApplyFilters);
        }
        if self.page > 1 {
            actions.push(Action::GoToPage(self.page));
        }
        actions
    }
}

fn parse_gender(raw: &str) -> Result<Gender, String> {
    Gender::parse(raw).ok_or_else(|| format!("expected M or F, got '{raw}'"))
}

fn parse_sort(raw: &str) -> Result<SalaryOrder, String> {
    SalaryOrder::parse(raw).ok_or_else(|| format!("expected asc, desc or none, got '{raw}'"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got '{raw}'"))
}

#[derive(Serialize)]
struct ListOutput<'a> {
    #[serde(flatten)]
    view: PageView<'a>,
    filter: Option<&'a FilterSpec>,
    pager: PagerControls,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(log_filter) = args.log_filter {
        settings.log_filter = log_filter;
    }
    init_tracing(&settings.log_filter);

    let endpoint = config::parse_api_url(&settings.api_url)?;
    tracing::info!(endpoint = %endpoint, "starting admin console");
    let store = Arc::new(HttpEmployeeStore::new(endpoint));
    let mut session = Session::start(store, settings.command_queue_capacity);
    session.perform(Action::Load);

    match args.command {
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            ui::console::run(&mut session, stdin.lock(), &mut stdout, today)
                .context("console I/O failed")?;
        }
        Some(Command::List(list)) => {
            for action in list.actions() {
                session.perform(action);
            }
            if list.json {
                let view = session.state.view();
                let output = ListOutput {
                    pager: view.pager(),
                    filter: session.state.filters.applied(),
                    view,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", ui::render::screen(&session.state));
            }
        }
        Some(Command::Delete { id }) => {
            session.perform(Action::Delete(EmployeeId::new(id.clone())));
            if let Some(err) = &session.state.last_error {
                bail!("failed to delete employee {id}: {}", err.message());
            }
            println!("deleted employee {id}");
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
