use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const SETTINGS_FILE: &str = "admin_console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
    pub command_queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/empleados".into(),
            log_filter: "info".into(),
            command_queue_capacity: 64,
        }
    }
}

/// Defaults, then `admin_console.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE));
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<HashMap<String, String>>(&raw) {
        Ok(file_cfg) => apply_pairs(settings, |key| file_cfg.get(key).cloned()),
        Err(err) => tracing::warn!("ignoring unreadable {}: {err}", path.display()),
    }
}

fn apply_pairs(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("log_filter") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("command_queue_capacity") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.command_queue_capacity = parsed.max(1);
        }
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("EMPLOYEES_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__COMMAND_QUEUE_CAPACITY") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.command_queue_capacity = parsed.max(1);
        }
    }
}

pub fn parse_api_url(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("employee API url is empty; set EMPLOYEES_API_URL or --api-url");
    }

    let url = Url::parse(raw).with_context(|| format!("invalid employee API url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("employee API url '{raw}' must use http or https, not '{other}'"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
