use super::{apply_env, apply_file, parse_api_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_local_employee_resource() {
    let settings = Settings::default();
    assert_eq!(settings.api_url, "http://localhost:3000/empleados");
    assert_eq!(settings.log_filter, "info");
    assert_eq!(settings.command_queue_capacity, 64);
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("EMPLOYEES_API_URL", "http://plain:1/empleados"),
            ("APP__API_URL", "http://prefixed:2/empleados"),
            ("APP__LOG_FILTER", "debug"),
            ("APP__COMMAND_QUEUE_CAPACITY", "0"),
        ]),
    );

    assert_eq!(settings.api_url, "http://prefixed:2/empleados");
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.command_queue_capacity, 1);
}

#[test]
fn unparseable_capacity_keeps_previous_value() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__COMMAND_QUEUE_CAPACITY", "lots")]),
    );
    assert_eq!(settings.command_queue_capacity, 64);
}

#[test]
fn settings_file_overrides_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("admin_console_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("admin_console.toml");
    fs::write(
        &path,
        "api_url = \"https://hr.example.com/api/empleados\"\ncommand_queue_capacity = \"8\"\n",
    )
    .expect("write settings");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);

    assert_eq!(settings.api_url, "https://hr.example.com/api/empleados");
    assert_eq!(settings.command_queue_capacity, 8);
    assert_eq!(settings.log_filter, "info");

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_settings_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        &env::temp_dir().join("admin_console_does_not_exist.toml"),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn api_url_must_be_http() {
    assert!(parse_api_url("http://localhost:3000/empleados").is_ok());
    assert!(parse_api_url("  https://hr.example.com/empleados ").is_ok());
    assert!(parse_api_url("").is_err());
    assert!(parse_api_url("ftp://files.example.com/empleados").is_err());
    assert!(parse_api_url("not a url").is_err());
}
