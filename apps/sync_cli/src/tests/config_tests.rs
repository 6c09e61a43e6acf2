use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_target_local_backend_and_hourly_schedule() {
    let settings = Settings::default();
    assert_eq!(settings.base_url, "http://127.0.0.1:8000");
    assert_eq!(settings.method, SYNC_VENDOR_ORDERS_METHOD);
    assert_eq!(settings.schedule_interval_secs, 3600);
    assert_eq!(settings.api_token(), None);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
base_url = "https://erp.example.com"
api_key = "abc"
api_secret = "xyz"
schedule_interval_secs = 900
"#,
    )
    .expect("apply file");

    assert_eq!(settings.base_url, "https://erp.example.com");
    assert_eq!(settings.method, SYNC_VENDOR_ORDERS_METHOD);
    assert_eq!(settings.api_token(), Some(("abc", "xyz")));
    assert_eq!(settings.schedule_interval_secs, 900);
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "schedule_interval_secs = \"soon\"").is_err());
}

#[test]
fn zero_interval_in_file_is_rejected() {
    let mut settings = Settings::default();
    let err = apply_file(&mut settings, "schedule_interval_secs = 0").expect_err("must fail");

    assert!(err.to_string().contains("greater than zero"), "error: {err}");
    assert_eq!(settings.schedule_interval_secs, 3600);
}

#[test]
fn zero_interval_in_file_fails_loading() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("order_sync_zero_{suffix}.toml"));
    fs::write(&path, "schedule_interval_secs = 0\n").expect("write config");

    let result = load_settings(&path);
    fs::remove_file(&path).expect("cleanup");

    let err = result.expect_err("must fail");
    assert!(format!("{err:#}").contains("greater than zero"), "error: {err:#}");
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("ORDER_SYNC_BASE_URL", "https://plain.example.com"),
            ("APP__BASE_URL", "https://app.example.com"),
            ("APP__METHOD", "custom.sync"),
            ("APP__SCHEDULE_INTERVAL_SECS", "120"),
        ]),
    );

    assert_eq!(settings.base_url, "https://app.example.com");
    assert_eq!(settings.method, "custom.sync");
    assert_eq!(settings.schedule_interval_secs, 120);
    assert_eq!(settings.time_zone, None);
}

#[test]
fn time_zone_from_file_then_env() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "time_zone = \"Europe/Berlin\"").expect("apply file");
    assert_eq!(settings.time_zone.as_deref(), Some("Europe/Berlin"));

    apply_env(&mut settings, env_from(&[("APP__TIME_ZONE", "America/New_York")]));
    assert_eq!(settings.time_zone.as_deref(), Some("America/New_York"));
}

#[test]
fn invalid_interval_in_env_is_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__SCHEDULE_INTERVAL_SECS", "0")]),
    );
    assert_eq!(settings.schedule_interval_secs, 3600);

    apply_env(
        &mut settings,
        env_from(&[("APP__SCHEDULE_INTERVAL_SECS", "hourly")]),
    );
    assert_eq!(settings.schedule_interval_secs, 3600);
}

#[test]
fn api_token_requires_both_halves() {
    let settings = Settings {
        api_key: Some("abc".into()),
        ..Settings::default()
    };
    assert_eq!(settings.api_token(), None);

    let settings = Settings {
        api_key: Some("abc".into()),
        api_secret: Some(String::new()),
        ..Settings::default()
    };
    assert_eq!(settings.api_token(), None);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("order_sync_missing_{suffix}.toml"));

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.method, Settings::default().method);
}

#[test]
fn reads_settings_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("order_sync_test_{suffix}.toml"));
    fs::write(&path, "method = \"pkg.other.sync\"\n").expect("write config");

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.method, "pkg.other.sync");

    fs::remove_file(path).expect("cleanup");
}
