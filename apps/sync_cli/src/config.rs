use std::{fs, io, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::protocol::SYNC_VENDOR_ORDERS_METHOD;

pub const DEFAULT_CONFIG_PATH: &str = "order_sync.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub method: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub schedule_interval_secs: u64,
    /// IANA zone for offset-less dates; the process zone when unset.
    pub time_zone: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            method: SYNC_VENDOR_ORDERS_METHOD.into(),
            api_key: None,
            api_secret: None,
            schedule_interval_secs: 3600,
            time_zone: None,
        }
    }
}

impl Settings {
    /// Key pair for the transport, only when both halves are present.
    pub fn api_token(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.api_secret.as_deref()) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Some((key, secret))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    method: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
    schedule_interval_secs: Option<u64>,
    time_zone: Option<String>,
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    let mut settings = Settings::default();
    if let Some(raw) = raw {
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.method {
        settings.method = v;
    }
    if file_cfg.api_key.is_some() {
        settings.api_key = file_cfg.api_key;
    }
    if file_cfg.api_secret.is_some() {
        settings.api_secret = file_cfg.api_secret;
    }
    if let Some(v) = file_cfg.schedule_interval_secs {
        if v == 0 {
            bail!("schedule_interval_secs must be greater than zero");
        }
        settings.schedule_interval_secs = v;
    }
    if file_cfg.time_zone.is_some() {
        settings.time_zone = file_cfg.time_zone;
    }

    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ORDER_SYNC_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = var("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = var("APP__METHOD") {
        settings.method = v;
    }

    if let Some(v) = var("APP__API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = var("APP__API_SECRET") {
        settings.api_secret = Some(v);
    }

    if let Some(v) = var("APP__TIME_ZONE") {
        settings.time_zone = Some(v);
    }

    if let Some(v) = var("APP__SCHEDULE_INTERVAL_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) if parsed > 0 => settings.schedule_interval_secs = parsed,
            _ => tracing::warn!(value = %v, "ignoring invalid APP__SCHEDULE_INTERVAL_SECS"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
