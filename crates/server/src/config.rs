use std::fs;

use chrono::Duration;
use serde::Deserialize;
use storage::DEFAULT_RETENTION_SECONDS;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub retention_seconds: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            retention_seconds: DEFAULT_RETENTION_SECONDS,
        }
    }
}

impl Settings {
    /// Falls back to the default window when `retention_seconds` does not
    /// fit a `Duration`.
    pub fn retention(&self) -> Duration {
        Duration::try_seconds(self.retention_seconds)
            .unwrap_or_else(|| Duration::seconds(DEFAULT_RETENTION_SECONDS))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    retention_seconds: Option<i64>,
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml`, then environment. Later sources win.
pub(crate) fn settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.server_bind = v;
                }
                if let Some(v) = file_cfg.retention_seconds {
                    apply_retention(&mut settings, v);
                }
            }
            Err(error) => warn!(%error, "ignoring unreadable server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("APP__RETENTION_SECONDS") {
        if let Ok(parsed) = v.parse::<i64>() {
            apply_retention(&mut settings, parsed);
        }
    }

    settings
}

fn apply_retention(settings: &mut Settings, seconds: i64) {
    if seconds <= 0 {
        warn!(seconds, "ignoring non-positive retention");
    } else if Duration::try_seconds(seconds).is_none() {
        warn!(seconds, "ignoring out-of-range retention");
    } else {
        settings.retention_seconds = seconds;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
