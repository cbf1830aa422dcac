//! Dashboard configuration.
//!
//! A single TOML file, looked up in order: the `--config` flag, the
//! `ZAYAN_HQ_CONFIG` environment variable, then
//! `<config_dir>/zayan-hq/config.toml`. Every field has a default, so a
//! partial (or absent) file is valid. A path given explicitly must exist.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ErrorCode;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV_VAR: &str = "ZAYAN_HQ_CONFIG";

/// SHA-256 of the built-in demo password.
const DEFAULT_PASSWORD_SHA256: &str =
    "6d36385e92c05a64e0d7cf0a454129c69e8711a9fa97a54bf5d39a8e0ebecafd";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The single operator account and the identity its session carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    /// Lowercase hex SHA-256 of the password.
    #[serde(default = "default_password_sha256")]
    pub password_sha256: String,
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password_sha256: default_password_sha256(),
            display_name: default_display_name(),
            email: default_email(),
            user_id: default_user_id(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_chat_reply_delay_ms")]
    pub chat_reply_delay_ms: u64,
    #[serde(default = "default_refresh_notice_delay_ms")]
    pub refresh_notice_delay_ms: u64,
    /// UI poll interval; also bounds how late a deferred event can fire.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            chat_reply_delay_ms: default_chat_reply_delay_ms(),
            refresh_notice_delay_ms: default_refresh_notice_delay_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub const fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }

    #[must_use]
    pub const fn refresh_notice_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_notice_delay_ms)
    }

    /// Poll interval, never below 10ms.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// `pretty`, `text` or `json`. Unset means "decide from the terminal".
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ConfigReadError,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
        }
    }
}

/// Where the config lives, and whether the caller asked for it by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub explicit: bool,
}

/// Pick the config file from the flag, the env value, then the user config
/// directory. `None` when no source yields a path.
#[must_use]
pub fn resolve_config_path(
    cli_path: Option<&Path>,
    env_path: Option<&str>,
    config_dir: Option<&Path>,
) -> Option<ConfigLocation> {
    if let Some(path) = cli_path {
        return Some(ConfigLocation {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    if let Some(path) = env_path.map(str::trim).filter(|p| !p.is_empty()) {
        return Some(ConfigLocation {
            path: PathBuf::from(path),
            explicit: true,
        });
    }
    config_dir.map(|dir| ConfigLocation {
        path: dir.join("zayan-hq").join("config.toml"),
        explicit: false,
    })
}

/// Parse a config file.
///
/// # Errors
///
/// [`ConfigError::Read`] if the file cannot be read, [`ConfigError::Parse`]
/// on invalid TOML or mistyped fields.
pub fn load_config_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<DashboardConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the effective config for this process.
///
/// A missing file at the default location yields defaults; a missing file
/// named by `--config` or `ZAYAN_HQ_CONFIG` is an error.
///
/// # Errors
///
/// Propagates [`load_config_file`] failures.
pub fn load_config(cli_path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let env_path = env::var(CONFIG_ENV_VAR).ok();
    let config_dir = dirs::config_dir();
    let Some(location) =
        resolve_config_path(cli_path, env_path.as_deref(), config_dir.as_deref())
    else {
        tracing::debug!("no config directory; using defaults");
        return Ok(DashboardConfig::default());
    };

    if !location.explicit && !location.path.exists() {
        tracing::debug!(path = %location.path.display(), "no config file; using defaults");
        return Ok(DashboardConfig::default());
    }

    let config = load_config_file(&location.path)?;
    tracing::debug!(path = %location.path.display(), "config loaded");
    Ok(config)
}

fn default_username() -> String {
    "clement".to_string()
}

fn default_password_sha256() -> String {
    DEFAULT_PASSWORD_SHA256.to_string()
}

fn default_display_name() -> String {
    "Clément".to_string()
}

fn default_email() -> String {
    "clement@zayan-hq.local".to_string()
}

fn default_user_id() -> String {
    "1".to_string()
}

const fn default_chat_reply_delay_ms() -> u64 {
    1500
}

const fn default_refresh_notice_delay_ms() -> u64 {
    800
}

const fn default_tick_ms() -> u64 {
    200
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_demo_account() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.auth.username, "clement");
        assert_eq!(cfg.auth.display_name, "Clément");
        assert_eq!(cfg.auth.user_id, "1");
        assert_eq!(cfg.timing.chat_reply_delay(), Duration::from_millis(1500));
        assert_eq!(cfg.timing.refresh_notice_delay(), Duration::from_millis(800));
        assert!(cfg.output.format.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[auth]\nusername = \"ops\"\n\n[timing]\nchat_reply_delay_ms = 10\n",
        )
        .expect("write config");

        let cfg = load_config_file(&path).expect("load should succeed");
        assert_eq!(cfg.auth.username, "ops");
        assert_eq!(cfg.auth.password_sha256, DEFAULT_PASSWORD_SHA256);
        assert_eq!(cfg.timing.chat_reply_delay_ms, 10);
        assert_eq!(cfg.timing.refresh_notice_delay_ms, 800);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timing]\ntick_ms = \"fast\"\n").expect("write config");

        let err = load_config_file(&path).expect_err("should fail");
        assert_eq!(err.code(), ErrorCode::ConfigParseError);
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn explicit_missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing)).expect_err("should fail");
        assert_eq!(err.code(), ErrorCode::ConfigReadError);
    }

    #[test]
    fn flag_beats_env_beats_config_dir() {
        let flag = Path::new("/tmp/flag.toml");
        let dir = Path::new("/home/u/.config");

        let from_flag = resolve_config_path(Some(flag), Some("/tmp/env.toml"), Some(dir));
        assert_eq!(from_flag.map(|l| l.path), Some(flag.to_path_buf()));

        let from_env = resolve_config_path(None, Some("/tmp/env.toml"), Some(dir))
            .expect("env path");
        assert_eq!(from_env.path, PathBuf::from("/tmp/env.toml"));
        assert!(from_env.explicit);

        let from_dir = resolve_config_path(None, Some("  "), Some(dir)).expect("dir path");
        assert_eq!(from_dir.path, dir.join("zayan-hq/config.toml"));
        assert!(!from_dir.explicit);

        assert!(resolve_config_path(None, None, None).is_none());
    }

    #[test]
    fn tick_has_a_floor() {
        let timing = TimingConfig {
            tick_ms: 0,
            ..TimingConfig::default()
        };
        assert_eq!(timing.tick(), Duration::from_millis(10));
    }
}
