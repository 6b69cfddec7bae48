//! Runner Configuration
//!
//! Loads the runner's configuration from `~/.pwexec/config.json`.
//! Every field is optional on disk; missing fields, a missing file, or a
//! malformed file fall back to defaults so a bare install works with no
//! configuration at all.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::LogLevel;

/// Directory name under the user's home for runner data.
const CONFIG_DIR_NAME: &str = ".pwexec";

/// Config file name within the runner directory.
const CONFIG_FILENAME: &str = "config.json";

/// Returns the runner base directory: `~/.pwexec`.
pub fn get_runner_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
    home.join(CONFIG_DIR_NAME)
}

/// Returns the full path to the config file: `~/.pwexec/config.json`.
pub fn get_config_path() -> PathBuf {
    get_runner_dir().join(CONFIG_FILENAME)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerConfig {
    /// Directory holding `node_modules` and `lib/helpers`. Defaults to the
    /// directory containing the executable. A leading `~` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_dir: Option<String>,
    /// Node-compatible interpreter used to check and run generated scripts.
    pub interpreter: String,
    /// Age threshold, in minutes, past which leftover generated scripts
    /// from earlier runs are reclaimed.
    pub reclaim_max_age_minutes: u32,
    pub log_level: LogLevel,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            runtime_dir: None,
            interpreter: "node".to_string(),
            reclaim_max_age_minutes: 60,
            log_level: LogLevel::Info,
        }
    }
}

/// Load the runner config from disk, falling back to defaults when the
/// file is absent or unparsable.
pub fn load_config() -> RunnerConfig {
    let config_path = get_config_path();
    if !config_path.exists() {
        return RunnerConfig::default();
    }

    let contents = match fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to read {}: {}", config_path.display(), e);
            return RunnerConfig::default();
        }
    };

    parse_config(&contents).unwrap_or_else(|| {
        warn!("ignoring malformed config at {}", config_path.display());
        RunnerConfig::default()
    })
}

/// Parse config file contents. Unset fields take their defaults.
fn parse_config(contents: &str) -> Option<RunnerConfig> {
    serde_json::from_str(contents).ok()
}

/// Resolve a path that may start with `~` to an absolute path.
///
/// If the path starts with `~`, the tilde is replaced with the user's home
/// directory. Otherwise the path is returned as-is.
pub fn resolve_path(p: &str) -> String {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest).to_string_lossy().to_string()
    } else {
        p.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.interpreter, "node");
        assert_eq!(config.reclaim_max_age_minutes, 60);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.runtime_dir.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"{
                "runtimeDir": "~/skills/playwright",
                "interpreter": "bun",
                "reclaimMaxAgeMinutes": 15,
                "logLevel": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.runtime_dir.as_deref(), Some("~/skills/playwright"));
        assert_eq!(config.interpreter, "bun");
        assert_eq!(config.reclaim_max_age_minutes, 15);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_parse_partial_config_merges_defaults() {
        let config = parse_config(r#"{ "reclaimMaxAgeMinutes": 120 }"#).unwrap();
        assert_eq!(config.reclaim_max_age_minutes, 120);
        assert_eq!(config.interpreter, "node");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_parse_malformed_config() {
        assert!(parse_config("not json").is_none());
    }

    #[test]
    fn test_resolve_path_with_tilde() {
        let resolved = resolve_path("~/some/path");
        assert!(!resolved.starts_with('~'));
        assert!(resolved.ends_with("some/path"));
    }

    #[test]
    fn test_resolve_path_without_tilde() {
        let path = "/absolute/path/to/file";
        assert_eq!(resolve_path(path), path);
    }
}
