//! Run Context
//!
//! The explicit, immutable context threaded through every stage of a run.
//! Built once from the loaded configuration at process start; no stage
//! reads ambient process state after that.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Duration;

use crate::config::{resolve_path, RunnerConfig};

#[derive(Clone, Debug)]
pub struct RunContext {
    /// Directory holding the runner's `node_modules` and `lib/helpers`.
    pub runtime_dir: PathBuf,
    /// Where generated scripts are written.
    pub temp_dir: PathBuf,
    /// Node-compatible interpreter for the generated scripts.
    pub interpreter: String,
    /// Age past which leftover generated scripts are reclaimed.
    pub reclaim_max_age: Duration,
}

impl RunContext {
    /// Resolve the configuration into a concrete context.
    pub fn from_config(config: &RunnerConfig) -> Result<Self> {
        let runtime_dir = match &config.runtime_dir {
            Some(dir) => PathBuf::from(resolve_path(dir)),
            None => default_runtime_dir()?,
        };

        Ok(Self {
            runtime_dir,
            temp_dir: env::temp_dir(),
            interpreter: config.interpreter.clone(),
            reclaim_max_age: Duration::minutes(i64::from(config.reclaim_max_age_minutes)),
        })
    }
}

/// The runtime directory when none is configured: the directory the
/// executable itself lives in, where the install step places
/// `node_modules`.
fn default_runtime_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_configured_runtime_dir() {
        let config = RunnerConfig {
            runtime_dir: Some("/opt/pwexec".to_string()),
            ..RunnerConfig::default()
        };
        let ctx = RunContext::from_config(&config).unwrap();
        assert_eq!(ctx.runtime_dir, PathBuf::from("/opt/pwexec"));
        assert_eq!(ctx.interpreter, "node");
        assert_eq!(ctx.reclaim_max_age, Duration::minutes(60));
    }

    #[test]
    fn test_from_config_expands_tilde() {
        let config = RunnerConfig {
            runtime_dir: Some("~/skills/playwright".to_string()),
            ..RunnerConfig::default()
        };
        let ctx = RunContext::from_config(&config).unwrap();
        assert!(!ctx.runtime_dir.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_from_config_defaults_to_exe_dir() {
        let ctx = RunContext::from_config(&RunnerConfig::default()).unwrap();
        assert!(ctx.runtime_dir.is_absolute());
    }
}
