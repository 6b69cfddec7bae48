//! Automation Runtime Guard
//!
//! Ensures the Playwright package is resolvable from the runner's runtime
//! directory before anything executes, installing it on first use. The
//! install runs as two external commands with their output streamed to
//! the operator; a failed install fails the whole run.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Result};
use colored::Colorize;
use tracing::debug;

use crate::context::RunContext;
use crate::error::RunError;

/// Returns `true` when the Playwright package is resolvable from
/// `runtime_dir`.
pub fn is_runtime_installed(runtime_dir: &Path) -> bool {
    runtime_dir
        .join("node_modules")
        .join("playwright")
        .join("package.json")
        .is_file()
}

/// Guarantee the automation runtime is present, installing it if needed.
///
/// A successful install is re-probed before the run proceeds, so an
/// install that reports success without leaving the package resolvable
/// still fails fast here.
pub fn ensure_runtime(ctx: &RunContext) -> Result<()> {
    if is_runtime_installed(&ctx.runtime_dir) {
        debug!("playwright resolvable from {}", ctx.runtime_dir.display());
        return Ok(());
    }

    println!("{}", "Playwright not found. Installing...".yellow());

    if let Err(err) = install_runtime(ctx) {
        return Err(err.context(RunError::Install {
            runtime_dir: ctx.runtime_dir.clone(),
        }));
    }

    if !is_runtime_installed(&ctx.runtime_dir) {
        bail!(RunError::Install {
            runtime_dir: ctx.runtime_dir.clone(),
        });
    }

    println!("{}", "Playwright installed successfully".green());
    Ok(())
}

/// The two collaborator commands: package install, then the browser-engine
/// asset fetch.
fn install_runtime(ctx: &RunContext) -> Result<()> {
    run_install_command(ctx, "npm", &["install"])?;
    run_install_command(ctx, "npx", &["playwright", "install", "chromium"])?;
    Ok(())
}

/// Run one install command in the runtime directory with inherited stdio.
fn run_install_command(ctx: &RunContext, program: &str, args: &[&str]) -> Result<()> {
    debug!("running `{} {}`", program, args.join(" "));

    let status = Command::new(program)
        .args(args)
        .current_dir(&ctx.runtime_dir)
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => bail!("`{} {}` exited with {}", program, args.join(" "), status),
        Err(e) => bail!("failed to run `{} {}`: {}", program, args.join(" "), e),
    }
}
