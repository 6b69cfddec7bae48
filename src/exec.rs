//! Execution Driver
//!
//! Materializes a wrapped script as a uniquely named file in the temp
//! directory and triggers its execution under the configured interpreter.
//! The interpreter's parse-only pass runs first; a failure there is the
//! run's synchronous load failure. The executing child is deliberately
//! not waited on, and the artifact is left for a future run's reclaimer.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use tracing::debug;

use crate::artifact;
use crate::context::RunContext;
use crate::error::RunError;
use crate::script::WrappedScript;

/// Write `script` to a fresh artifact and launch it. Returns once the
/// child is running; its asynchronous work may outlive this process.
pub fn launch(ctx: &RunContext, script: &WrappedScript) -> Result<()> {
    let path = artifact::fresh_artifact_path(&ctx.temp_dir);

    fs::write(&path, &script.text).map_err(|e| RunError::WriteArtifact {
        path: path.clone(),
        source: e,
    })?;
    debug!("wrote {:?} script to {}", script.wrapping, path.display());

    syntax_check(ctx, &path)?;

    let child = Command::new(&ctx.interpreter)
        .arg(&path)
        .spawn()
        .map_err(|e| RunError::Launch {
            interpreter: ctx.interpreter.clone(),
            source: e,
        })?;
    debug!("launched interpreter, pid {}", child.id());

    Ok(())
}

/// Run the interpreter's parse-only pass over the generated script, with
/// stderr inherited so the interpreter's own diagnostics reach the
/// operator.
fn syntax_check(ctx: &RunContext, path: &Path) -> Result<()> {
    let status = Command::new(&ctx.interpreter)
        .arg("--check")
        .arg(path)
        .status()
        .map_err(|e| RunError::Launch {
            interpreter: ctx.interpreter.clone(),
            source: e,
        })?;

    if !status.success() {
        return Err(RunError::SyntaxCheck {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}
