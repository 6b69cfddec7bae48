//! pwexec - Universal Executor for Playwright Snippets
//!
//! The entry point: parses the invocation, builds the run context, and
//! drives the stages in order. Every stage short-circuits the run on
//! failure except artifact reclamation, which is best-effort.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use pwexec::artifact;
use pwexec::config;
use pwexec::context::RunContext;
use pwexec::error::RunError;
use pwexec::exec;
use pwexec::runtime;
use pwexec::script;
use pwexec::source;
use pwexec::types::LogLevel;

/// pwexec - universal executor for Playwright automation snippets
#[derive(Parser, Debug)]
#[command(
    name = "pwexec",
    version,
    about = "Universal executor for Playwright automation snippets",
    long_about = "Executes Playwright automation code from a script file, inline \
                  arguments, or stdin, wrapping bare command sequences into a \
                  complete script before running them."
)]
struct Cli {
    /// A script file path, or free-form code to execute inline
    #[arg(value_name = "CODE", trailing_var_arg = true, allow_hyphen_values = true)]
    code: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let config = config::load_config();
    init_tracing(config.log_level);

    let ctx = match RunContext::from_config(&config) {
        Ok(ctx) => ctx,
        Err(e) => fatal(&e),
    };

    if let Err(e) = run(&cli, &ctx) {
        if matches!(e.downcast_ref::<RunError>(), Some(RunError::InputAbsent)) {
            print_usage();
            std::process::exit(2);
        }
        fatal(&e);
    }
}

/// The run pipeline: reclaim, guard, resolve, wrap, launch.
fn run(cli: &Cli, ctx: &RunContext) -> Result<()> {
    println!("Playwright runner - universal executor\n");

    // Best-effort cleanup of generated scripts left by earlier runs.
    artifact::reclaim_stale(&ctx.temp_dir, ctx.reclaim_max_age);

    runtime::ensure_runtime(ctx)?;

    let fragment = source::resolve_fragment(&cli.code)?;
    let wrapped = script::wrap(&fragment, ctx);

    println!("\nStarting automation...\n");
    exec::launch(ctx, &wrapped)?;

    // The generated file stays behind on purpose: the interpreter may
    // still be running it. A later run reclaims it once it is old enough.
    Ok(())
}

// ---- Reporting --------------------------------------------------------------

fn print_usage() {
    eprintln!("{}", "No code to execute".red());
    eprintln!("Usage:");
    eprintln!("  pwexec script.js          # Execute file");
    eprintln!("  pwexec \"code here\"        # Execute inline");
    eprintln!("  cat script.js | pwexec    # Execute from stdin");
}

fn fatal(err: &anyhow::Error) -> ! {
    eprintln!("{} {:#}", "error:".red(), err);
    std::process::exit(1);
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(level.as_tracing_level())
        .with_target(false)
        .init();
}
