//! Code Wrapper
//!
//! Turns a resolved code fragment into a complete, self-contained script.
//! The template is chosen from the two marker facts; every template except
//! the already-complete case carries the same async shell with one
//! centralized failure handler. Wrapping is a pure function of the
//! fragment text and the runtime directory.

use std::path::Path;

use crate::context::RunContext;
use crate::types::CodeFragment;

// ─── Wrapping Decision ───────────────────────────────────────────

/// Which template a fragment receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wrapping {
    /// Loads its own modules and owns an async entry point: only the
    /// module-path prefix is prepended.
    Complete,
    /// A bare sequence of automation commands: full template with imports,
    /// header helpers, and the async shell.
    Bare,
    /// Loads its own modules but lacks an async entry point: module-path
    /// prefix plus the async shell, without the header-helper material.
    Partial,
}

/// The three-way decision table over the marker facts.
pub fn classify(fragment: &CodeFragment) -> Wrapping {
    match (
        fragment.facts.references_module_load,
        fragment.facts.has_async_entry_point,
    ) {
        (true, true) => Wrapping::Complete,
        (false, _) => Wrapping::Bare,
        (true, false) => Wrapping::Partial,
    }
}

/// A fragment wrapped into its final executable form.
#[derive(Clone, Debug)]
pub struct WrappedScript {
    pub text: String,
    pub wrapping: Wrapping,
}

/// Wrap `fragment` according to the decision table.
pub fn wrap(fragment: &CodeFragment, ctx: &RunContext) -> WrappedScript {
    let wrapping = classify(fragment);
    let text = match wrapping {
        Wrapping::Complete => wrap_complete(&fragment.text, &ctx.runtime_dir),
        Wrapping::Bare => wrap_bare(&fragment.text, &ctx.runtime_dir),
        Wrapping::Partial => wrap_partial(&fragment.text, &ctx.runtime_dir),
    };
    WrappedScript { text, wrapping }
}

// ─── Templates ───────────────────────────────────────────────────

/// Module-path prefix pointing resolution at the runner's own
/// dependency directory. Shared by the complete and partial templates.
fn module_path_prefix(runtime_dir: &Path) -> String {
    format!(
        "// Module path setup for execution from the temp directory\n\
         module.paths.unshift('{}/node_modules');\n",
        js_escape(runtime_dir)
    )
}

fn wrap_complete(code: &str, runtime_dir: &Path) -> String {
    format!("{}{}", module_path_prefix(runtime_dir), code)
}

fn wrap_bare(code: &str, runtime_dir: &Path) -> String {
    let dir = js_escape(runtime_dir);
    format!(
        r#"const {{ chromium, firefox, webkit, devices }} = require('{dir}/node_modules/playwright');
const helpers = require('{dir}/lib/helpers');

// Extra headers from environment variables (if configured)
const __extraHeaders = helpers.getExtraHeadersFromEnv();

/**
 * Utility to merge environment headers into context options.
 * Use when creating contexts with raw Playwright API instead of helpers.createContext().
 * @param {{Object}} options - Context options
 * @returns {{Object}} Options with extraHTTPHeaders merged in
 */
function getContextOptionsWithHeaders(options = {{}}) {{
  if (!__extraHeaders) return options;
  return {{
    ...options,
    extraHTTPHeaders: {{
      ...__extraHeaders,
      ...(options.extraHTTPHeaders || {{}})
    }}
  }};
}}

{shell}"#,
        dir = dir,
        shell = async_shell(code),
    )
}

fn wrap_partial(code: &str, runtime_dir: &Path) -> String {
    format!(
        "{}\n{}",
        module_path_prefix(runtime_dir),
        async_shell(code)
    )
}

/// The shared async shell: a rejection handler for failures that escape
/// the fragment's scope, and a single top-level async entry point whose
/// catch arm closes any in-scope browser handle before reporting.
fn async_shell(code: &str) -> String {
    format!(
        r#"process.on('unhandledRejection', (error) => {{
  console.error('Unhandled rejection:', error);
  process.exit(1);
}});

let __browser;
(async () => {{
  try {{
    {code}
  }} catch (error) {{
    // Attempt to close browser on error
    if (typeof browser !== 'undefined') {{
      await browser.close().catch(() => {{}});
    }} else if (typeof __browser !== 'undefined') {{
      await __browser.close().catch(() => {{}});
    }}
    console.error('Automation error:', error.message);
    if (error.stack) {{
      console.error(error.stack);
    }}
    process.exit(1);
  }}
}})();
"#,
        code = code,
    )
}

/// Render a path as the body of a single-quoted JS string literal.
fn js_escape(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
}
