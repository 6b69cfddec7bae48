//! Source Resolver
//!
//! Obtains the raw automation code for a run, in precedence order: a file
//! named by the first argument, the arguments themselves as inline code,
//! then piped standard input. A run with no source at all is the only
//! case that resolves to nothing.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::RunError;
use crate::types::{CodeFragment, SourceKind};

/// Resolve the code fragment to execute. First match wins; a readable
/// source is always consumed to completion.
pub fn resolve_fragment(args: &[String]) -> Result<CodeFragment> {
    if let Some(fragment) = resolve_from_args(args)? {
        return Ok(fragment);
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        println!("Reading from stdin");
        let mut text = String::new();
        stdin
            .lock()
            .read_to_string(&mut text)
            .map_err(|e| RunError::ReadSource {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        return Ok(CodeFragment::new(text, SourceKind::Stdin));
    }

    Err(RunError::InputAbsent.into())
}

/// Resolve from the argument list alone: an existing file path beats
/// inline code. Returns `Ok(None)` when there are no arguments.
fn resolve_from_args(args: &[String]) -> Result<Option<CodeFragment>> {
    let first = match args.first() {
        Some(f) => f,
        None => return Ok(None),
    };

    let path = Path::new(first);
    if path.exists() {
        let text = fs::read_to_string(path).map_err(|e| RunError::ReadSource {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!("Executing file: {}", path.display());
        return Ok(Some(CodeFragment::new(
            text,
            SourceKind::File(path.to_path_buf()),
        )));
    }

    println!("Executing inline code");
    Ok(Some(CodeFragment::new(args.join(" "), SourceKind::Inline)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_existing_file_path_wins_over_inline() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("snippet.js");
        let mut f = fs::File::create(&script).unwrap();
        writeln!(f, "await page.reload();").unwrap();

        let args = vec![script.to_string_lossy().to_string()];
        let fragment = resolve_from_args(&args).unwrap().unwrap();

        assert_eq!(fragment.origin, SourceKind::File(script));
        assert!(fragment.text.contains("await page.reload();"));
    }

    #[test]
    fn test_nonexistent_path_is_treated_as_inline_code() {
        let args = vec![
            "await".to_string(),
            "page.goto('https://example.com');".to_string(),
        ];
        let fragment = resolve_from_args(&args).unwrap().unwrap();

        assert_eq!(fragment.origin, SourceKind::Inline);
        assert_eq!(fragment.text, "await page.goto('https://example.com');");
    }

    #[test]
    fn test_no_args_resolves_to_nothing() {
        assert!(resolve_from_args(&[]).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A directory passes the existence check but cannot be read as a file.
        let args = vec![dir.path().to_string_lossy().to_string()];
        let err = resolve_from_args(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::ReadSource { .. })
        ));
    }
}
