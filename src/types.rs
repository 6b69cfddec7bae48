//! Shared Type Definitions
//!
//! Core data model for the runner: resolved code fragments and the
//! structural facts classification is based on.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::script::scan::{scan_markers, MarkerFacts};

// ─── Code Fragments ──────────────────────────────────────────────

/// Where a code fragment came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Read from a file named by the first argument.
    File(PathBuf),
    /// Joined from the free-form arguments.
    Inline,
    /// Read from piped standard input.
    Stdin,
}

/// A fragment of automation code, immutable once resolved.
///
/// The two marker facts are derived from the text at construction time by
/// a structural scan, so classification never re-reads the source.
#[derive(Clone, Debug)]
pub struct CodeFragment {
    pub text: String,
    pub origin: SourceKind,
    pub facts: MarkerFacts,
}

impl CodeFragment {
    pub fn new(text: String, origin: SourceKind) -> Self {
        let facts = scan_markers(&text);
        Self {
            text,
            origin,
            facts,
        }
    }
}

// ─── Logging ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Map the configured level onto a `tracing` level filter.
    pub fn as_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
