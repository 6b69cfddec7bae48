//! pwexec - Universal Executor for Playwright Snippets
//!
//! Resolves a fragment of automation code from a file path, inline
//! arguments, or stdin, classifies how complete it already is, wraps it
//! into a self-contained script, and launches it under a Node-compatible
//! interpreter from a uniquely named temporary file.

pub mod artifact;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod runtime;
pub mod script;
pub mod source;
pub mod types;
