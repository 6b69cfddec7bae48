//! Script Module
//!
//! Classification and wrapping of automation code fragments: a structural
//! scan derives the marker facts, and a fixed set of templates turns any
//! fragment into a complete script with uniform failure handling.

pub mod scan;
pub mod wrap;

pub use scan::{scan_markers, MarkerFacts};
pub use wrap::{classify, wrap, WrappedScript, Wrapping};
