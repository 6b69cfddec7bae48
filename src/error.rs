//! Runner Error Taxonomy
//!
//! Fatal error classes a run can end with. Every variant terminates the
//! process with a non-zero status and a message on stderr; nothing is
//! retried. Failures inside the fragment's own execution are not listed
//! here: those are handled by the generated script in its own process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    /// No fragment could be resolved from arguments or stdin.
    #[error("no code to execute")]
    InputAbsent,

    /// The automation runtime is missing and could not be installed.
    #[error("playwright install failed; retry manually in {}", .runtime_dir.display())]
    Install { runtime_dir: PathBuf },

    /// The fragment source exists but could not be read.
    #[error("failed to read {}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The generated script could not be written to the temp directory.
    #[error("failed to write generated script {}", .path.display())]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The interpreter rejected the generated script before running it.
    #[error("generated script {} failed the interpreter's syntax check", .path.display())]
    SyntaxCheck { path: PathBuf },

    /// The interpreter itself could not be started.
    #[error("failed to launch interpreter `{interpreter}`")]
    Launch {
        interpreter: String,
        #[source]
        source: io::Error,
    },
}
