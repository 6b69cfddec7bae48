//! Temporary Artifacts
//!
//! Naming and reclamation of generated script files. A run never deletes
//! the artifact it creates, since the script's asynchronous work can
//! outlive the launcher; files are reclaimed by a later run once their
//! age exceeds the reclaim window. The age threshold is the only safety
//! margin, so the reclaimer is strictly best-effort and never fails a run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Prefix shared by every generated script file.
pub const ARTIFACT_PREFIX: &str = "playwright-exec-";

/// Build a fresh, collision-free artifact path under `temp_dir`.
pub fn fresh_artifact_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join(format!("{}{}.js", ARTIFACT_PREFIX, Uuid::new_v4()))
}

/// Regex matching exactly the artifact naming convention
/// (`playwright-exec-<uuid-v4>.js`). Anything else is never touched.
fn artifact_name_pattern() -> Option<Regex> {
    let pattern = format!(
        r"^{}[0-9a-f]{{8}}-[0-9a-f]{{4}}-[0-9a-f]{{4}}-[0-9a-f]{{4}}-[0-9a-f]{{12}}\.js$",
        regex::escape(ARTIFACT_PREFIX)
    );
    Regex::new(&pattern).ok()
}

/// Delete artifacts in `temp_dir` whose mtime age strictly exceeds
/// `older_than`. Returns the number of files removed.
///
/// Every failure mode is swallowed: a missing temp directory, unreadable
/// entry metadata (skipped, not deleted), and deletes racing a concurrent
/// invocation's reclaimer.
pub fn reclaim_stale(temp_dir: &Path, older_than: Duration) -> usize {
    let pattern = match artifact_name_pattern() {
        Some(p) => p,
        None => return 0,
    };

    let entries = match fs::read_dir(temp_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("skipping artifact reclaim, cannot read {}: {}", temp_dir.display(), e);
            return 0;
        }
    };

    let now = Utc::now();
    let mut removed = 0;

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(n) => n,
            None => continue,
        };
        if !pattern.is_match(name) {
            continue;
        }

        // Entries with unreadable stats are skipped, not deleted.
        let mtime = match entry.metadata().and_then(|m| m.modified()) {
            Ok(t) => DateTime::<Utc>::from(t),
            Err(_) => continue,
        };

        if now.signed_duration_since(mtime) > older_than {
            match fs::remove_file(entry.path()) {
                Ok(()) => {
                    debug!("reclaimed stale artifact {}", name);
                    removed += 1;
                }
                Err(_) => {
                    // Already gone or still in use; either way, not ours to force.
                }
            }
        }
    }

    removed
}
