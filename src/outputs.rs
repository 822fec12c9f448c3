//! Invocation outputs for the hosting CI environment.
//!
//! When `GITHUB_OUTPUT` points at a file, the computed version and its
//! path-safe variant are appended there in `key=value` form. Without the
//! variable the outputs only appear in the run report.

use std::fs::OpenOptions;
use std::io::Write;

use crate::error::Result;
use crate::ui::Reporter;

/// Publish `version` and `safe_version` for the surrounding workflow.
///
/// `safe_version` replaces `/` so the value can name artifacts and paths.
pub fn emit(version: &str, reporter: &Reporter) -> Result<()> {
    let safe_version = version.replace('/', "-");

    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        if !path.is_empty() {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "version={}", version)?;
            writeln!(file, "safe_version={}", safe_version)?;
        }
    }

    reporter.success(&format!("version: {}", version));
    reporter.success(&format!("safe_version: {}", safe_version));

    Ok(())
}
