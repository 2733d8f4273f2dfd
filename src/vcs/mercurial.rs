use crate::error::{Result, RevstatsError};
use std::path::Path;
use std::process::Command;

/// `{date}` of every changeset, e.g. `1704067200.0-3600`.
pub(super) fn commit_dates(path: &Path) -> Result<Vec<String>> {
    let out = Command::new("hg")
        .args(["log", "--template", "{date}\\n", "-R"])
        .arg(path)
        .output()?;

    if !out.status.success() {
        return Err(RevstatsError::Backend {
            backend: "hg",
            message: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&out.stdout)
        .split('\n')
        .map(str::to_string)
        .collect())
}
