use crate::config::Repository;
use crate::vcs::CommitSource;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info, warn};

/// Canonical commit timestamps of one working copy.
///
/// A path without a known backend, or whose backend fails, yields nothing.
pub fn fetch_repository(path: &Path) -> Vec<i64> {
    let Some(source) = CommitSource::detect(path) else {
        debug!(path = %path.display(), "no version control backend detected");
        return Vec::new();
    };

    match source.list_timestamps(path) {
        Ok(batch) => {
            let timestamps = batch.normalize();
            info!(
                path = %path.display(),
                backend = %source,
                commits = timestamps.len(),
                "read commit history"
            );
            timestamps
        }
        Err(e) => {
            warn!(path = %path.display(), backend = %source, error = %e, "skipping repository");
            Vec::new()
        }
    }
}

/// Reads every repository in turn and concatenates their timestamps.
pub fn fetch_all(repos: &[Repository], show_progress: bool) -> Vec<i64> {
    let pb = if show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut timestamps = Vec::new();
    for repo in repos {
        pb.set_message(format!("Reading {}...", repo.name));
        timestamps.extend(fetch_repository(&repo.path));
        pb.inc(1);
    }

    pb.finish_and_clear();
    timestamps
}
