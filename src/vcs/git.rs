use crate::error::Result;
use gix::{discover, ObjectId};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Author time (seconds) of every commit reachable from `HEAD`.
pub(super) fn commit_times(path: &Path) -> Result<Vec<String>> {
    let repo = discover(path)?;
    let mut head = repo.head()?;
    let head_commit = head.peel_to_commit_in_place()?;

    let mut times = Vec::new();
    let mut seen: HashSet<ObjectId> = HashSet::new();
    let mut stack: Vec<ObjectId> = vec![head_commit.id];

    while let Some(commit_id) = stack.pop() {
        if !seen.insert(commit_id) {
            continue;
        }

        let commit = repo.find_commit(commit_id)?;
        times.push(commit.author()?.time()?.seconds.to_string());

        let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
        stack.extend(parents);
    }

    debug!(path = %path.display(), commits = times.len(), "walked git history");
    Ok(times)
}
