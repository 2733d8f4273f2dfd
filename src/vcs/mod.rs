//! Version control backends that can list commit timestamps.

mod git;
mod mercurial;
mod subversion;

use crate::error::Result;
use crate::timestamp::{RawBatch, ScaleHint};
use std::fmt;
use std::path::Path;

/// A backend able to list the commit times of a working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSource {
    Git,
    Mercurial,
    Subversion,
}

impl CommitSource {
    /// Probe order used by [`CommitSource::detect`].
    pub const ALL: [CommitSource; 3] = [CommitSource::Git, CommitSource::Mercurial, CommitSource::Subversion];

    /// Backend owning `path`, judged by its marker file.
    pub fn detect(path: &Path) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| path.join(source.marker()).is_file())
    }

    /// File whose presence identifies a working copy of this backend.
    pub fn marker(&self) -> &'static str {
        match self {
            CommitSource::Git => ".git/config",
            CommitSource::Mercurial => ".hg/hgrc",
            CommitSource::Subversion => ".svn/wc.db",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommitSource::Git => "git",
            CommitSource::Mercurial => "hg",
            CommitSource::Subversion => "svn",
        }
    }

    pub fn scale(&self) -> ScaleHint {
        match self {
            CommitSource::Git => ScaleHint::Seconds,
            CommitSource::Mercurial => ScaleHint::Fractional,
            CommitSource::Subversion => ScaleHint::OverLong,
        }
    }

    /// Raw commit timestamps of the repository at `path`.
    pub fn list_timestamps(&self, path: &Path) -> Result<RawBatch> {
        let samples = match self {
            CommitSource::Git => git::commit_times(path)?,
            CommitSource::Mercurial => mercurial::commit_dates(path)?,
            CommitSource::Subversion => subversion::changed_dates(path)?,
        };
        Ok(RawBatch::new(samples, self.scale()))
    }
}

impl fmt::Display for CommitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
