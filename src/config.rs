//! Repository list loading.
//!
//! The list lives in `~/.revstats.json` as a JSON object mapping a display
//! name to a working copy path:
//!
//! ```json
//! { "revstats": "~/code/revstats", "website": "/srv/www" }
//! ```

use crate::error::{Result, RevstatsError};
use crate::util::expand_home;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".revstats.json";

/// A named working copy to read commits from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub path: PathBuf,
}

impl Repository {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path: expand_home(path),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Config {
    projects: BTreeMap<String, PathBuf>,
}

impl Config {
    /// `~/.revstats.json`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RevstatsError::Config(format!(
                "missing repository list {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        debug!(path = %path.display(), repositories = config.projects.len(), "loaded repository list");
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Configured repositories in name order, with `~/` expanded.
    pub fn repositories(&self) -> Vec<Repository> {
        self.projects
            .iter()
            .map(|(name, path)| Repository {
                name: name.clone(),
                path: expand_home(path),
            })
            .collect()
    }
}

/// Picks the repositories to analyze: `repo` alone when given, otherwise the
/// list at `config` (or the default location).
pub fn resolve_repositories(repo: Option<&Path>, config: Option<&Path>) -> Result<Vec<Repository>> {
    if let Some(path) = repo {
        return Ok(vec![Repository::from_path(path)]);
    }

    let path = match config {
        Some(path) => expand_home(path),
        None => Config::default_path()
            .ok_or_else(|| RevstatsError::Config("cannot locate the home directory".to_string()))?,
    };
    Ok(Config::load(&path)?.repositories())
}
