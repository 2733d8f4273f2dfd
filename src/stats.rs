use crate::model::HistoryMap;
use serde::Serialize;

/// Number of shades used for active days.
pub const INTENSITY_LEVELS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductivityStats {
    /// Commits on the busiest day.
    pub most: u32,
    /// Commits on the least busy day that had any.
    pub less: u32,
    pub total: u64,
}

impl Default for ProductivityStats {
    fn default() -> Self {
        Self { most: 0, less: 1, total: 0 }
    }
}

impl ProductivityStats {
    pub fn from_history(history: &HistoryMap) -> Self {
        let active = history.values().copied().filter(|&count| count > 0);

        let mut stats = Self::default();
        let mut least: Option<u32> = None;
        for count in active {
            stats.most = stats.most.max(count);
            least = Some(least.map_or(count, |l| l.min(count)));
            stats.total += u64::from(count);
        }
        if let Some(least) = least {
            stats.less = least;
        }
        stats
    }

    /// Shade (1..=5) for an active day relative to the busiest day; 0 for no commits.
    pub fn intensity(&self, commits: u32) -> u32 {
        if commits == 0 || self.most == 0 {
            return 0;
        }
        let scaled = (u64::from(commits) * u64::from(INTENSITY_LEVELS)).div_ceil(u64::from(self.most));
        scaled.clamp(1, u64::from(INTENSITY_LEVELS)) as u32
    }
}
