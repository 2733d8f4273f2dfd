//! Commit calendars, productivity and streak statistics for Git, Mercurial
//! and Subversion working copies.

pub mod calendar;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod heat;
pub mod logging;
pub mod model;
pub mod report;
pub mod stats;
pub mod streak;
pub mod timestamp;
pub mod util;
pub mod vcs;
