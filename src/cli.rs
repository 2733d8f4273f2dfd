use crate::clock::Zone;
use crate::heat::{HeatView, WindowMode, YearFilter};
use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "revstats")]
#[command(about = "Commit calendar, productivity and streaks for Git, Mercurial and Subversion repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[clap(flatten)]
    pub view: HeatArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to a single repository (skips the repository list)")]
    pub repo: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to the repository list [default: ~/.revstats.json]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Only count commits made in this year (YYYY)")]
    pub year: Option<String>,

    #[arg(long, global = true, help = "Group commits by UTC days instead of local days")]
    pub utc: bool,

    #[arg(long, global = true, help = "Cover the last 365 days instead of whole calendar years")]
    pub trailing: bool,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

impl CommonArgs {
    pub fn zone(&self) -> Zone {
        if self.utc {
            Zone::Utc
        } else {
            Zone::Local
        }
    }

    pub fn year_filter(&self) -> YearFilter {
        YearFilter::parse(self.year.as_deref())
    }

    pub fn window_mode(&self) -> WindowMode {
        if self.trailing {
            WindowMode::Trailing
        } else {
            WindowMode::CalendarYears
        }
    }
}

/// Presentation flags of the calendar, accepted with or without `heat`.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct HeatArgs {
    #[arg(long, help = "Output the full report as JSON")]
    pub json: bool,

    #[arg(long, help = "Show streak and productivity data")]
    pub details: bool,

    #[arg(long, help = "List days without commits between the first commit and today")]
    pub missing: bool,

    #[arg(long, help = "Render one continuous calendar instead of one per year")]
    pub unified: bool,
}

impl HeatArgs {
    /// Flags given before the subcommand are combined with the ones after it.
    pub fn merge(self, other: HeatArgs) -> HeatArgs {
        HeatArgs {
            json: self.json || other.json,
            details: self.details || other.details,
            missing: self.missing || other.missing,
            unified: self.unified || other.unified,
        }
    }

    pub fn view(&self) -> HeatView {
        HeatView {
            json: self.json,
            details: self.details,
            missing: self.missing,
            unified: self.unified,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the commit calendar (default)
    Heat(HeatArgs),
    /// Export per-day commit counts
    Export {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init(self.common.verbose);

        match self.command {
            None => crate::heat::exec(self.common, self.view.view()),
            Some(Commands::Heat(args)) => {
                crate::heat::exec(self.common, self.view.merge(args).view())
            }
            Some(Commands::Export { json, ndjson }) => {
                crate::export::exec(self.common, json || self.view.json, ndjson)
            }
        }
    }
}
