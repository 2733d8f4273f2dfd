pub mod aggregate;
pub mod exec;
pub mod fetch;
pub mod output;

pub use aggregate::{aggregate, AnalysisWindow, History, WindowMode, YearFilter};
pub use exec::{build_report, exec};
pub use fetch::{fetch_all, fetch_repository};
pub use output::{month_header, output_heatmap, output_json, render_rows};

/// What the `heat` command prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeatView {
    pub json: bool,
    pub details: bool,
    pub missing: bool,
    pub unified: bool,
}
