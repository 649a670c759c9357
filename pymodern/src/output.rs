//! Human-readable report rendering.

mod progress;
mod reports;
mod summary;
mod tables;

pub use progress::create_progress_bar;
pub use reports::{print_report, print_report_grouped, print_report_quiet};
pub use summary::{print_header, print_rule_summary};
