//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod contract;
mod explain;
mod output;

pub use check::{BuildableSummary, CheckReport};
pub use contract::ContractReport;
pub use explain::ExplainReport;
pub use output::{Report, TerminalOutput};

#[cfg(test)]
pub(crate) use output::RecordingOutput;
