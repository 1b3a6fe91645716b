/// Shell integration modules
///
/// Shell detection, history file parsing, and rc-file setup for
/// incremental history.

pub mod history;
pub mod history_setup;
pub mod shell_detector;

pub use history::HistoryReader;
pub use history_setup::{HistorySetup, SetupOutcome};
pub use shell_detector::{Shell, ShellDetector};
