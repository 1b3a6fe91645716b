/// Sequence execution
///
/// Hands each rendered step to the shell in order and stops at the first
/// non-zero exit status, like chaining the steps with &&.

use crate::error::{EzError, Result};
use tokio::process::Command;

/// Shell used to interpret rendered steps
const SHELL: &str = "sh";

/// Runs rendered command strings through the shell
#[derive(Default)]
pub struct Runner;

impl Runner {
    pub fn new() -> Self {
        Self
    }

    /// Run steps strictly sequentially; later steps may depend on side
    /// effects of earlier ones. Returns the number of executed steps, or
    /// `StepFailed` carrying the failing step's exit status.
    pub async fn run_sequence(&self, steps: &[String]) -> Result<usize> {
        for (index, step) in steps.iter().enumerate() {
            tracing::debug!("running step {}: {}", index + 1, step);

            let status = Command::new(SHELL).arg("-c").arg(step).status().await?;

            if !status.success() {
                return Err(EzError::StepFailed {
                    step: index + 1,
                    // A step killed by a signal has no exit code to
                    // propagate; report plain failure.
                    status: status.code().unwrap_or(1),
                });
            }
        }

        Ok(steps.len())
    }
}
