/// History settings installer
///
/// `replay` reads the shell's history file, but most shells only flush
/// history on exit. This appends the setting that makes the shell write
/// each command as it runs, so recent commands show up right away.

use crate::error::Result;
use crate::shell::Shell;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker comment written above the managed line
const MARKER: &str = "# ez-cmd history settings";

/// What applying the setup did to the rc file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The setting was already present (or the shell needs none)
    AlreadyConfigured,
    /// The setting was appended to an existing rc file
    Updated,
    /// The rc file did not exist and was created
    Created,
}

/// Applies incremental-history settings to the shell's rc file
pub struct HistorySetup {
    shell: Shell,
    rc_path: PathBuf,
}

impl HistorySetup {
    pub fn new(shell: Shell) -> Result<Self> {
        Ok(Self {
            rc_path: shell.rc_file_path()?,
            shell,
        })
    }

    /// Get the rc file this setup manages
    pub fn rc_path(&self) -> &Path {
        &self.rc_path
    }

    /// Line the shell needs for incremental history, if any
    fn setting_line(&self) -> Option<&'static str> {
        match self.shell {
            Shell::Zsh => Some("setopt INC_APPEND_HISTORY"),
            Shell::Bash => Some("PROMPT_COMMAND=\"history -a; $PROMPT_COMMAND\""),
            // Fish appends history incrementally out of the box
            Shell::Fish => None,
        }
    }

    /// Check whether the rc file already carries the setting
    pub fn is_configured(&self) -> bool {
        let line = match self.setting_line() {
            Some(line) => line,
            None => return true,
        };

        match fs::read_to_string(&self.rc_path) {
            Ok(contents) => contents.contains(line),
            Err(_) => false,
        }
    }

    /// Idempotently add the setting to the rc file
    pub fn apply(&self) -> Result<SetupOutcome> {
        let line = match self.setting_line() {
            Some(line) => line,
            None => return Ok(SetupOutcome::AlreadyConfigured),
        };

        if self.rc_path.exists() {
            let mut contents = fs::read_to_string(&self.rc_path)?;
            if contents.contains(line) {
                return Ok(SetupOutcome::AlreadyConfigured);
            }

            if !contents.ends_with('\n') && !contents.is_empty() {
                contents.push('\n');
            }
            contents.push('\n');
            contents.push_str(MARKER);
            contents.push('\n');
            contents.push_str(line);
            contents.push('\n');

            fs::write(&self.rc_path, contents)?;
            Ok(SetupOutcome::Updated)
        } else {
            if let Some(parent) = self.rc_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.rc_path, format!("{}\n{}\n", MARKER, line))?;
            Ok(SetupOutcome::Created)
        }
    }
}
