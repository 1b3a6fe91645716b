/// Shell history reading
///
/// Parses the shell's history file so `replay` can offer past commands
/// for saving. Entries come back most recent first, de-duplicated, with
/// ez's own invocations filtered out.

use crate::error::{EzError, Result};
use crate::shell::Shell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Reads and filters a shell history file
pub struct HistoryReader {
    shell: Shell,
    path: PathBuf,
}

impl HistoryReader {
    /// Reader for the detected shell's default history file
    pub fn new(shell: Shell) -> Result<Self> {
        Ok(Self {
            path: shell.history_file_path()?,
            shell,
        })
    }

    /// Reader over an explicit history file. Used by tests.
    pub fn with_path<P: AsRef<Path>>(shell: Shell, path: P) -> Self {
        Self {
            shell,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// All usable history entries, most recent first. With a filter,
    /// only entries containing the text (case-insensitive) are kept.
    pub fn entries(&self, filter: Option<&str>) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Err(EzError::Config(format!(
                "Could not find {} history file at {}",
                self.shell,
                self.path.display()
            )));
        }

        // History files routinely contain non-UTF8 bytes; read lossily
        // rather than refusing the whole file.
        let bytes = std::fs::read(&self.path)?;
        let contents = String::from_utf8_lossy(&bytes);

        let needle = filter.map(|f| f.to_lowercase());

        let mut commands = Vec::new();
        for line in contents.lines() {
            let cmd = match self.shell {
                Shell::Zsh => strip_zsh_extended(line),
                Shell::Fish => match strip_fish_entry(line) {
                    Some(cmd) => cmd,
                    None => continue,
                },
                Shell::Bash => line,
            };

            let cmd = cmd.trim();

            // Skip empty lines and ez's own invocations
            if cmd.is_empty() || cmd == "ez" || cmd.starts_with("ez ") {
                continue;
            }

            if let Some(needle) = &needle {
                if !cmd.to_lowercase().contains(needle.as_str()) {
                    continue;
                }
            }

            commands.push(cmd.to_string());
        }

        // Most recent first, keeping only the newest occurrence of each
        commands.reverse();
        let mut seen = HashSet::new();
        commands.retain(|cmd| seen.insert(cmd.clone()));

        Ok(commands)
    }
}

/// Strip the zsh EXTENDED_HISTORY prefix (": <timestamp>:<elapsed>;")
fn strip_zsh_extended(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(": ") {
        if let Some((meta, cmd)) = rest.split_once(';') {
            if !meta.is_empty() && meta.chars().all(|c| c.is_ascii_digit() || c == ':') {
                return cmd;
            }
        }
    }
    line
}

/// Fish stores history as "- cmd: <command>" lines with indented
/// metadata below each one
fn strip_fish_entry(line: &str) -> Option<&str> {
    line.strip_prefix("- cmd: ")
}
