/// Shell detection logic
///
/// Detects which shell the user is running and provides shell-specific
/// history and rc-file paths.

use crate::error::{EzError, Result};
use std::env;
use std::path::PathBuf;

/// Supported shells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    /// Get the shell name as a string
    pub fn name(&self) -> &str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
        }
    }

    /// History file this shell writes
    pub fn history_file_path(&self) -> Result<PathBuf> {
        let home = home_dir()?;

        let path = match self {
            Shell::Bash => home.join(".bash_history"),
            Shell::Zsh => home.join(".zsh_history"),
            Shell::Fish => home.join(".local/share/fish/fish_history"),
        };

        Ok(path)
    }

    /// RC file holding the shell's interactive configuration
    pub fn rc_file_path(&self) -> Result<PathBuf> {
        let home = home_dir()?;

        let path = match self {
            Shell::Bash => {
                // Prefer .bashrc, fallback to .bash_profile
                let bashrc = home.join(".bashrc");
                if bashrc.exists() {
                    bashrc
                } else {
                    home.join(".bash_profile")
                }
            }
            Shell::Zsh => home.join(".zshrc"),
            Shell::Fish => home.join(".config/fish/config.fish"),
        };

        Ok(path)
    }
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| EzError::Config("Could not determine home directory".to_string()))
}

/// Shell detector
pub struct ShellDetector;

impl ShellDetector {
    /// Detect the current shell from the SHELL environment variable
    pub fn detect() -> Result<Shell> {
        if let Ok(shell_path) = env::var("SHELL") {
            let shell_name = shell_path.split('/').last().unwrap_or("").to_lowercase();

            return match shell_name.as_str() {
                "bash" => Ok(Shell::Bash),
                "zsh" => Ok(Shell::Zsh),
                "fish" => Ok(Shell::Fish),
                _ => Err(EzError::Config(format!(
                    "Unsupported shell: {}",
                    shell_name
                ))),
            };
        }

        Err(EzError::Config(
            "Could not detect shell. Please set $SHELL environment variable.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_name() {
        assert_eq!(Shell::Bash.name(), "bash");
        assert_eq!(Shell::Zsh.name(), "zsh");
        assert_eq!(Shell::Fish.name(), "fish");
    }

    #[test]
    fn test_shell_display() {
        assert_eq!(Shell::Zsh.to_string(), "zsh");
    }

    #[test]
    fn test_history_file_paths() {
        let zsh = Shell::Zsh.history_file_path().unwrap();
        assert!(zsh.ends_with(".zsh_history"));

        let bash = Shell::Bash.history_file_path().unwrap();
        assert!(bash.ends_with(".bash_history"));

        let fish = Shell::Fish.history_file_path().unwrap();
        assert!(fish.ends_with("fish_history"));
    }

    #[test]
    fn test_rc_file_path() {
        // Should not panic
        let _ = Shell::Bash.rc_file_path();
        let _ = Shell::Zsh.rc_file_path();
        let _ = Shell::Fish.rc_file_path();
    }
}
