//! Invoking the git command line

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, SyncError};

/// Something that can run a git subcommand and hand back its stdout
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// Runs the system `git` binary inside a working tree
pub struct SystemGit {
    work_dir: PathBuf,
}

impl SystemGit {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");

        // Non-ASCII paths are otherwise printed C-quoted.
        let output = Command::new("git")
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| SyncError::VersionControl {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SyncError::VersionControl {
                command,
                stderr: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Split git's newline separated path output, dropping blank lines
pub fn parse_paths(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        let stdout = "logsheets/a.json\n\n  teams/b.json  \nimages/c.png\n";
        assert_eq!(
            parse_paths(stdout),
            vec!["logsheets/a.json", "teams/b.json", "images/c.png"]
        );
    }

    #[test]
    fn test_parse_paths_empty_output() {
        assert!(parse_paths("").is_empty());
        assert!(parse_paths("\n\n").is_empty());
    }

    #[test]
    fn test_failed_command_surfaces_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit::new(dir.path());

        // Not a repository, so git itself fails (or is missing entirely).
        let err = git.run(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap_err();
        match err {
            SyncError::VersionControl { command, stderr } => {
                assert_eq!(command, "rev-parse --abbrev-ref HEAD");
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_ascii_paths_are_not_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit::new(dir.path());
        git.run(&["init", "--quiet"]).unwrap();

        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/café.png"), b"png").unwrap();
        std::fs::write(dir.path().join("images/plain.png"), b"png").unwrap();

        let untracked = parse_paths(
            &git.run(&["ls-files", "--others", "--exclude-standard"])
                .unwrap(),
        );
        assert_eq!(untracked, vec!["images/café.png", "images/plain.png"]);
    }
}
