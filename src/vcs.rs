//! Read-only version-control queries.
//!
//! Release dates and the current revision come from git. Every failure
//! (no such tag, not a repository, git not installed) is reported as `None`.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

pub trait VersionControl {
    /// Commit timestamp of `tag` as printed by `git log --format=%ai`,
    /// e.g. `2017-12-06 08:14:52 +0100`.
    fn tag_timestamp(&self, tag: &str) -> Option<String>;

    /// Current revision hash.
    fn revision(&self) -> Option<String>;
}

/// Runs the `git` executable inside a repository directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl AsRef<Path>) -> Self {
        GitCli {
            repo: repo.as_ref().to_path_buf(),
        }
    }

    fn query(&self, args: &[&str]) -> Option<String> {
        let output = match Command::new("git").arg("-C").arg(&self.repo).args(args).output() {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "git unavailable");
                return None;
            }
        };
        if !output.status.success() {
            debug!(
                args = ?args,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git query failed"
            );
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl VersionControl for GitCli {
    fn tag_timestamp(&self, tag: &str) -> Option<String> {
        self.query(&["log", "-1", "--format=%ai", tag])
    }

    fn revision(&self) -> Option<String> {
        self.query(&["rev-parse", "HEAD"])
    }
}
