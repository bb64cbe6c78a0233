//! System git backend for configuration lookups
//!
//! pack-rail only ever reads git configuration, so there is no repository
//! handle to open: commands run with `-C <dir>` and tolerate `dir` not being
//! a repository at all.

use crate::core::error::{GitError, PackError, PackResult, ResultExt};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Which git configuration file a lookup reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
  /// `.git/config` of the repository containing the working directory
  Local,
  /// `~/.gitconfig`, `$XDG_CONFIG_HOME/git/config`, or `$GIT_CONFIG_GLOBAL`
  Global,
}

impl ConfigScope {
  fn flag(self) -> &'static str {
    match self {
      ConfigScope::Local => "--local",
      ConfigScope::Global => "--global",
    }
  }
}

impl fmt::Display for ConfigScope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigScope::Local => write!(f, "local"),
      ConfigScope::Global => write!(f, "global"),
    }
  }
}

/// Environment kept for git subprocesses. HOME, XDG_CONFIG_HOME and
/// GIT_CONFIG_GLOBAL decide which file `--global` reads.
const PASSTHROUGH_ENV: [&str; 4] = ["PATH", "HOME", "XDG_CONFIG_HOME", "GIT_CONFIG_GLOBAL"];

/// Git backend using system git (zero crate dependencies)
#[derive(Debug, Clone)]
pub struct SystemGit {
  /// Directory git commands run in
  pub(crate) work_dir: PathBuf,
}

impl SystemGit {
  /// Bind git commands to a working directory
  pub fn at(path: &Path) -> Self {
    Self {
      work_dir: path.to_path_buf(),
    }
  }

  /// Read a single configuration value.
  ///
  /// Returns `Ok(None)` when the key is unset (git exits with status 1).
  /// Any other failure, including a local lookup outside a repository,
  /// is a `GitError`.
  pub fn config_value(&self, scope: ConfigScope, key: &str) -> PackResult<Option<String>> {
    let output = self
      .git_cmd()
      .args(["config", scope.flag(), "--get", key])
      .output()
      .context("Failed to execute git config")?;

    if output.status.code() == Some(1) {
      return Ok(None);
    }

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(PackError::Git(GitError::CommandFailed {
        command: format!("git config {} --get {}", scope.flag(), key),
        stderr: stderr.trim().to_string(),
      }));
    }

    let value = String::from_utf8(output.stdout)?;
    Ok(Some(value.trim().to_string()))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to the bound directory
  /// - Clears environment variables
  /// - Whitelists PATH plus the variables git uses to locate global config
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_dir);

    cmd.env_clear();
    for var in PASSTHROUGH_ENV {
      if let Some(value) = std::env::var_os(var) {
        cmd.env(var, value);
      }
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}
