//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const MANIFEST: &str = r#"{
  "name": "shell-script",
  "version": "1.2.0",
  "description": "Run shell scripts from JS",
  "keywords": [],
  "private": false,
  "repository": { "type": "git", "url": "https://example.com/shell-script.git" },
  "dependencies": { "lodash": "^4.17.21", "chalk": "^5.0.0" },
  "devDependencies": { "typescript": "^5.0.0" },
  "scripts": { "build": "rollup -c", "test": "vitest" }
}
"#;

pub const README: &str = "# shell-script\n\n<!-- BASIC -->\n\n<!-- PKGS -->\n\n<!-- DEV_PKGS -->\n\n<!-- CMD -->\n";

pub const LICENSE: &str = "MIT License\n\nCopyright (c) <!-- year --> <!-- author -->\n";

/// A library project with a manifest, README and LICENSE template.
///
/// `HOME` for every spawned process points at a private directory so the
/// developer's global git identity never leaks into a test.
pub struct TestProject {
  _root: TempDir,
  home: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Project with package.json, README.md and LICENSE at the root
  pub fn new() -> Result<Self> {
    let project = Self::empty()?;
    project.write("package.json", MANIFEST)?;
    project.write("README.md", README)?;
    project.write("LICENSE", LICENSE)?;
    Ok(project)
  }

  /// Project directory with no files at all
  pub fn empty() -> Result<Self> {
    let root = TempDir::new()?;
    let home = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self {
      _root: root,
      home,
      path,
    })
  }

  /// Write a file relative to the project root, creating parent directories
  pub fn write(&self, rel: &str, content: &str) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
  }

  pub fn remove(&self, rel: &str) -> Result<()> {
    std::fs::remove_file(self.path.join(rel))?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, rel: &str) -> bool {
    self.path.join(rel).exists()
  }

  /// Read a file
  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  /// Make the project a git repository with a local user.name
  pub fn init_git(&self, user_name: &str) -> Result<()> {
    git(&self.path, self.home.path(), &["init", "--initial-branch=main"])?;
    git(&self.path, self.home.path(), &["config", "user.name", user_name])?;
    Ok(())
  }

  /// Set user.name in the isolated global git config
  pub fn set_global_user(&self, user_name: &str) -> Result<()> {
    std::fs::write(
      self.home.path().join(".gitconfig"),
      format!("[user]\n\tname = {}\n", user_name),
    )?;
    Ok(())
  }

  /// Run pack-rail and require success
  pub fn run(&self, args: &[&str]) -> Result<Output> {
    let output = self.run_raw(args)?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);
      anyhow::bail!(
        "pack-rail command failed: pack-rail {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        stdout,
        stderr
      );
    }

    Ok(output)
  }

  /// Run pack-rail and return the output whatever the exit status
  pub fn run_raw(&self, args: &[&str]) -> Result<Output> {
    self.run_with_env(args, &[])
  }

  /// Run pack-rail with extra environment variables, whatever the exit status
  pub fn run_with_env(&self, args: &[&str], envs: &[(&str, &Path)]) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pack-rail"));
    cmd
      .current_dir(&self.path)
      .args(args)
      .env("HOME", self.home.path())
      .env_remove("RUST_LOG")
      .env_remove("GIT_DIR")
      .env_remove("XDG_CONFIG_HOME")
      .env_remove("GIT_CONFIG_GLOBAL");
    for (key, value) in envs {
      cmd.env(key, value);
    }
    cmd.output().context("Failed to run pack-rail")
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, home: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .env("HOME", home)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
