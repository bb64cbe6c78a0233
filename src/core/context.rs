//! Pipeline context - build once, pass to every step
//!
//! The packaging steps never share mutable state. Everything an attempt needs
//! (resolved directories, configuration, the license year, the revision) lives
//! in one immutable `PipelineContext` built in `main.rs`; everything an attempt
//! produces is returned from the step that produced it.
//!
//! ```text
//! main.rs:
//!   PipelineContext::build() -> &PipelineContext
//!   |
//!   v
//! pipeline::Pipeline::run(&ctx)
//!   copy_artifacts(&ctx) -> format_readme(&ctx) -> format_license(&ctx)
//! ```

use crate::core::config::{PackConfig, Revision};
use crate::core::error::PackResult;
use chrono::Datelike;
use std::path::{Path, PathBuf};

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub retries: Option<u32>,
  pub revision: Option<String>,
  pub year: Option<i32>,
}

/// Immutable per-run state shared by all pipeline steps.
#[derive(Debug, Clone)]
pub struct PipelineContext {
  /// Project root (absolute path)
  pub root: PathBuf,

  /// Loaded pack.toml (or defaults)
  pub config: PackConfig,

  /// Year written into the LICENSE
  pub year: i32,
}

impl PipelineContext {
  /// Build the context for a project root, loading pack.toml if present.
  pub fn build(root: &Path) -> PackResult<Self> {
    let config = PackConfig::load(root)?;
    Ok(Self::with_config(root, config))
  }

  /// Build the context from an already loaded configuration.
  pub fn with_config(root: &Path, config: PackConfig) -> Self {
    Self {
      root: root.to_path_buf(),
      config,
      year: chrono::Local::now().year(),
    }
  }

  /// Staging directory (`<root>/temp` by default)
  pub fn staging_dir(&self) -> PathBuf {
    self.root.join(&self.config.project.staging_dir)
  }

  /// Distribution directory (`<root>/dist` by default)
  pub fn dist_dir(&self) -> PathBuf {
    self.root.join(&self.config.project.dist_dir)
  }

  /// Manifest path (`<root>/package.json` by default)
  pub fn manifest_path(&self) -> PathBuf {
    self.root.join(&self.config.project.manifest)
  }

  /// Apply command-line overrides on top of pack.toml and re-validate.
  pub fn apply(&mut self, overrides: &Overrides) -> PackResult<()> {
    if let Some(retries) = overrides.retries {
      self.config.pipeline.retries = retries;
    }
    if let Some(revision) = &overrides.revision {
      self.config.pipeline.revision = revision.parse()?;
    }
    if let Some(year) = overrides.year {
      self.year = year;
    }
    self.config.validate()
  }

  pub fn revision(&self) -> Revision {
    self.config.pipeline.revision
  }

  pub fn retries(&self) -> u32 {
    self.config.pipeline.retries
  }
}
