//! COPY step: move resolved artifacts into the distribution directory
//!
//! Each artifact is read and written on its own. A failure on one file is
//! logged and recorded in the report; the others still copy.

use super::resolver::{FileResolver, Precedence, ResolvedArtifact};
use crate::core::context::PipelineContext;
use crate::core::error::{PackResult, ResultExt};
use crate::ui::progress::FileProgress;
use crate::utils::sha256_hex;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// An artifact that landed in the distribution directory
#[derive(Debug, Clone, Serialize)]
pub struct CopiedArtifact {
  pub name: String,
  pub source: PathBuf,
  pub precedence: Precedence,
  pub destination: PathBuf,
  pub digest: String,
}

/// Which half of a copy failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStage {
  Read,
  Write,
}

/// A per-file copy failure. Never fatal to the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactCopyError {
  pub name: String,
  pub path: PathBuf,
  pub stage: CopyStage,
  pub reason: String,
}

impl fmt::Display for ArtifactCopyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let verb = match self.stage {
      CopyStage::Read => "read",
      CopyStage::Write => "write",
    };
    write!(f, "failed to {} {} ({}): {}", verb, self.name, self.path.display(), self.reason)
  }
}

/// Outcome of the COPY step
#[derive(Debug, Clone, Default, Serialize)]
pub struct CopyReport {
  pub copied: Vec<CopiedArtifact>,
  pub skipped: Vec<ArtifactCopyError>,
}

impl CopyReport {
  pub fn is_complete(&self) -> bool {
    self.skipped.is_empty()
  }
}

/// Copy every configured artifact that resolves, staging copies first.
///
/// Creating the staging or distribution directory is the only fatal failure.
pub fn copy_artifacts(ctx: &PipelineContext) -> PackResult<CopyReport> {
  let staging = ctx.staging_dir();
  let dist = ctx.dist_dir();

  fs::create_dir_all(&staging).with_context(|| format!("Failed to create staging directory {}", staging.display()))?;
  fs::create_dir_all(&dist).with_context(|| format!("Failed to create distribution directory {}", dist.display()))?;

  let resolver = FileResolver::new(&staging, &ctx.root);
  let resolved = resolver.resolve_all(&ctx.config.project.artifacts);

  for name in &ctx.config.project.artifacts {
    if !resolved.iter().any(|r| &r.name == name) {
      tracing::debug!("{} not found in staging or project root, skipping", name);
    }
  }

  let mut report = CopyReport::default();
  let mut progress = FileProgress::for_terminal(resolved.len(), "Copying artifacts");

  for artifact in &resolved {
    match copy_one(artifact, &dist) {
      Ok(copied) => {
        tracing::info!("copied {} from {}", copied.name, copied.source.display());
        report.copied.push(copied);
      }
      Err(err) => {
        tracing::warn!("{}", err);
        report.skipped.push(err);
      }
    }
    if let Some(progress) = progress.as_mut() {
      progress.inc();
    }
  }

  Ok(report)
}

fn copy_one(artifact: &ResolvedArtifact, dist: &Path) -> Result<CopiedArtifact, ArtifactCopyError> {
  let data = fs::read(&artifact.path).map_err(|e| ArtifactCopyError {
    name: artifact.name.clone(),
    path: artifact.path.clone(),
    stage: CopyStage::Read,
    reason: e.to_string(),
  })?;

  let destination = dist.join(&artifact.name);
  fs::write(&destination, &data).map_err(|e| ArtifactCopyError {
    name: artifact.name.clone(),
    path: destination.clone(),
    stage: CopyStage::Write,
    reason: e.to_string(),
  })?;

  Ok(CopiedArtifact {
    name: artifact.name.clone(),
    source: artifact.path.clone(),
    precedence: artifact.precedence,
    destination,
    digest: sha256_hex(&data),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::config::PackConfig;
  use tempfile::TempDir;

  fn context(dir: &TempDir) -> PipelineContext {
    PipelineContext::with_config(dir.path(), PackConfig::default())
  }

  #[test]
  fn test_copies_staged_over_root() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("temp")).unwrap();
    fs::write(dir.path().join("LICENSE"), "root license").unwrap();
    fs::write(dir.path().join("temp/LICENSE"), "staged license").unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    let report = copy_artifacts(&context(&dir)).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.copied.len(), 2);
    assert_eq!(fs::read_to_string(dir.path().join("dist/LICENSE")).unwrap(), "staged license");
    assert_eq!(report.copied[0].precedence, Precedence::Staging);
    assert_eq!(report.copied[0].digest, sha256_hex(b"staged license"));
  }

  #[test]
  fn test_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let report = copy_artifacts(&context(&dir)).unwrap();

    assert!(report.copied.is_empty());
    assert!(dir.path().join("temp").is_dir());
    assert!(dir.path().join("dist").is_dir());
  }

  #[test]
  fn test_write_failure_skips_only_that_artifact() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "# readme").unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    // A directory squatting on the destination makes the write fail
    fs::create_dir_all(dir.path().join("dist/README.md")).unwrap();

    let report = copy_artifacts(&context(&dir)).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "README.md");
    assert_eq!(report.skipped[0].stage, CopyStage::Write);
    assert_eq!(report.copied.len(), 1);
    assert_eq!(report.copied[0].name, "package.json");
    assert!(dir.path().join("dist/package.json").is_file());
  }

  #[test]
  fn test_copy_overwrites_previous_output() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("dist")).unwrap();
    fs::write(dir.path().join("dist/package.json"), "stale contents that are longer").unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    copy_artifacts(&context(&dir)).unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("dist/package.json")).unwrap(), "{}");
  }

  #[test]
  fn test_unwritable_dist_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("dist"), "a file, not a directory").unwrap();

    assert!(copy_artifacts(&context(&dir)).is_err());
  }
}
