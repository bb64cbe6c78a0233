//! Prioritized artifact lookup across the staging directory and project root

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a candidate path lives. Higher variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
  Root,
  Staging,
}

/// One possible location of an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub path: PathBuf,
  pub precedence: Precedence,
}

/// A logical artifact and the places it may live, highest precedence first
#[derive(Debug, Clone)]
pub struct ArtifactDescriptor {
  pub logical_name: String,
  pub candidates: Vec<Candidate>,
}

impl ArtifactDescriptor {
  pub fn new(logical_name: &str, staging_dir: &Path, root: &Path) -> Self {
    let mut candidates = vec![
      Candidate {
        path: root.join(logical_name),
        precedence: Precedence::Root,
      },
      Candidate {
        path: staging_dir.join(logical_name),
        precedence: Precedence::Staging,
      },
    ];
    candidates.sort_by(|a, b| b.precedence.cmp(&a.precedence));

    Self {
      logical_name: logical_name.to_string(),
      candidates,
    }
  }

  /// First existing candidate, staging before root
  pub fn resolve(&self) -> Option<ResolvedArtifact> {
    self
      .candidates
      .iter()
      .find(|c| c.path.is_file())
      .map(|c| ResolvedArtifact {
        name: self.logical_name.clone(),
        path: c.path.clone(),
        precedence: c.precedence,
      })
  }
}

/// An artifact name bound to the path that won resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
  pub name: String,
  pub path: PathBuf,
  pub precedence: Precedence,
}

/// Resolves logical artifact names against a staging directory and a project root.
///
/// A staging copy always wins over a root copy of the same name, regardless of
/// which one is newer.
#[derive(Debug, Clone)]
pub struct FileResolver {
  staging_dir: PathBuf,
  root: PathBuf,
}

impl FileResolver {
  pub fn new(staging_dir: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
    Self {
      staging_dir: staging_dir.into(),
      root: root.into(),
    }
  }

  pub fn descriptor(&self, name: &str) -> ArtifactDescriptor {
    ArtifactDescriptor::new(name, &self.staging_dir, &self.root)
  }

  /// Resolve a single name
  pub fn resolve(&self, name: &str) -> Option<ResolvedArtifact> {
    self.descriptor(name).resolve()
  }

  /// Resolve every name, keeping input order and dropping names found nowhere
  pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<ResolvedArtifact> {
    names.iter().filter_map(|n| self.resolve(n.as_ref())).collect()
  }
}
