//! Author identity resolution
//!
//! An [`IdentityChain`] is an ordered list of sources. Each source may fail or
//! come back blank; both count as a miss. The first non-empty trimmed value
//! wins. Adding a source is a matter of pushing onto the chain.

use crate::core::config::{IdentityConfig, Revision};
use crate::core::error::{IdentityError, PackError, PackResult};
use crate::core::vcs::{ConfigScope, SystemGit};
use std::path::Path;

/// A place an author identity can come from
pub trait IdentitySource {
  /// Short description used in logs and error messages
  fn label(&self) -> String;

  /// Look the identity up. `Ok(None)` and errors are both misses.
  fn lookup(&self) -> PackResult<Option<String>>;
}

/// `git config --<scope> <key>`
pub struct GitConfigSource {
  git: SystemGit,
  scope: ConfigScope,
  key: String,
}

impl GitConfigSource {
  pub fn new(dir: &Path, scope: ConfigScope, key: &str) -> Self {
    Self {
      git: SystemGit::at(dir),
      scope,
      key: key.to_string(),
    }
  }
}

impl IdentitySource for GitConfigSource {
  fn label(&self) -> String {
    format!("git config --{} {}", self.scope, self.key)
  }

  fn lookup(&self) -> PackResult<Option<String>> {
    self.git.config_value(self.scope, &self.key)
  }
}

/// A fixed value; never misses unless blank
pub struct LiteralSource(pub String);

impl IdentitySource for LiteralSource {
  fn label(&self) -> String {
    format!("default \"{}\"", self.0)
  }

  fn lookup(&self) -> PackResult<Option<String>> {
    Ok(Some(self.0.clone()))
  }
}

/// A closure-backed source for wiring canned lookups into tests
#[cfg(test)]
pub struct FnSource<F> {
  label: String,
  lookup: F,
}

#[cfg(test)]
impl<F> FnSource<F>
where
  F: Fn() -> PackResult<Option<String>>,
{
  pub fn new(label: impl Into<String>, lookup: F) -> Self {
    Self {
      label: label.into(),
      lookup,
    }
  }
}

#[cfg(test)]
impl<F> IdentitySource for FnSource<F>
where
  F: Fn() -> PackResult<Option<String>>,
{
  fn label(&self) -> String {
    self.label.clone()
  }

  fn lookup(&self) -> PackResult<Option<String>> {
    (self.lookup)()
  }
}

/// A resolved identity and the source that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
  pub value: String,
  pub source: String,
}

/// Ordered fallback lookup
#[derive(Default)]
pub struct IdentityChain {
  sources: Vec<Box<dyn IdentitySource>>,
}

impl IdentityChain {
  pub fn new() -> Self {
    Self { sources: Vec::new() }
  }

  /// Local git config, global git config, then (except in the initial revision) the configured default
  pub fn for_project(root: &Path, config: &IdentityConfig, revision: Revision) -> Self {
    let mut chain = Self::new()
      .with(GitConfigSource::new(root, ConfigScope::Local, &config.key))
      .with(GitConfigSource::new(root, ConfigScope::Global, &config.key));
    if revision.has_identity_default() {
      chain = chain.with(LiteralSource(config.default.clone()));
    }
    chain
  }

  pub fn with(mut self, source: impl IdentitySource + 'static) -> Self {
    self.sources.push(Box::new(source));
    self
  }

  /// First non-empty trimmed value, or `IdentityError::Unresolved`
  pub fn resolve(&self) -> PackResult<ResolvedIdentity> {
    for source in &self.sources {
      match source.lookup() {
        Ok(Some(value)) if !value.trim().is_empty() => {
          let label = source.label();
          tracing::debug!("author identity from {}", label);
          return Ok(ResolvedIdentity {
            value: value.trim().to_string(),
            source: label,
          });
        }
        Ok(_) => tracing::debug!("{}: empty", source.label()),
        Err(err) => tracing::debug!("{}: {}", source.label(), err),
      }
    }

    Err(PackError::Identity(IdentityError::Unresolved {
      sources: self.sources.iter().map(|s| s.label()).collect(),
    }))
  }
}
