//! Packaging pipeline
//!
//! ```text
//! COPY -> FORMAT_DOC -> FORMAT_LICENSE -> DONE
//!   ^                                      |
//!   +------ retryable failure (budget) ----+
//! ```
//!
//! An attempt runs the steps in order. A failed attempt is thrown away and the
//! next one starts again at COPY; every output is overwritten, so attempts are
//! independent. In the hardened revision a FORMAT_LICENSE failure never
//! restarts the attempt.

pub mod retry;

use crate::artifacts::{CopyReport, copy_artifacts};
use crate::core::config::Revision;
use crate::core::context::PipelineContext;
use crate::core::error::PackResult;
use crate::identity::{IdentityChain, ResolvedIdentity};
use crate::license::{LicenseReport, format_license, write_fallback};
use crate::readme::format_readme;
use crate::template::WrittenDocument;
use serde::Serialize;
use std::fmt;

pub use retry::run_bounded;

/// Pipeline states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
  Copy,
  FormatDoc,
  FormatLicense,
  Done,
}

impl Step {
  pub fn next(self) -> Self {
    match self {
      Step::Copy => Step::FormatDoc,
      Step::FormatDoc => Step::FormatLicense,
      Step::FormatLicense | Step::Done => Step::Done,
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Step::Copy => "COPY",
      Step::FormatDoc => "FORMAT_DOC",
      Step::FormatLicense => "FORMAT_LICENSE",
      Step::Done => "DONE",
    };
    write!(f, "{}", name)
  }
}

/// What FORMAT_LICENSE ended with
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LicenseStep {
  Written(LicenseReport),
  /// Hardened revision only: nothing could be written, the run still succeeds
  Failed { reason: String },
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
  /// 1-based number of the attempt that succeeded
  pub attempts: u32,
  pub revision: Revision,
  pub copy: CopyReport,
  pub readme: WrittenDocument,
  pub license: LicenseStep,
}

impl PipelineReport {
  /// True when a file was skipped or the LICENSE had to degrade
  pub fn is_degraded(&self) -> bool {
    !self.copy.is_complete()
      || match &self.license {
        LicenseStep::Written(report) => report.outcome == crate::license::LicenseOutcome::Fallback,
        LicenseStep::Failed { .. } => true,
      }
  }
}

/// Everything a run needs besides the context
pub struct Pipeline<'a> {
  ctx: &'a PipelineContext,
  identity: IdentityChain,
}

impl<'a> Pipeline<'a> {
  /// Pipeline with the project identity chain (git local, git global, default)
  pub fn new(ctx: &'a PipelineContext) -> Self {
    let identity = IdentityChain::for_project(&ctx.root, &ctx.config.identity, ctx.revision());
    Self { ctx, identity }
  }

  /// Replace the identity chain
  #[cfg(test)]
  pub fn with_identity(mut self, identity: IdentityChain) -> Self {
    self.identity = identity;
    self
  }

  /// Run attempts until one succeeds or the retry budget is spent
  pub fn run(&self) -> PackResult<PipelineReport> {
    let budget = self.ctx.retries();
    tracing::debug!("revision {}, {} attempt(s) allowed", self.ctx.revision(), budget);
    run_bounded(budget, |number| self.attempt(number))
  }

  /// One full pass from COPY to DONE
  pub fn attempt(&self, number: u32) -> PackResult<PipelineReport> {
    let mut step = Step::Copy;
    let result = self.run_steps(number, &mut step);
    if let Err(err) = &result {
      tracing::warn!("attempt {}/{} failed at {}: {}", number, self.ctx.retries(), step, err);
    }
    result
  }

  fn run_steps(&self, number: u32, step: &mut Step) -> PackResult<PipelineReport> {
    tracing::debug!("attempt {}: {}", number, step);
    let copy = copy_artifacts(self.ctx)?;
    for skipped in &copy.skipped {
      tracing::debug!("skipped: {}", skipped);
    }

    *step = step.next();
    tracing::debug!("attempt {}: {}", number, step);
    let readme = format_readme(self.ctx)?;

    *step = step.next();
    tracing::debug!("attempt {}: {}", number, step);
    let license = self.license()?;

    *step = step.next();
    tracing::debug!("attempt {}: {}", number, step);

    Ok(PipelineReport {
      attempts: number,
      revision: self.ctx.revision(),
      copy,
      readme,
      license,
    })
  }

  /// FORMAT_LICENSE on its own, with the revision's failure policy
  pub fn license(&self) -> PackResult<LicenseStep> {
    match format_license(self.ctx, &self.identity) {
      Ok(report) => Ok(LicenseStep::Written(report)),
      Err(err) if self.ctx.revision().degrades_license() => Ok(self.degrade(err.to_string())),
      Err(err) => Err(err),
    }
  }

  fn degrade(&self, reason: String) -> LicenseStep {
    tracing::warn!("FORMAT_LICENSE failed: {}; writing fallback license", reason);

    let identity = self.identity.resolve().unwrap_or_else(|_| ResolvedIdentity {
      value: self.ctx.config.identity.default.clone(),
      source: "default".to_string(),
    });

    match write_fallback(self.ctx, identity) {
      Ok(report) => LicenseStep::Written(report),
      Err(err) => {
        tracing::error!("fallback license not written: {}", err);
        LicenseStep::Failed {
          reason: err.to_string(),
        }
      }
    }
  }
}
