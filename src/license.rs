//! FORMAT_LICENSE step: fill the LICENSE template with year and author
//!
//! In the hardened revision an unreadable LICENSE source does not fail the
//! step; a complete MIT license is written instead.

use crate::artifacts::FileResolver;
use crate::core::context::PipelineContext;
use crate::core::error::{PackResult, ResultExt};
use crate::identity::{IdentityChain, ResolvedIdentity};
use crate::template::{Marker, SectionMap, WrittenDocument, read_template, write_document};
use serde::Serialize;
use std::fs;

/// How the LICENSE in the distribution directory was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseOutcome {
  /// Rendered from the LICENSE template
  Templated,
  /// Built-in license text
  Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct LicenseReport {
  pub outcome: LicenseOutcome,
  pub author: String,
  pub author_source: String,
  pub year: i32,
  pub document: WrittenDocument,
}

pub fn license_sections<'a>(year: i32, author: &'a str) -> SectionMap<'a> {
  let mut map = SectionMap::new();
  map
    .insert(Marker::Year, move || year.to_string())
    .insert(Marker::Author, move || author.to_string());
  map
}

/// Self-contained MIT license used when the LICENSE template cannot be read
pub fn fallback_license(year: i32, author: &str) -> String {
  format!(
    r#"MIT License

Copyright (c) {year} {author}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#
  )
}

/// Resolve the author, then render the LICENSE into the distribution directory.
///
/// An unresolved identity always fails. An unreadable template fails unless
/// the revision degrades LICENSE failures, in which case the fallback is written.
pub fn format_license(ctx: &PipelineContext, chain: &IdentityChain) -> PackResult<LicenseReport> {
  let identity = chain.resolve()?;

  let dist = ctx.dist_dir();
  fs::create_dir_all(&dist).with_context(|| format!("Failed to create distribution directory {}", dist.display()))?;

  let resolver = FileResolver::new(ctx.staging_dir(), &ctx.root);
  let license_name = &ctx.config.project.license;

  match read_template(&resolver, license_name) {
    Ok((source, template)) => {
      let rendered = template.render(&license_sections(ctx.year, &identity.value));
      let document = write_document(&dist, license_name, &rendered, Some(&source.path))?;
      tracing::info!("formatted {} for {} ({})", license_name, identity.value, ctx.year);
      Ok(report(LicenseOutcome::Templated, identity, ctx.year, document))
    }
    Err(err) if ctx.revision().degrades_license() => {
      tracing::warn!("{}; writing fallback license", err);
      write_fallback(ctx, identity)
    }
    Err(err) => Err(err),
  }
}

/// Write the built-in license for an already resolved identity
pub fn write_fallback(ctx: &PipelineContext, identity: ResolvedIdentity) -> PackResult<LicenseReport> {
  let dist = ctx.dist_dir();
  fs::create_dir_all(&dist).with_context(|| format!("Failed to create distribution directory {}", dist.display()))?;

  let text = fallback_license(ctx.year, &identity.value);
  let document = write_document(&dist, &ctx.config.project.license, &text, None)?;
  Ok(report(LicenseOutcome::Fallback, identity, ctx.year, document))
}

fn report(outcome: LicenseOutcome, identity: ResolvedIdentity, year: i32, document: WrittenDocument) -> LicenseReport {
  LicenseReport {
    outcome,
    author: identity.value,
    author_source: identity.source,
    year,
    document,
  }
}
