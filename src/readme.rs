//! FORMAT_DOC step: render the README from package.json

use crate::artifacts::FileResolver;
use crate::core::context::PipelineContext;
use crate::core::error::{PackResult, ResultExt};
use crate::manifest::ProjectMetadata;
use crate::template::sections::readme_sections;
use crate::template::{WrittenDocument, read_template, write_document};
use std::fs;

/// Parse the manifest, render the README template and write it to the distribution directory.
///
/// A missing/invalid manifest or an unreadable README fails the step.
pub fn format_readme(ctx: &PipelineContext) -> PackResult<WrittenDocument> {
  let metadata = ProjectMetadata::load(&ctx.manifest_path())?;
  tracing::debug!(
    "manifest: {} basic field(s), {} dependencies, {} dev dependencies, {} scripts",
    metadata.basic.len(),
    metadata.dependencies.len(),
    metadata.dev_dependencies.len(),
    metadata.scripts.len()
  );

  let resolver = FileResolver::new(ctx.staging_dir(), &ctx.root);
  let readme_name = &ctx.config.project.readme;
  let (source, template) = read_template(&resolver, readme_name)?;

  let rendered = template.render(&readme_sections(&metadata, &ctx.config.readme.script_pattern));

  let dist = ctx.dist_dir();
  fs::create_dir_all(&dist).with_context(|| format!("Failed to create distribution directory {}", dist.display()))?;
  let written = write_document(&dist, readme_name, &rendered, Some(&source.path))?;

  tracing::info!("formatted {} from {}", readme_name, source.path.display());
  Ok(written)
}
