use crate::core::context::PipelineContext;
use crate::core::error::PackResult;
use crate::readme::format_readme;
use crate::utils::display_relative;

/// Render the README without copying artifacts first
pub fn run_readme(ctx: &PipelineContext, json: bool) -> PackResult<()> {
  let written = format_readme(ctx)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&written)?);
    return Ok(());
  }

  let source = written
    .source
    .as_deref()
    .map(|p| display_relative(p, &ctx.root))
    .unwrap_or_default();
  println!(
    "✅ {} -> {}",
    source,
    display_relative(&written.destination, &ctx.root)
  );
  Ok(())
}
