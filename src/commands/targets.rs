use crate::build::BundlerConfig;
use crate::core::context::PipelineContext;
use crate::core::error::PackResult;

/// Print the build matrix, or the full bundler hand-off as JSON
pub fn run_targets(ctx: &PipelineContext, json: bool) -> PackResult<()> {
  let bundler = BundlerConfig::from_config(&ctx.config)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&bundler)?);
    return Ok(());
  }

  println!("🎯 Build targets for {} ({})", bundler.name, bundler.input.display());
  println!();
  println!("{:<8} {:<8} FILE", "FORMAT", "MINIFY");
  println!("{:-<48}", "");
  for target in bundler.output.targets() {
    println!(
      "{:<8} {:<8} {}",
      target.format,
      if target.minify { "yes" } else { "no" },
      target.file.display()
    );
  }
  println!();
  if let Some(banner) = &bundler.banner {
    println!("Banner: {}", banner.display());
  }
  println!("{} target(s)", bundler.output.targets().len());

  Ok(())
}
