use crate::core::context::PipelineContext;
use crate::core::error::PackResult;
use crate::license::LicenseOutcome;
use crate::pipeline::{LicenseStep, Pipeline, PipelineReport};
use crate::utils::display_relative;

use super::precedence_label;

/// Run the full packaging pipeline
pub fn run_pipeline(ctx: &PipelineContext, json: bool) -> PackResult<()> {
  let report = Pipeline::new(ctx).run()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_report(ctx, &report);
  }

  Ok(())
}

fn print_report(ctx: &PipelineContext, report: &PipelineReport) {
  println!(
    "📦 Packaged {} (revision {}, attempt {}/{})",
    display_relative(&ctx.dist_dir(), &ctx.root),
    report.revision,
    report.attempts,
    ctx.retries()
  );
  println!();

  println!("  Copied:");
  if report.copy.copied.is_empty() {
    println!("    (nothing)");
  }
  for copied in &report.copy.copied {
    println!("    {:<20} from {}", copied.name, precedence_label(copied.precedence));
  }
  for skipped in &report.copy.skipped {
    println!("    ⚠️  {}", skipped);
  }
  println!();

  println!("  README:   {}", display_relative(&report.readme.destination, &ctx.root));
  match &report.license {
    LicenseStep::Written(license) => {
      let how = match license.outcome {
        LicenseOutcome::Templated => "templated",
        LicenseOutcome::Fallback => "fallback text",
      };
      println!(
        "  LICENSE:  {} ({}, {} {})",
        display_relative(&license.document.destination, &ctx.root),
        how,
        license.year,
        license.author
      );
    }
    LicenseStep::Failed { reason } => println!("  LICENSE:  ⚠️  not written: {}", reason),
  }
  println!();

  if report.is_degraded() {
    println!("⚠️  Done with warnings");
  } else {
    println!("✅ Done");
  }
}
