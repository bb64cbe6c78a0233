use crate::core::context::PipelineContext;
use crate::core::error::PackResult;
use crate::license::LicenseOutcome;
use crate::pipeline::{LicenseStep, Pipeline};
use crate::utils::display_relative;

/// Resolve the author and write the LICENSE, honouring the revision's failure policy
pub fn run_license(ctx: &PipelineContext, json: bool) -> PackResult<()> {
  let step = Pipeline::new(ctx).license()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&step)?);
    return Ok(());
  }

  match step {
    LicenseStep::Written(report) => {
      let icon = match report.outcome {
        LicenseOutcome::Templated => "✅",
        LicenseOutcome::Fallback => "⚠️ ",
      };
      println!(
        "{} {} for {} ({})",
        icon,
        display_relative(&report.document.destination, &ctx.root),
        report.author,
        report.year
      );
      println!("   Author from: {}", report.author_source);
    }
    LicenseStep::Failed { reason } => {
      println!("⚠️  LICENSE not written: {}", reason);
    }
  }

  Ok(())
}
