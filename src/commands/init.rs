use crate::core::config::PackConfig;
use crate::core::error::{PackError, PackResult};
use std::path::Path;

/// Write a default pack.toml at the project root
pub fn run_init(root: &Path, force: bool) -> PackResult<()> {
  if let Some(existing) = PackConfig::find_config_path(root)
    && !force
  {
    return Err(PackError::with_help(
      format!("Configuration already exists at {}", existing.display()),
      "Use --force to overwrite it with the defaults",
    ));
  }

  PackConfig::default().save(root)?;

  println!("✅ Created {}", root.join("pack.toml").display());
  println!();
  println!("Next steps:");
  println!("  pack-rail targets   # review the build matrix");
  println!("  pack-rail run       # package into dist/");
  Ok(())
}
