//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let project = TestProject::empty()?;

  project.run(&["init"])?;

  assert!(project.file_exists("pack.toml"));
  let config = project.read_file("pack.toml")?;
  assert!(config.contains("[project]"));
  assert!(config.contains("[pipeline]"));
  assert!(config.contains("retries = 5"));
  assert!(config.contains("revision = \"hardened\""));

  // The written defaults load back cleanly
  project.run(&["targets"])?;
  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let project = TestProject::empty()?;
  project.write("pack.toml", "[pipeline]\nretries = 3\n")?;

  let output = project.run_raw(&["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));
  assert_eq!(project.read_file("pack.toml")?, "[pipeline]\nretries = 3\n");
  Ok(())
}

#[test]
fn test_init_force_overwrites() -> Result<()> {
  let project = TestProject::empty()?;
  project.write("pack.toml", "[pipeline]\nretries = 3\n")?;

  project.run(&["init", "--force"])?;
  assert!(project.read_file("pack.toml")?.contains("retries = 5"));
  Ok(())
}
