//! Tests for author identity and LICENSE handling

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_local_identity_beats_global() -> Result<()> {
  let project = TestProject::new()?;
  project.init_git("Local Dev")?;
  project.set_global_user("Global Dev")?;

  project.run(&["license", "--year", "2031"])?;
  assert_eq!(
    project.read_file("dist/LICENSE")?,
    "MIT License\n\nCopyright (c) 2031 Local Dev\n"
  );
  Ok(())
}

#[test]
fn test_global_identity_outside_repository() -> Result<()> {
  let project = TestProject::new()?;
  project.set_global_user("Global Dev")?;

  let output = project.run(&["license", "--year", "2031"])?;
  assert!(stdout(&output).contains("git config --global user.name"));
  assert!(project.read_file("dist/LICENSE")?.ends_with("2031 Global Dev\n"));
  Ok(())
}

#[test]
fn test_global_identity_from_xdg_config() -> Result<()> {
  let project = TestProject::new()?;
  let xdg = tempfile::TempDir::new()?;
  std::fs::create_dir_all(xdg.path().join("git"))?;
  std::fs::write(xdg.path().join("git/config"), "[user]\n\tname = Xdg Dev\n")?;

  let output = project.run_with_env(&["license", "--year", "2031"], &[("XDG_CONFIG_HOME", xdg.path())])?;

  assert!(output.status.success(), "{}", stderr(&output));
  assert!(project.read_file("dist/LICENSE")?.ends_with("2031 Xdg Dev\n"));
  Ok(())
}

#[test]
fn test_global_identity_from_git_config_global() -> Result<()> {
  let project = TestProject::new()?;
  let config_dir = tempfile::TempDir::new()?;
  let config = config_dir.path().join("custom-gitconfig");
  std::fs::write(&config, "[user]\n\tname = Custom Dev\n")?;

  let output = project.run_with_env(&["license", "--year", "2031"], &[("GIT_CONFIG_GLOBAL", config.as_path())])?;

  assert!(output.status.success(), "{}", stderr(&output));
  assert!(project.read_file("dist/LICENSE")?.ends_with("2031 Custom Dev\n"));
  Ok(())
}

#[test]
fn test_default_identity_when_git_has_none() -> Result<()> {
  let project = TestProject::new()?;

  project.run(&["license", "--year", "2031"])?;
  assert!(project.read_file("dist/LICENSE")?.ends_with("2031 Unknown Author\n"));
  Ok(())
}

#[test]
fn test_configured_default_identity() -> Result<()> {
  let project = TestProject::new()?;
  project.write("pack.toml", "[identity]\ndefault = \"Acme Corp\"\n")?;

  project.run(&["license", "--year", "2031"])?;
  assert!(project.read_file("dist/LICENSE")?.ends_with("2031 Acme Corp\n"));
  Ok(())
}

#[test]
fn test_initial_revision_requires_identity() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.run_raw(&["run", "--revision", "initial"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("❌"));
  // COPY ran, FORMAT_LICENSE did not
  assert_eq!(project.read_file("dist/LICENSE")?, LICENSE);
  Ok(())
}

#[test]
fn test_hardened_missing_license_falls_back() -> Result<()> {
  let project = TestProject::new()?;
  project.remove("LICENSE")?;

  let output = project.run(&["run", "--year", "2031"])?;
  assert!(stdout(&output).contains("Done with warnings"));

  let license = project.read_file("dist/LICENSE")?;
  assert!(license.starts_with("MIT License\n\nCopyright (c) 2031 Unknown Author\n"));
  assert!(license.contains("THE SOFTWARE IS PROVIDED \"AS IS\""));
  Ok(())
}

#[test]
fn test_retrying_missing_license_fails() -> Result<()> {
  let project = TestProject::new()?;
  project.remove("LICENSE")?;

  let output = project.run_raw(&["run", "--revision", "retrying", "--retries", "3"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("after 3 attempt(s)"));
  Ok(())
}
