//! Tests for the `run` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_run_populates_dist() -> Result<()> {
  let project = TestProject::new()?;
  project.init_git("Local Dev")?;

  let output = project.run(&["run", "--year", "2030"])?;
  assert!(stdout(&output).contains("✅ Done"));

  assert!(project.file_exists("dist/package.json"));
  assert_eq!(project.read_file("dist/package.json")?, MANIFEST);

  let readme = project.read_file("dist/README.md")?;
  assert!(readme.starts_with("# shell-script\n\nBasic info:\n* name: shell-script\n* version: 1.2.0"));
  assert!(readme.contains("* keywords: ..."));
  assert!(readme.contains("* repository: https://example.com/shell-script.git"));
  assert!(!readme.contains("private"));
  assert!(readme.contains("Dependencies used:\n* lodash\n* chalk"));
  assert!(readme.contains("Dev dependencies used:\n* typescript"));
  assert!(readme.contains("Available scripts:\n* npm|pnpm|yarn run build\n* npm|pnpm|yarn run test"));
  assert!(!readme.contains("<!--"));

  assert_eq!(
    project.read_file("dist/LICENSE")?,
    "MIT License\n\nCopyright (c) 2030 Local Dev\n"
  );

  // Source files are never touched
  assert_eq!(project.read_file("README.md")?, README);
  Ok(())
}

#[test]
fn test_staged_files_override_root() -> Result<()> {
  let project = TestProject::new()?;
  project.write("temp/README.md", "# staged\n<!-- PKGS -->\n")?;
  project.write("temp/package.json", "{\"staged\": true}")?;

  project.run(&["run"])?;

  // README is templated from the staged copy; the manifest is always read from the root
  let readme = project.read_file("dist/README.md")?;
  assert!(readme.starts_with("# staged\nDependencies used:\n* lodash"));
  assert_eq!(project.read_file("dist/package.json")?, "{\"staged\": true}");
  Ok(())
}

#[test]
fn test_missing_markers_are_appended() -> Result<()> {
  let project = TestProject::new()?;
  project.write("README.md", "# bare")?;

  project.run(&["run"])?;

  let readme = project.read_file("dist/README.md")?;
  assert!(readme.starts_with("# bare\n"));
  assert!(readme.contains("Dependencies used:"));
  assert!(readme.contains("Dev dependencies used:"));
  assert!(readme.contains("Available scripts:"));
  assert!(readme.contains("Basic info:"));
  Ok(())
}

#[test]
fn test_rerun_is_idempotent() -> Result<()> {
  let project = TestProject::new()?;
  project.set_global_user("Global Dev")?;

  project.run(&["run", "--year", "2030"])?;
  let readme = project.read_file("dist/README.md")?;
  let license = project.read_file("dist/LICENSE")?;

  project.run(&["run", "--year", "2030"])?;
  assert_eq!(project.read_file("dist/README.md")?, readme);
  assert_eq!(project.read_file("dist/LICENSE")?, license);
  Ok(())
}

#[test]
fn test_missing_manifest_exhausts_retries() -> Result<()> {
  let project = TestProject::new()?;
  project.remove("package.json")?;

  let output = project.run_raw(&["run", "--retries", "2"])?;

  assert_eq!(output.status.code(), Some(1));
  let err = stderr(&output);
  assert!(err.contains("❌ Packaging failed after 2 attempt(s)"));
  assert!(err.contains("package.json"));
  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.run(&["run", "--json", "--year", "2030"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(report["attempts"], 1);
  assert_eq!(report["revision"], "hardened");
  assert_eq!(report["license"]["status"], "written");
  assert_eq!(report["license"]["outcome"], "templated");
  assert_eq!(report["license"]["author"], "Unknown Author");
  assert_eq!(report["readme"]["digest"].as_str().map(str::len), Some(64));

  let copied: Vec<_> = report["copy"]["copied"]
    .as_array()
    .unwrap()
    .iter()
    .map(|c| c["name"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(copied, vec!["LICENSE", "README.md", "package.json"]);
  Ok(())
}

#[test]
fn test_invalid_config_exits_2() -> Result<()> {
  let project = TestProject::new()?;
  project.write("pack.toml", "[pipeline]\nretries = 0\n")?;

  let output = project.run_raw(&["run"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("pipeline.retries"));
  assert!(!project.file_exists("dist"));
  Ok(())
}

#[test]
fn test_unknown_revision_exits_2() -> Result<()> {
  let project = TestProject::new()?;

  let output = project.run_raw(&["run", "--revision", "final"])?;
  assert_eq!(output.status.code(), Some(2));
  Ok(())
}

#[test]
fn test_log_file_is_appended() -> Result<()> {
  let project = TestProject::new()?;

  project.run(&["run", "--log-file", "pack.log"])?;
  let first = project.read_file("pack.log")?;
  assert!(first.contains("formatted README.md"));

  project.run(&["run", "--log-file", "pack.log"])?;
  let second = project.read_file("pack.log")?;
  assert!(second.starts_with(&first));
  assert!(second.len() > first.len());
  Ok(())
}
