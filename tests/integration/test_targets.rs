//! Tests for the `targets` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_targets_json_has_full_matrix() -> Result<()> {
  let project = TestProject::empty()?;

  let output = project.run(&["targets", "--json"])?;
  let config: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(config["input"], "src/main.ts");
  assert_eq!(config["name"], "ShellScript");
  assert_eq!(config["banner"], "temp/LICENSE");

  let outputs = config["output"].as_array().unwrap();
  assert_eq!(outputs.len(), 8);
  assert_eq!(outputs.iter().filter(|t| t["minify"] == true).count(), 4);
  assert!(outputs.iter().all(|t| t["name"] == "ShellScript"));

  let files: Vec<_> = outputs.iter().map(|t| t["file"].as_str().unwrap()).collect();
  assert!(files.contains(&"dist/bundle-umd.js"));
  assert!(files.contains(&"dist/bundle-cjs.min.js"));
  Ok(())
}

#[test]
fn test_targets_table() -> Result<()> {
  let project = TestProject::empty()?;

  let output = project.run(&["targets"])?;
  let text = stdout(&output);
  assert!(text.contains("8 target(s)"));
  assert!(text.contains("bundle-esm.min.js"));
  Ok(())
}

#[test]
fn test_targets_subset_from_config() -> Result<()> {
  let project = TestProject::empty()?;
  project.write("pack.toml", "[build]\nformats = [\"esm\"]\nout_dir = \"lib\"\n")?;

  let output = project.run(&["targets", "--json"])?;
  let config: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  let files: Vec<_> = config["output"]
    .as_array()
    .unwrap()
    .iter()
    .map(|t| t["file"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(files, vec!["lib/bundle-esm.js", "lib/bundle-esm.min.js"]);
  Ok(())
}

#[test]
fn test_unknown_format_rejected() -> Result<()> {
  let project = TestProject::empty()?;
  project.write("pack.toml", "[build]\nformats = [\"amd\"]\n")?;

  let output = project.run_raw(&["targets"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("amd"));
  Ok(())
}

#[test]
fn test_minified_tag_as_base_format_rejected() -> Result<()> {
  let project = TestProject::empty()?;
  project.write("pack.toml", "[build]\nformats = [\"umd-min\"]\n")?;

  let output = project.run_raw(&["targets"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("'umd-min'"));
  Ok(())
}
