//! Build target matrix handed to the external bundler
//!
//! Every base format is built twice, plain and minified. Tags are the format
//! name with an optional `-min` suffix; the suffix is stripped from the
//! descriptor's format and turned into a `minify` stage instead.

use crate::core::config::PackConfig;
use crate::core::error::{ConfigError, PackError, PackResult};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Base module formats, in output order
pub const BASE_FORMATS: [&str; 4] = ["umd", "iife", "esm", "cjs"];

/// Suffix that marks a minified tag
pub const MINIFY_SUFFIX: &str = "-min";

/// Output file for every tag
pub const OUTPUT_FILE_NAMES: [(&str, &str); 8] = [
  ("umd", "bundle-umd.js"),
  ("iife", "bundle-iife.js"),
  ("esm", "bundle-esm.js"),
  ("cjs", "bundle-cjs.js"),
  ("umd-min", "bundle-umd.min.js"),
  ("iife-min", "bundle-iife.min.js"),
  ("esm-min", "bundle-esm.min.js"),
  ("cjs-min", "bundle-cjs.min.js"),
];

/// Post-processing requested from the bundler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
  /// Size reduction (terser or equivalent)
  Minify,
}

/// One compiled output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
  pub format: String,
  pub file: PathBuf,
  pub minify: bool,
  /// Global name the bundle exposes (umd/iife)
  pub name: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub stages: Vec<Stage>,
}

impl BuildTarget {
  /// Descriptor for one tag; `file_name` comes from the output table
  fn from_tag(tag: &str, file_name: &str, out_dir: &Path, name: &str) -> Self {
    let (format, minify) = match tag.strip_suffix(MINIFY_SUFFIX) {
      Some(base) => (base, true),
      None => (tag, false),
    };

    Self {
      format: format.to_string(),
      file: out_dir.join(file_name),
      minify,
      name: name.to_string(),
      stages: if minify { vec![Stage::Minify] } else { Vec::new() },
    }
  }
}

fn file_name_for(tag: &str) -> Option<&'static str> {
  OUTPUT_FILE_NAMES.iter().find(|(t, _)| *t == tag).map(|(_, f)| *f)
}

/// Tags for a list of base formats: all plain tags, then all minified tags
pub fn tags<S: AsRef<str>>(formats: &[S]) -> Vec<String> {
  let plain = formats.iter().map(|f| f.as_ref().to_string());
  let minified = formats.iter().map(|f| format!("{}{}", f.as_ref(), MINIFY_SUFFIX));
  plain.chain(minified).collect()
}

/// The ordered list of build targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildMatrix {
  targets: Vec<BuildTarget>,
}

impl BuildMatrix {
  /// Expand base formats into plain and minified targets.
  ///
  /// Fails if a base format already carries the minify suffix, a tag has no
  /// output file, or two tags would write the same file.
  pub fn from_formats<S: AsRef<str>>(formats: &[S], out_dir: &Path, name: &str) -> PackResult<Self> {
    if let Some(format) = formats.iter().find(|f| f.as_ref().ends_with(MINIFY_SUFFIX)) {
      return Err(PackError::Config(ConfigError::InvalidValue {
        field: "build.formats".to_string(),
        reason: format!(
          "'{}' is a minified tag; list the base format and both variants are built",
          format.as_ref()
        ),
      }));
    }

    let mut seen_files = HashSet::new();
    let mut targets = Vec::new();

    for tag in tags(formats) {
      let file_name = file_name_for(&tag).ok_or_else(|| {
        PackError::Config(ConfigError::UnknownFormat {
          format: tag.strip_suffix(MINIFY_SUFFIX).unwrap_or(tag.as_str()).to_string(),
        })
      })?;

      if !seen_files.insert(file_name) {
        return Err(PackError::Config(ConfigError::InvalidValue {
          field: "build.formats".to_string(),
          reason: format!("'{}' would overwrite {}", tag, file_name),
        }));
      }

      targets.push(BuildTarget::from_tag(&tag, file_name, out_dir, name));
    }

    Ok(Self { targets })
  }

  pub fn from_config(config: &PackConfig) -> PackResult<Self> {
    Self::from_formats(&config.build.formats, &config.build.out_dir, &config.build.name)
  }

  pub fn targets(&self) -> &[BuildTarget] {
    &self.targets
  }
}

/// Everything the external bundler needs, serialised as JSON
#[derive(Debug, Clone, Serialize)]
pub struct BundlerConfig {
  pub input: PathBuf,
  pub name: String,
  /// LICENSE prepended to every bundle
  #[serde(skip_serializing_if = "Option::is_none")]
  pub banner: Option<PathBuf>,
  pub output: BuildMatrix,
}

impl BundlerConfig {
  pub fn from_config(config: &PackConfig) -> PackResult<Self> {
    Ok(Self {
      input: config.build.input.clone(),
      name: config.build.name.clone(),
      banner: Some(config.project.staging_dir.join(&config.project.license)),
      output: BuildMatrix::from_config(config)?,
    })
  }
}
