use crate::core::error::{ConfigError, PackError, PackResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for pack-rail
/// Searched in order: pack.toml, .pack.toml, .config/pack.toml
///
/// Every field has a default, so a project without any config file packages
/// with the stock layout (`temp/` staging, `dist/` output, `package.json`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackConfig {
  #[serde(default)]
  pub project: ProjectConfig,
  #[serde(default)]
  pub pipeline: PipelineConfig,
  #[serde(default)]
  pub identity: IdentityConfig,
  #[serde(default)]
  pub readme: ReadmeConfig,
  #[serde(default)]
  pub build: BuildConfig,
}

/// Project layout, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Staging directory whose artifacts override the project root's copies
  #[serde(default = "default_staging_dir")]
  pub staging_dir: PathBuf,

  /// Distribution directory that receives the packaged artifacts
  #[serde(default = "default_dist_dir")]
  pub dist_dir: PathBuf,

  /// Manifest path (always read from the project root)
  #[serde(default = "default_manifest")]
  pub manifest: PathBuf,

  /// README template name
  #[serde(default = "default_readme")]
  pub readme: String,

  /// LICENSE template name
  #[serde(default = "default_license")]
  pub license: String,

  /// Artifacts copied into the distribution directory, in copy order
  #[serde(default = "default_artifacts")]
  pub artifacts: Vec<String>,
}

fn default_staging_dir() -> PathBuf {
  PathBuf::from("temp")
}

fn default_dist_dir() -> PathBuf {
  PathBuf::from("dist")
}

fn default_manifest() -> PathBuf {
  PathBuf::from("package.json")
}

fn default_readme() -> String {
  "README.md".to_string()
}

fn default_license() -> String {
  "LICENSE".to_string()
}

fn default_artifacts() -> Vec<String> {
  vec![
    "LICENSE".to_string(),
    "README.md".to_string(),
    "README.zh-cn.md".to_string(),
    "package.json".to_string(),
  ]
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      staging_dir: default_staging_dir(),
      dist_dir: default_dist_dir(),
      manifest: default_manifest(),
      readme: default_readme(),
      license: default_license(),
      artifacts: default_artifacts(),
    }
  }
}

/// Which generation of the packaging sequence to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
  /// No literal author default; a missing identity ends the run
  Initial,
  /// Literal author default; LICENSE failures restart the attempt
  Retrying,
  /// LICENSE failures fall back to a built-in license text
  #[default]
  Hardened,
}

impl Revision {
  /// Whether the identity chain ends with the literal default
  pub fn has_identity_default(self) -> bool {
    !matches!(self, Revision::Initial)
  }

  /// Whether LICENSE failures are absorbed instead of restarting the attempt
  pub fn degrades_license(self) -> bool {
    matches!(self, Revision::Hardened)
  }
}

impl fmt::Display for Revision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Revision::Initial => "initial",
      Revision::Retrying => "retrying",
      Revision::Hardened => "hardened",
    };
    write!(f, "{}", name)
  }
}

impl std::str::FromStr for Revision {
  type Err = PackError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "initial" => Ok(Revision::Initial),
      "retrying" => Ok(Revision::Retrying),
      "hardened" => Ok(Revision::Hardened),
      other => Err(PackError::Config(ConfigError::InvalidValue {
        field: "pipeline.revision".to_string(),
        reason: format!("'{}' is not one of initial, retrying, hardened", other),
      })),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
  /// Total attempts before giving up (default: 5)
  #[serde(default = "default_retries")]
  pub retries: u32,

  #[serde(default)]
  pub revision: Revision,
}

fn default_retries() -> u32 {
  5
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      retries: default_retries(),
      revision: Revision::default(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
  /// Git config key queried locally, then globally
  #[serde(default = "default_identity_key")]
  pub key: String,

  /// Literal used when git has nothing
  #[serde(default = "default_identity")]
  pub default: String,
}

fn default_identity_key() -> String {
  "user.name".to_string()
}

fn default_identity() -> String {
  "Unknown Author".to_string()
}

impl Default for IdentityConfig {
  fn default() -> Self {
    Self {
      key: default_identity_key(),
      default: default_identity(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeConfig {
  /// Command shown for each script; `<script>` is replaced by the script name
  #[serde(default = "default_script_pattern")]
  pub script_pattern: String,
}

fn default_script_pattern() -> String {
  "npm|pnpm|yarn run <script>".to_string()
}

impl Default for ReadmeConfig {
  fn default() -> Self {
    Self {
      script_pattern: default_script_pattern(),
    }
  }
}

/// Settings handed to the external bundler alongside the target matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
  /// Bundler entry point
  #[serde(default = "default_input")]
  pub input: PathBuf,

  /// Global name for umd/iife bundles
  #[serde(default = "default_bundle_name")]
  pub name: String,

  /// Directory the bundles are written to
  #[serde(default = "default_out_dir")]
  pub out_dir: PathBuf,

  /// Base formats; each also gets a minified variant
  #[serde(default = "default_formats")]
  pub formats: Vec<String>,
}

fn default_input() -> PathBuf {
  PathBuf::from("src/main.ts")
}

fn default_bundle_name() -> String {
  "ShellScript".to_string()
}

fn default_out_dir() -> PathBuf {
  PathBuf::from("dist")
}

fn default_formats() -> Vec<String> {
  crate::build::BASE_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      input: default_input(),
      name: default_bundle_name(),
      out_dir: default_out_dir(),
      formats: default_formats(),
    }
  }
}

impl PackConfig {
  /// Find config file in search order: pack.toml, .pack.toml, .config/pack.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("pack.toml"),
      path.join(".pack.toml"),
      path.join(".config").join("pack.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the project root, falling back to defaults when no file exists
  pub fn load(path: &Path) -> PackResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!("no pack.toml under {}, using defaults", path.display());
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: PackConfig = toml_edit::de::from_str(&content)?;
    config.validate()?;

    tracing::debug!("loaded config from {}", config_path.display());
    Ok(config)
  }

  /// Save config to pack.toml (default location)
  pub fn save(&self, path: &Path) -> PackResult<()> {
    let config_path = path.join("pack.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Validate configuration values
  pub fn validate(&self) -> PackResult<()> {
    if self.pipeline.retries == 0 {
      return Err(invalid("pipeline.retries", "must allow at least one attempt"));
    }

    for name in self.project.artifacts.iter().chain([&self.project.readme, &self.project.license]) {
      let plain = Path::new(name).file_name().map(|f| f == name.as_str()).unwrap_or(false);
      if !plain {
        return Err(invalid(
          "project.artifacts",
          &format!("'{}' must be a plain file name", name),
        ));
      }
    }

    if self.identity.key.trim().is_empty() {
      return Err(invalid("identity.key", "must not be empty"));
    }
    if self.identity.default.trim().is_empty() {
      return Err(invalid("identity.default", "must not be blank"));
    }

    if !self.readme.script_pattern.contains(crate::template::SCRIPT_TOKEN) {
      return Err(invalid(
        "readme.script_pattern",
        &format!("must contain {}", crate::template::SCRIPT_TOKEN),
      ));
    }

    crate::build::BuildMatrix::from_config(self)?;
    Ok(())
  }
}

fn invalid(field: &str, reason: &str) -> PackError {
  PackError::Config(ConfigError::InvalidValue {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}
