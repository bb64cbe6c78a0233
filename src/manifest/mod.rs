//! package.json metadata extraction
//!
//! The manifest is parsed once per pipeline attempt. Everything downstream
//! works from [`ProjectMetadata`], never from the raw JSON.

use crate::core::error::{ManifestError, PackError, PackResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Scalar/array fields surfaced in the README basic-info section, in render order
pub const BASIC_FIELDS: [&str; 9] = [
  "name",
  "version",
  "description",
  "keywords",
  "author",
  "license",
  "repository",
  "bugs",
  "homepage",
];

/// A parsed package.json
#[derive(Debug, Clone)]
pub struct Manifest {
  path: PathBuf,
  fields: Map<String, Value>,
}

impl Manifest {
  /// Read and parse the manifest at `path`
  pub fn load(path: &Path) -> PackResult<Self> {
    let content = fs::read_to_string(path).map_err(|source| {
      if source.kind() == io::ErrorKind::NotFound {
        PackError::Manifest(ManifestError::NotFound {
          path: path.to_path_buf(),
        })
      } else {
        PackError::Manifest(ManifestError::Read {
          path: path.to_path_buf(),
          source,
        })
      }
    })?;
    Self::parse(&content, path)
  }

  /// Parse manifest text; `path` is only used in error messages
  pub fn parse(content: &str, path: &Path) -> PackResult<Self> {
    let value: Value = serde_json::from_str(content).map_err(|e| parse_error(path, e.to_string()))?;
    match value {
      Value::Object(fields) => Ok(Self {
        path: path.to_path_buf(),
        fields,
      }),
      _ => Err(parse_error(path, "top level must be a JSON object".to_string())),
    }
  }

  /// Allowlisted fields with a truthy value, in allowlist order
  pub fn basic_info(&self) -> Vec<BasicField> {
    BASIC_FIELDS
      .iter()
      .filter_map(|key| {
        self
          .fields
          .get(*key)
          .filter(|v| is_truthy(v))
          .map(|value| BasicField {
            key: key.to_string(),
            value: value.clone(),
          })
      })
      .collect()
  }

  /// Runtime dependency names in declaration order
  pub fn dependencies(&self) -> PackResult<Vec<String>> {
    self.mapping_keys("dependencies")
  }

  /// Dev-dependency names in declaration order
  pub fn dev_dependencies(&self) -> PackResult<Vec<String>> {
    self.mapping_keys("devDependencies")
  }

  /// Script names in declaration order
  pub fn scripts(&self) -> PackResult<Vec<String>> {
    self.mapping_keys("scripts")
  }

  fn mapping_keys(&self, field: &str) -> PackResult<Vec<String>> {
    match self.fields.get(field) {
      None | Some(Value::Null) => Ok(Vec::new()),
      Some(Value::Object(map)) => Ok(map.keys().cloned().collect()),
      Some(other) => Err(parse_error(
        &self.path,
        format!("`{}` must be an object, found {}", field, json_kind(other)),
      )),
    }
  }
}

fn parse_error(path: &Path, reason: String) -> PackError {
  PackError::Manifest(ManifestError::Parse {
    path: path.to_path_buf(),
    reason,
  })
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// JSON truthiness: null, false, 0 and "" are falsy; arrays and objects never are
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// One basic-info entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicField {
  pub key: String,
  pub value: Value,
}

/// Everything the README needs from the manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectMetadata {
  pub basic: Vec<BasicField>,
  pub dependencies: Vec<String>,
  pub dev_dependencies: Vec<String>,
  pub scripts: Vec<String>,
}

impl ProjectMetadata {
  /// Load the manifest at `path` and extract all four views of it
  pub fn load(path: &Path) -> PackResult<Self> {
    let manifest = Manifest::load(path)?;
    Self::extract(&manifest)
  }

  pub fn extract(manifest: &Manifest) -> PackResult<Self> {
    Ok(Self {
      basic: manifest.basic_info(),
      dependencies: manifest.dependencies()?,
      dev_dependencies: manifest.dev_dependencies()?,
      scripts: manifest.scripts()?,
    })
  }
}
