//! README section renderers. All pure: metadata in, markdown out.

use super::{Marker, SCRIPT_TOKEN, SectionMap};
use crate::manifest::{BasicField, ProjectMetadata};
use serde_json::Value;

pub const DEPENDENCIES_HEADER: &str = "Dependencies used:";
pub const DEPENDENCIES_NONE: &str = "No dependencies used";
pub const DEV_DEPENDENCIES_HEADER: &str = "Dev dependencies used:";
pub const DEV_DEPENDENCIES_NONE: &str = "No dev dependencies used";
pub const SCRIPTS_HEADER: &str = "Available scripts:";
pub const BASIC_HEADER: &str = "Basic info:";

/// Shown for an empty array value
pub const EMPTY_LIST: &str = "...";

/// Header plus one bullet per name, or `none` when there are no names
pub fn render_name_list(names: &[String], header: &str, none: &str) -> String {
  if names.is_empty() {
    return none.to_string();
  }
  let mut out = header.to_string();
  for name in names {
    out.push_str("\n* ");
    out.push_str(name);
  }
  out
}

pub fn render_dependencies(names: &[String]) -> String {
  render_name_list(names, DEPENDENCIES_HEADER, DEPENDENCIES_NONE)
}

pub fn render_dev_dependencies(names: &[String]) -> String {
  render_name_list(names, DEV_DEPENDENCIES_HEADER, DEV_DEPENDENCIES_NONE)
}

/// Header plus one command line per script. The header is kept even with no scripts.
pub fn render_scripts(scripts: &[String], pattern: &str) -> String {
  let mut out = SCRIPTS_HEADER.to_string();
  for script in scripts {
    out.push_str("\n* ");
    out.push_str(&pattern.replace(SCRIPT_TOKEN, script));
  }
  out
}

pub fn render_basic(fields: &[BasicField]) -> String {
  let mut out = BASIC_HEADER.to_string();
  for field in fields {
    out.push_str(&format!("\n* {}: {}", field.key, format_value(&field.value)));
  }
  out
}

/// Human rendering of a manifest value
///
/// Arrays are comma-joined, or `...` when empty. Objects such as
/// `repository`/`bugs` show their `url` when they have one.
pub fn format_value(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.clone(),
    Value::Array(items) if items.is_empty() => EMPTY_LIST.to_string(),
    Value::Array(items) => items.iter().map(format_value).collect::<Vec<_>>().join(", "),
    Value::Object(map) => match map.get("url") {
      Some(Value::String(url)) => url.clone(),
      _ => value.to_string(),
    },
  }
}

/// The four README sections for one manifest
pub fn readme_sections<'a>(metadata: &'a ProjectMetadata, script_pattern: &'a str) -> SectionMap<'a> {
  let mut map = SectionMap::new();
  map
    .insert(Marker::Pkgs, move || render_dependencies(&metadata.dependencies))
    .insert(Marker::DevPkgs, move || render_dev_dependencies(&metadata.dev_dependencies))
    .insert(Marker::Cmd, move || render_scripts(&metadata.scripts, script_pattern))
    .insert(Marker::Basic, move || render_basic(&metadata.basic));
  map
}
