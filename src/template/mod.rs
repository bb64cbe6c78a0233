//! Marker-based document templating
//!
//! A template is plain text containing HTML-comment markers such as
//! `<!-- PKGS -->`. Rendering works from a map of marker to renderer:
//!
//! 1. Every marker in the map that the text lacks is appended once, so no
//!    section is silently dropped from a template that forgot it.
//! 2. Each renderer runs once.
//! 3. The text is scanned left to right in a single pass and every marker
//!    occurrence is replaced. Rendered text is never rescanned.
//!
//! The source template is never modified; rendering returns a new string.

pub mod sections;

use crate::artifacts::{FileResolver, ResolvedArtifact};
use crate::core::error::{PackError, PackResult, TemplateError};
use crate::utils::sha256_hex;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder replaced by each script name in the command pattern
pub const SCRIPT_TOKEN: &str = "<script>";

/// A recognized placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
  Pkgs,
  DevPkgs,
  Cmd,
  Basic,
  Year,
  Author,
}

/// README markers in self-healing append order
pub const README_MARKERS: [Marker; 4] = [Marker::Pkgs, Marker::DevPkgs, Marker::Cmd, Marker::Basic];

impl Marker {
  /// Literal text located in templates
  pub fn token(self) -> &'static str {
    match self {
      Marker::Pkgs => "<!-- PKGS -->",
      Marker::DevPkgs => "<!-- DEV_PKGS -->",
      Marker::Cmd => "<!-- CMD -->",
      Marker::Basic => "<!-- BASIC -->",
      Marker::Year => "<!-- year -->",
      Marker::Author => "<!-- author -->",
    }
  }
}

impl fmt::Display for Marker {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.token())
  }
}

type Renderer<'a> = Box<dyn Fn() -> String + 'a>;

/// Ordered marker → renderer map
#[derive(Default)]
pub struct SectionMap<'a> {
  renderers: Vec<(Marker, Renderer<'a>)>,
}

impl<'a> SectionMap<'a> {
  pub fn new() -> Self {
    Self { renderers: Vec::new() }
  }

  /// Register a renderer; a later registration for the same marker replaces the earlier one
  pub fn insert(&mut self, marker: Marker, render: impl Fn() -> String + 'a) -> &mut Self {
    self.renderers.retain(|(m, _)| *m != marker);
    self.renderers.push((marker, Box::new(render)));
    self
  }

  pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
    self.renderers.iter().map(|(m, _)| *m)
  }

  fn render_all(&self) -> Vec<(&'static str, String)> {
    self.renderers.iter().map(|(m, render)| (m.token(), render())).collect()
  }
}

/// Template text, read once and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
  text: String,
}

impl DocumentTemplate {
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into() }
  }

  /// Markers from `markers` that the template does not contain
  pub fn missing_markers(&self, markers: impl IntoIterator<Item = Marker>) -> Vec<Marker> {
    markers.into_iter().filter(|m| !self.text.contains(m.token())).collect()
  }

  /// Template text with every missing marker appended once
  pub fn healed(&self, markers: impl IntoIterator<Item = Marker>) -> String {
    let mut text = self.text.clone();
    for marker in self.missing_markers(markers) {
      tracing::debug!("template lacks {}, appending it", marker);
      text.push('\n');
      text.push_str(marker.token());
      text.push('\n');
    }
    text
  }

  /// Heal, render every section, substitute in one pass
  pub fn render(&self, sections: &SectionMap<'_>) -> String {
    let healed = self.healed(sections.markers());
    substitute(&healed, &sections.render_all())
  }
}

/// Replace every occurrence of each token in a single left-to-right pass
fn substitute(text: &str, replacements: &[(&str, String)]) -> String {
  let mut out = String::with_capacity(text.len());
  let mut rest = text;

  loop {
    let next = replacements
      .iter()
      .filter_map(|(token, rendered)| rest.find(token).map(|idx| (idx, *token, rendered)))
      .min_by_key(|(idx, _, _)| *idx);

    match next {
      Some((idx, token, rendered)) => {
        out.push_str(&rest[..idx]);
        out.push_str(rendered);
        rest = &rest[idx + token.len()..];
      }
      None => {
        out.push_str(rest);
        return out;
      }
    }
  }
}

/// A rendered document written to the distribution directory
#[derive(Debug, Clone, Serialize)]
pub struct WrittenDocument {
  pub name: String,
  pub source: Option<PathBuf>,
  pub destination: PathBuf,
  pub digest: String,
}

/// Locate and read a template through the resolver (staging copy first)
pub fn read_template(resolver: &FileResolver, name: &str) -> PackResult<(ResolvedArtifact, DocumentTemplate)> {
  let artifact = resolver.resolve(name).ok_or_else(|| {
    PackError::Template(TemplateError::Missing {
      name: name.to_string(),
    })
  })?;

  let text = fs::read_to_string(&artifact.path).map_err(|source| {
    PackError::Template(TemplateError::Unreadable {
      path: artifact.path.clone(),
      source,
    })
  })?;

  Ok((artifact, DocumentTemplate::new(text)))
}

/// Write rendered text into `dist/<name>`, replacing any previous output
pub fn write_document(dist: &Path, name: &str, text: &str, source: Option<&Path>) -> PackResult<WrittenDocument> {
  let destination = dist.join(name);
  fs::write(&destination, text).map_err(|source| {
    PackError::Template(TemplateError::WriteFailed {
      path: destination.clone(),
      source,
    })
  })?;

  Ok(WrittenDocument {
    name: name.to_string(),
    source: source.map(Path::to_path_buf),
    destination,
    digest: sha256_hex(text.as_bytes()),
  })
}
