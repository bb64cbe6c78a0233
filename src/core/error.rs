//! Error types for pack-rail with contextual messages and exit codes
//!
//! Errors are split by how the pipeline reacts to them. Manifest and template
//! failures abort the current attempt and let the orchestrator start over;
//! configuration errors and an unresolved identity stop the run immediately.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for pack-rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Pipeline failure (retry budget exhausted, unresolved identity, I/O)
  Failure = 1,
  /// Invalid configuration (pack.toml, CLI overrides)
  Config = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for pack-rail
#[derive(Debug)]
pub enum PackError {
  /// Configuration errors
  Config(ConfigError),

  /// Manifest (package.json) errors
  Manifest(ManifestError),

  /// README/LICENSE source or output errors
  Template(TemplateError),

  /// Author identity could not be resolved
  Identity(IdentityError),

  /// Git subprocess errors
  Git(GitError),

  /// Every attempt in the retry budget failed
  RetryExhausted { attempts: u32, last: Box<PackError> },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PackError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PackError::Message { message, context, help } => PackError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      PackError::Io(err) => PackError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PackError::Config(_) => ExitCode::Config,
      _ => ExitCode::Failure,
    }
  }

  /// Whether a fresh pipeline attempt could succeed where this one failed.
  ///
  /// Configuration errors and an unresolved identity would fail identically on
  /// every attempt, so they end the run instead of consuming the budget.
  pub fn is_retryable(&self) -> bool {
    !matches!(
      self,
      PackError::Config(_) | PackError::Identity(_) | PackError::RetryExhausted { .. }
    )
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PackError::Config(e) => e.help_message(),
      PackError::Manifest(e) => e.help_message(),
      PackError::Template(e) => e.help_message(),
      PackError::Identity(e) => e.help_message(),
      PackError::RetryExhausted { last, .. } => last.help_message(),
      PackError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PackError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackError::Config(e) => write!(f, "{}", e),
      PackError::Manifest(e) => write!(f, "{}", e),
      PackError::Template(e) => write!(f, "{}", e),
      PackError::Identity(e) => write!(f, "{}", e),
      PackError::Git(e) => write!(f, "{}", e),
      PackError::RetryExhausted { attempts, last } => {
        write!(f, "Packaging failed after {} attempt(s)\nLast error: {}", attempts, last)
      }
      PackError::Io(e) => write!(f, "I/O error: {}", e),
      PackError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PackError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PackError::Io(e) => Some(e),
      PackError::Manifest(ManifestError::Read { source, .. }) => Some(source),
      PackError::Template(TemplateError::Unreadable { source, .. }) => Some(source),
      PackError::Template(TemplateError::WriteFailed { source, .. }) => Some(source),
      PackError::RetryExhausted { last, .. } => Some(last.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for PackError {
  fn from(err: io::Error) -> Self {
    PackError::Io(err)
  }
}

impl From<String> for PackError {
  fn from(msg: String) -> Self {
    PackError::message(msg)
  }
}

impl From<&str> for PackError {
  fn from(msg: &str) -> Self {
    PackError::message(msg)
  }
}

impl From<toml_edit::de::Error> for PackError {
  fn from(err: toml_edit::de::Error) -> Self {
    PackError::Config(ConfigError::Parse {
      reason: err.to_string(),
    })
  }
}

impl From<toml_edit::ser::Error> for PackError {
  fn from(err: toml_edit::ser::Error) -> Self {
    PackError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for PackError {
  fn from(err: serde_json::Error) -> Self {
    PackError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for PackError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    PackError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// pack.toml could not be parsed
  Parse { reason: String },

  /// A field holds a value pack-rail cannot use
  InvalidValue { field: String, reason: String },

  /// A base format has no entry in the output file table
  UnknownFormat { format: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => Some("Run `pack-rail init --force` to regenerate a default pack.toml.".to_string()),
      ConfigError::UnknownFormat { .. } => Some(format!(
        "Supported base formats: {}",
        crate::build::BASE_FORMATS.join(", ")
      )),
      ConfigError::InvalidValue { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { reason } => write!(f, "Failed to parse pack.toml: {}", reason),
      ConfigError::InvalidValue { field, reason } => {
        write!(f, "Invalid value for `{}`: {}", field, reason)
      }
      ConfigError::UnknownFormat { format } => {
        write!(f, "Build format '{}' has no output file mapping", format)
      }
    }
  }
}

/// Manifest (package.json) errors
#[derive(Debug)]
pub enum ManifestError {
  /// Manifest file does not exist
  NotFound { path: PathBuf },

  /// Manifest exists but could not be read
  Read { path: PathBuf, source: io::Error },

  /// Manifest is not valid JSON or has the wrong shape
  Parse { path: PathBuf, reason: String },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::NotFound { .. } => {
        Some("pack-rail expects package.json at the project root (see `project.manifest`).".to_string())
      }
      ManifestError::Parse { .. } => {
        Some("`dependencies`, `devDependencies` and `scripts` must be JSON objects.".to_string())
      }
      ManifestError::Read { .. } => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::NotFound { path } => write!(f, "Manifest not found: {}", path.display()),
      ManifestError::Read { path, source } => {
        write!(f, "Failed to read manifest {}: {}", path.display(), source)
      }
      ManifestError::Parse { path, reason } => {
        write!(f, "Invalid manifest {}: {}", path.display(), reason)
      }
    }
  }
}

/// README/LICENSE document errors
#[derive(Debug)]
pub enum TemplateError {
  /// Neither the staging directory nor the project root holds the document
  Missing { name: String },

  /// The document exists but could not be read
  Unreadable { path: PathBuf, source: io::Error },

  /// The rendered document could not be written to the distribution directory
  WriteFailed { path: PathBuf, source: io::Error },
}

impl TemplateError {
  fn help_message(&self) -> Option<String> {
    match self {
      TemplateError::Missing { name } => Some(format!(
        "Create {} in the project root or the staging directory.",
        name
      )),
      _ => None,
    }
  }
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TemplateError::Missing { name } => write!(f, "Template {} not found", name),
      TemplateError::Unreadable { path, source } => {
        write!(f, "Failed to read template {}: {}", path.display(), source)
      }
      TemplateError::WriteFailed { path, source } => {
        write!(f, "Failed to write {}: {}", path.display(), source)
      }
    }
  }
}

/// Identity resolution errors
#[derive(Debug)]
pub enum IdentityError {
  /// Every source in the chain came back empty
  Unresolved { sources: Vec<String> },
}

impl IdentityError {
  fn help_message(&self) -> Option<String> {
    match self {
      IdentityError::Unresolved { .. } => {
        Some("Set one with: git config user.name \"Your Name\" (or use --revision hardened)".to_string())
      }
    }
  }
}

impl fmt::Display for IdentityError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      IdentityError::Unresolved { sources } => {
        write!(f, "No author identity found (tried: {})", sources.join(", "))
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
    }
  }
}

/// Result type alias for pack-rail
pub type PackResult<T> = Result<T, PackError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PackResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PackError>,
{
  fn context(self, ctx: impl Into<String>) -> PackResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PackError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
