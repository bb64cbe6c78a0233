//! Diagnostics via `tracing`
//!
//! Step diagnostics go to stderr. With `--log-file` the same events are also
//! appended, without colour, to a file that survives across runs.

use crate::core::error::{PackError, PackResult, ResultExt};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Level used when `RUST_LOG` is not set
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
  if quiet {
    "error"
  } else if verbose {
    "debug"
  } else {
    "info"
  }
}

/// Install the global subscriber. Call once, before any step runs.
pub fn init(verbose: bool, quiet: bool, log_file: Option<&Path>) -> PackResult<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

  let stderr_layer = fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time();

  let file_layer = match log_file {
    Some(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
      Some(fmt::layer().with_ansi(false).with_target(false).with_writer(Mutex::new(file)))
    }
    None => None,
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(stderr_layer)
    .with(file_layer)
    .try_init()
    .map_err(|e| PackError::message(format!("Failed to initialise logging: {}", e)))
}
