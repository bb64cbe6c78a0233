//! Small helpers shared across steps

use sha2::{Digest, Sha256};
use std::path::Path;

/// Hex-encoded SHA-256 of a byte slice
pub fn sha256_hex(data: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(data);
  format!("{:x}", hasher.finalize())
}

/// Path relative to `root` for display, or the path itself when outside `root`
pub fn display_relative(path: &Path, root: &Path) -> String {
  path.strip_prefix(root).unwrap_or(path).display().to_string()
}
