//! Core building blocks shared by every packaging step
//!
//! - **config**: pack.toml parsing and validation
//! - **context**: Immutable per-run pipeline context
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: Git configuration lookups (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
