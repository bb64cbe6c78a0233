//! Auxiliary artifacts (LICENSE, READMEs, package.json) and their staging

pub mod copy;
pub mod resolver;

pub use copy::{CopyReport, copy_artifacts};
pub use resolver::{FileResolver, Precedence, ResolvedArtifact};
