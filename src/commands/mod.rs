//! CLI commands for pack-rail
//!
//! - **run**: the full COPY -> FORMAT_DOC -> FORMAT_LICENSE pipeline with retries
//! - **readme**: FORMAT_DOC only
//! - **license**: FORMAT_LICENSE only
//! - **targets**: print the build matrix handed to the bundler
//! - **init**: write a default pack.toml
//!
//! Every command except `init` takes the `&PipelineContext` built in `main.rs`.

pub mod init;
pub mod license;
pub mod readme;
pub mod run;
pub mod targets;

pub use init::run_init;
pub use license::run_license;
pub use readme::run_readme;
pub use run::run_pipeline;
pub use targets::run_targets;

use crate::artifacts::Precedence;

pub(crate) fn precedence_label(precedence: Precedence) -> &'static str {
  match precedence {
    Precedence::Staging => "staging",
    Precedence::Root => "root",
  }
}
