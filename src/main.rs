mod artifacts;
mod build;
mod commands;
mod core;
mod identity;
mod license;
mod logging;
mod manifest;
mod pipeline;
mod readme;
mod template;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use core::context::{Overrides, PipelineContext};
use core::error::{PackError, PackResult, print_error};
use std::path::{Path, PathBuf};

/// Package a library's dist/ directory: artifacts, README, LICENSE, build targets
#[derive(Parser)]
#[command(name = "pack-rail")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Project root (default: current directory)
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Show debug diagnostics
  #[arg(short, long, global = true, conflicts_with = "quiet")]
  verbose: bool,

  /// Only show errors
  #[arg(short, long, global = true)]
  quiet: bool,

  /// Also append diagnostics to this file
  #[arg(long, global = true, value_name = "PATH")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Copy artifacts, then format README and LICENSE into the distribution directory
  Run {
    /// Total attempts before giving up (overrides pipeline.retries)
    #[arg(long)]
    retries: Option<u32>,
    /// Pipeline revision: initial, retrying, hardened (overrides pipeline.revision)
    #[arg(long)]
    revision: Option<String>,
    /// Year written into the LICENSE (default: current year)
    #[arg(long)]
    year: Option<i32>,
    /// Output the run report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Format the README only (no artifact copy)
  Readme {
    /// Output the written document in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Resolve the author and format the LICENSE only
  License {
    /// Pipeline revision: initial, retrying, hardened (overrides pipeline.revision)
    #[arg(long)]
    revision: Option<String>,
    /// Year written into the LICENSE (default: current year)
    #[arg(long)]
    year: Option<i32>,
    /// Output the result in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the build matrix handed to the bundler
  Targets {
    /// Output the bundler configuration in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write a default pack.toml
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = logging::init(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
    handle_error(err);
  }

  let root = match project_root(cli.root) {
    Ok(root) => root,
    Err(err) => handle_error(err),
  };

  let result = match cli.command {
    Commands::Init { force } => commands::run_init(&root, force),
    Commands::Run {
      retries,
      revision,
      year,
      json,
    } => context(&root, Overrides { retries, revision, year }).and_then(|ctx| commands::run_pipeline(&ctx, json)),
    Commands::Readme { json } => context(&root, Overrides::default()).and_then(|ctx| commands::run_readme(&ctx, json)),
    Commands::License { revision, year, json } => context(
      &root,
      Overrides {
        revision,
        year,
        ..Default::default()
      },
    )
    .and_then(|ctx| commands::run_license(&ctx, json)),
    Commands::Targets { json } => context(&root, Overrides::default()).and_then(|ctx| commands::run_targets(&ctx, json)),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

/// `--root` made absolute, or the current directory
fn project_root(root: Option<PathBuf>) -> PackResult<PathBuf> {
  let root = match root {
    Some(root) => std::path::absolute(&root)?,
    None => std::env::current_dir()?,
  };
  if !root.is_dir() {
    return Err(PackError::message(format!(
      "Project root {} is not a directory",
      root.display()
    )));
  }
  Ok(root)
}

/// Load pack.toml (or defaults) once and apply command-line overrides
fn context(root: &Path, overrides: Overrides) -> PackResult<PipelineContext> {
  let mut ctx = PipelineContext::build(root)?;
  ctx.apply(&overrides)?;
  Ok(ctx)
}

fn handle_error(err: PackError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
