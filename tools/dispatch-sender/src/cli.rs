use std::path::PathBuf;

use clap::Parser;

/// Send repository_dispatch events for every job in a change-matcher report
#[derive(Parser, Debug, Clone)]
#[command(name = "dispatch-sender")]
#[command(version, about, long_about = None)]
pub struct Cli {
  /// Send the enhanced payload (documentation files, urgency, git context, metadata)
  #[arg(long = "enhanced")]
  pub enhanced: bool,

  /// Log what would be sent without calling the API
  #[arg(long = "dry-run")]
  pub dry_run: bool,

  /// Report to read (default: $DOC_JOBS_OUTPUT or changed-jobs.json)
  #[arg(long = "output", value_name = "PATH")]
  pub output: Option<PathBuf>,
}

impl Cli {
  pub fn report_path(&self) -> PathBuf {
    self
      .output
      .clone()
      .unwrap_or_else(change_matcher::config::default_output_path)
  }
}
