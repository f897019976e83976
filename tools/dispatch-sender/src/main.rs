//! Binary entrypoint: dispatch every job in the report, print a one-line summary.

use change_matcher::logging;
use clap::Parser;
use dispatch_sender::Cli;

fn main() {
  logging::init_logging();
  let cli = Cli::parse();

  match dispatch_sender::run(&cli) {
    Ok(summary) => {
      println!(
        "Dispatch complete: {} succeeded, {} failed, {} skipped",
        summary.success_count, summary.error_count, summary.skipped_count
      );
      if !summary.is_success() {
        std::process::exit(1);
      }
    }
    Err(e) => {
      tracing::error!("dispatch-sender error: {}", e);
      std::process::exit(1);
    }
  }
}
