//! Binary entrypoint: match jobs for the latest commit, write the report,
//! print the summary as one JSON line on stdout.

use change_matcher::{logging, Git, Settings};
use std::io::{self, Write};

fn main() {
  logging::init_logging();
  if let Err(e) = run_binary() {
    tracing::error!("change-matcher error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let settings = Settings::from_env();
  let report = change_matcher::run(&settings, &Git::current())?;

  let json = serde_json::to_vec(&report.summary)?;
  let mut stdout = io::stdout().lock();
  stdout.write_all(&json)?;
  writeln!(stdout)?;
  Ok(())
}
