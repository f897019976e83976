//! Documentation Dispatch Sender: replays a change-matcher report as
//! repository_dispatch events, one per triggered job.
//!
//! Sending goes through the [`Notifier`] seam; production uses the `gh` CLI.

pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod notifier;
pub mod payload;
pub mod target;

pub use cli::Cli;
pub use dispatcher::{dispatch, DispatchOptions, DispatchSummary};
pub use error::DispatchError;
pub use notifier::{GhCliNotifier, Notifier};
pub use target::TargetRepo;

use change_matcher::{Git, Report};

/// Full sender run with the `gh` CLI and the current directory's git remote.
pub fn run(cli: &Cli) -> Result<DispatchSummary, DispatchError> {
  run_with(cli, &mut GhCliNotifier::default(), &Git::current())
}

/// Preconditions first (gh, report, remote), then every job in order.
pub fn run_with(cli: &Cli, notifier: &mut GhCliNotifier, git: &Git) -> Result<DispatchSummary, DispatchError> {
  if cli.dry_run {
    tracing::warn!("dry-run: no events will be sent");
  } else {
    notifier.ensure_installed()?;
    notifier.ensure_authenticated()?;
  }

  let path = cli.report_path();
  let report = Report::read(&path)?;
  tracing::info!(
    path = %path.display(),
    jobs = report.jobs.len(),
    "loaded report"
  );

  let remote = git
    .remote_url()
    .unwrap_or_else(|| "(no origin remote)".to_string());
  let repo = TargetRepo::from_remote_url(&remote)?;
  tracing::info!(repo = %repo, enhanced = cli.enhanced, "dispatch target resolved");

  let options = DispatchOptions {
    enhanced: cli.enhanced,
    dry_run: cli.dry_run,
    ..DispatchOptions::default()
  };
  Ok(dispatch(&report, &repo, &options, notifier))
}
