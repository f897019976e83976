//! Replays a report: one dispatch per triggered job, failures isolated per job.

use std::thread;
use std::time::Duration;

use change_matcher::Report;

use crate::notifier::Notifier;
use crate::payload;
use crate::target::TargetRepo;

/// Gap between successive real dispatches, to stay under the API rate limit.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct DispatchOptions {
  /// Send the full job and git context, not just key + files.
  pub enhanced: bool,
  /// Log each would-be call instead of sending it.
  pub dry_run: bool,
  pub pacing: Duration,
}

impl Default for DispatchOptions {
  fn default() -> Self {
    Self {
      enhanced: false,
      dry_run: false,
      pacing: DEFAULT_PACING,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
  pub success_count: usize,
  pub error_count: usize,
  /// Job records with no modified files; neither sent nor failed.
  pub skipped_count: usize,
}

impl DispatchSummary {
  pub fn is_success(&self) -> bool {
    self.error_count == 0
  }
}

/// Dispatch every job in `report` in order. Never short-circuits: a failed
/// send is counted and the next job is still attempted.
pub fn dispatch<N: Notifier + ?Sized>(
  report: &Report,
  repo: &TargetRepo,
  options: &DispatchOptions,
  notifier: &mut N,
) -> DispatchSummary {
  let mut summary = DispatchSummary::default();
  if report.jobs.is_empty() {
    tracing::warn!("report has no jobs; nothing to dispatch");
    return summary;
  }
  if !report.summary.has_changes || report.summary.jobs_with_changes != report.jobs.len() {
    tracing::warn!(
      has_changes = report.summary.has_changes,
      jobs_with_changes = report.summary.jobs_with_changes,
      jobs = report.jobs.len(),
      "report summary disagrees with its job list; dispatching every job record"
    );
  }

  let mut attempted = false;
  for job in &report.jobs {
    if job.modified_files.is_empty() {
      tracing::warn!(job = %job.job_key, "job has no modified files; skipping");
      summary.skipped_count += 1;
      continue;
    }

    let request = payload::build_request(job, options.enhanced, &change_matcher::timestamp_now());

    if options.dry_run {
      let body = serde_json::to_string(&request).unwrap_or_default();
      tracing::info!(
        job = %job.job_key,
        event = %request.event_type,
        "[dry-run] would POST {} {}",
        repo.dispatches_endpoint(),
        body
      );
      summary.success_count += 1;
      continue;
    }

    if attempted && !options.pacing.is_zero() {
      thread::sleep(options.pacing);
    }
    attempted = true;

    match notifier.send(repo, &request) {
      Ok(()) => {
        tracing::info!(job = %job.job_key, event = %request.event_type, repo = %repo, "dispatched");
        summary.success_count += 1;
      }
      Err(e) => {
        tracing::error!(job = %job.job_key, event = %request.event_type, "dispatch failed: {}", e);
        summary.error_count += 1;
      }
    }
  }
  summary
}
