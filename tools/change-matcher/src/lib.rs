//! Documentation Change Matcher: decides which documentation jobs a commit touches.
//!
//! Reads a job configuration, compares each job's watched inputs with the files
//! changed in the latest commit, and produces one [`Report`] that
//! dispatch-sender later replays. Matching itself is pure; git and file I/O
//! stay at the edges.

pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod urgency;

pub use config::{JobConfig, JobDefinition, Settings};
pub use error::MatcherError;
pub use git::Git;
pub use matcher::{match_jobs, RunInfo};
pub use report::{GitContext, JobResult, Report};

use chrono::{SecondsFormat, Utc};

/// Current time as RFC 3339, second precision, `Z` suffix.
pub fn timestamp_now() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Full matcher run: preconditions, git facts, matching, atomic report write.
pub fn run(settings: &Settings, git: &Git) -> Result<Report, MatcherError> {
  git.ensure_available()?;
  git.ensure_work_tree()?;

  let config = JobConfig::load(&settings.config_path)?;
  tracing::info!(
    path = %settings.config_path.display(),
    jobs = config.jobs.len(),
    "loaded job configuration"
  );

  let context = git.context();
  tracing::info!(
    current = %context.current_commit,
    previous = %context.previous_commit,
    branch = %context.branch,
    "resolved git context"
  );

  let previous = git.rev_parse("HEAD~1");
  let changed = git.changed_files(previous.as_deref(), "HEAD")?;
  if changed.is_empty() {
    tracing::warn!("no changed files to match; writing empty report");
  } else {
    tracing::info!(count = changed.len(), "collected changed files");
  }

  let run_info = RunInfo {
    triggered_by: settings
      .actor
      .clone()
      .or_else(|| git.head_author())
      .unwrap_or_else(|| report::UNKNOWN.to_string()),
    timestamp: timestamp_now(),
  };

  let report = match_jobs(&config.jobs, &changed, &context, &run_info);
  report.write(&settings.output_path)?;
  tracing::info!(
    path = %settings.output_path.display(),
    jobs_with_changes = report.summary.jobs_with_changes,
    "wrote report"
  );
  Ok(report)
}
