//! Job matching: which jobs watch a changed file, and what the report says about them.

use std::collections::HashSet;

use crate::config::JobDefinition;
use crate::report::{
  GitContext, JobMetadata, JobResult, ProcessingStatus, Report, ReportGitContext, Summary,
};
use crate::urgency;

/// Facts about the run stamped onto the summary and every job result.
#[derive(Debug, Clone)]
pub struct RunInfo {
  pub triggered_by: String,
  pub timestamp: String,
}

/// Inputs of `job` that appear in `changed`, in the job's declaration order.
pub fn modified_inputs(job: &JobDefinition, changed: &HashSet<&str>) -> Vec<String> {
  let mut seen = HashSet::new();
  job
    .input
    .iter()
    .filter(|path| changed.contains(path.as_str()))
    .filter(|path| seen.insert(path.as_str()))
    .cloned()
    .collect()
}

/// Match every job against the changed files and assemble the report (no I/O).
///
/// An empty change set short-circuits: jobs are not enumerated and the report
/// has `total_jobs_checked == 0`.
pub fn match_jobs(
  jobs: &[JobDefinition],
  changed_files: &[String],
  git: &GitContext,
  run: &RunInfo,
) -> Report {
  let results = if changed_files.is_empty() {
    Vec::new()
  } else {
    let changed: HashSet<&str> = changed_files.iter().map(String::as_str).collect();
    jobs
      .iter()
      .filter_map(|job| job_result(job, &changed, git, run))
      .collect()
  };

  let total_jobs_checked = if changed_files.is_empty() { 0 } else { jobs.len() };

  Report {
    summary: Summary {
      total_jobs_checked,
      jobs_with_changes: results.len(),
      has_changes: !results.is_empty(),
      timestamp: run.timestamp.clone(),
      triggered_by: run.triggered_by.clone(),
    },
    git_context: ReportGitContext {
      commits: git.clone(),
      changed_files: changed_files.to_vec(),
      changed_file_count: changed_files.len(),
    },
    jobs: results,
  }
}

fn job_result(
  job: &JobDefinition,
  changed: &HashSet<&str>,
  git: &GitContext,
  run: &RunInfo,
) -> Option<JobResult> {
  let modified_files = modified_inputs(job, changed);
  if modified_files.is_empty() {
    tracing::debug!(job = %job.key, "no watched inputs changed");
    return None;
  }

  let urgent = urgency::is_urgent(&modified_files);
  tracing::info!(
    job = %job.key,
    job_type = %job.job_type,
    count = modified_files.len(),
    urgent,
    "job triggered"
  );

  Some(JobResult {
    job_key: job.key.clone(),
    job_type: job.job_type.clone(),
    modified_count: modified_files.len(),
    modified_files,
    documentation_files: job.documentation.clone(),
    urgent,
    git_context: git.clone(),
    metadata: JobMetadata {
      triggered_by: run.triggered_by.clone(),
      timestamp: run.timestamp.clone(),
      processing_status: ProcessingStatus::Queued,
    },
  })
}
