//! repository_dispatch request bodies built from report job results.

use change_matcher::{GitContext, JobResult};
use serde::Serialize;

pub const EVENT_PREFIX: &str = "update-documentation-";
pub const PAYLOAD_SOURCE: &str = "dispatch-sender";

/// Body of `POST repos/{owner}/{repo}/dispatches`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRequest {
  pub event_type: String,
  pub client_payload: ClientPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientPayload {
  pub job_key: String,
  /// Comma-joined; downstream workflows split it themselves.
  pub modified_files: String,
  #[serde(flatten, skip_serializing_if = "Option::is_none")]
  pub enhanced: Option<EnhancedFields>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedFields {
  pub documentation_files: Vec<String>,
  pub job_type: String,
  pub modified_count: usize,
  pub urgent: bool,
  pub git_context: GitContext,
  pub metadata: PayloadMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadMetadata {
  pub triggered_by: String,
  pub timestamp: String,
  pub source: String,
}

pub fn event_type(job_type: &str) -> String {
  format!("{}{}", EVENT_PREFIX, job_type)
}

/// Build the request for one job. `timestamp` is only used by the enhanced payload.
pub fn build_request(job: &JobResult, enhanced: bool, timestamp: &str) -> DispatchRequest {
  let enhanced = enhanced.then(|| EnhancedFields {
    documentation_files: job.documentation_files.clone(),
    job_type: job.job_type.clone(),
    modified_count: job.modified_count,
    urgent: job.urgent,
    git_context: job.git_context.clone(),
    metadata: PayloadMetadata {
      triggered_by: job.metadata.triggered_by.clone(),
      timestamp: timestamp.to_string(),
      source: PAYLOAD_SOURCE.to_string(),
    },
  });

  DispatchRequest {
    event_type: event_type(&job.job_type),
    client_payload: ClientPayload {
      job_key: job.job_key.clone(),
      modified_files: job.modified_files.join(","),
      enhanced,
    },
  }
}
