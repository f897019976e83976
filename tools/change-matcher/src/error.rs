//! Structured error types for the change matcher.
//!
//! Every variant is a precondition failure: the run aborts and no report is written.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatcherError {
  #[error("config: cannot read {path}: {source}")]
  ConfigRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("config: invalid JSON in {path}: {source}")]
  ConfigParse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("config: job {job}: {reason}")]
  Validation { job: String, reason: String },

  #[error("git: {0}")]
  Git(String),

  #[error("not inside a git working tree")]
  NotAWorkTree,

  #[error("report: cannot write {path}: {source}")]
  ReportWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("report: cannot read {path}: {source}")]
  ReportRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("report: invalid JSON in {path}: {source}")]
  ReportParse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl MatcherError {
  pub fn validation(job: &str, reason: &str) -> Self {
    Self::Validation {
      job: job.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn git(msg: impl Into<String>) -> Self {
    Self::Git(msg.into())
  }
}
