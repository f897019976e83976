//! Report document: the JSON contract between change-matcher and dispatch-sender.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MatcherError;

/// Sentinel for git facts that could not be resolved.
pub const UNKNOWN: &str = "unknown";

// ---------------------------------------------------------------------------
// Git provenance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitContext {
  pub current_commit: String,
  pub previous_commit: String,
  pub branch: String,
  pub repository: String,
}

impl GitContext {
  /// Build from optional facts; each missing one becomes `"unknown"`.
  pub fn from_parts(
    current_commit: Option<String>,
    previous_commit: Option<String>,
    branch: Option<String>,
    repository: Option<String>,
  ) -> Self {
    let or_unknown = |v: Option<String>| v.unwrap_or_else(|| UNKNOWN.to_string());
    Self {
      current_commit: or_unknown(current_commit),
      previous_commit: or_unknown(previous_commit),
      branch: or_unknown(branch),
      repository: or_unknown(repository),
    }
  }
}

impl Default for GitContext {
  fn default() -> Self {
    Self::from_parts(None, None, None, None)
  }
}

/// Git context at report level, with the full changed file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGitContext {
  #[serde(flatten)]
  pub commits: GitContext,
  pub changed_files: Vec<String>,
  pub changed_file_count: usize,
}

// ---------------------------------------------------------------------------
// Job results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
  Queued,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
  pub triggered_by: String,
  pub timestamp: String,
  pub processing_status: ProcessingStatus,
}

/// One triggered job. Only produced when at least one input path changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
  pub job_key: String,
  pub job_type: String,
  pub modified_files: Vec<String>,
  pub documentation_files: Vec<String>,
  pub modified_count: usize,
  pub urgent: bool,
  pub git_context: GitContext,
  pub metadata: JobMetadata,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
  pub total_jobs_checked: usize,
  pub jobs_with_changes: usize,
  pub has_changes: bool,
  pub timestamp: String,
  pub triggered_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
  pub summary: Summary,
  pub git_context: ReportGitContext,
  pub jobs: Vec<JobResult>,
}

impl Report {
  /// Read and parse a report written by a previous run.
  pub fn read(path: &Path) -> Result<Self, MatcherError> {
    let raw = fs::read_to_string(path).map_err(|source| MatcherError::ReportRead {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&raw).map_err(|source| MatcherError::ReportParse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Write the report so that `path` ends up holding either the old file or the
  /// complete new one: serialize into a temp file beside it, then rename.
  pub fn write(&self, path: &Path) -> Result<(), MatcherError> {
    let json = serde_json::to_vec_pretty(self)?;
    let write_err = |source: std::io::Error| MatcherError::ReportWrite {
      path: path.to_path_buf(),
      source,
    };

    let dir = match path.parent() {
      Some(p) if !p.as_os_str().is_empty() => p,
      _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(&json).map_err(write_err)?;
    staged.write_all(b"\n").map_err(write_err)?;
    staged.flush().map_err(write_err)?;
    staged.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
  }
}
