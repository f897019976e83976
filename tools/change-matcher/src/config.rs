//! Job configuration document and run settings.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MatcherError;

pub const DEFAULT_CONFIG_PATH: &str = "doc-jobs.json";
pub const DEFAULT_OUTPUT_PATH: &str = "changed-jobs.json";

/// One documentation job: a set of watched input paths and the docs it maintains.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobDefinition {
  pub key: String,
  #[serde(rename = "type")]
  pub job_type: String,
  pub input: Vec<String>,
  #[serde(default)]
  pub documentation: Vec<String>,
}

/// The configuration document: `{ "jobs": [...] }`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
  pub jobs: Vec<JobDefinition>,
}

impl JobConfig {
  pub fn from_json(raw: &str, path: &Path) -> Result<Self, MatcherError> {
    let config: JobConfig = serde_json::from_str(raw).map_err(|source| MatcherError::ConfigParse {
      path: path.to_path_buf(),
      source,
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Read, parse and validate the configuration file.
  pub fn load(path: &Path) -> Result<Self, MatcherError> {
    let raw = fs::read_to_string(path).map_err(|source| MatcherError::ConfigRead {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&raw, path)
  }

  /// Keys must be non-empty and unique; types must be non-empty.
  pub fn validate(&self) -> Result<(), MatcherError> {
    let mut seen = HashSet::new();
    for (idx, job) in self.jobs.iter().enumerate() {
      if job.key.trim().is_empty() {
        return Err(MatcherError::validation(&format!("#{}", idx), "key must not be empty"));
      }
      if job.job_type.trim().is_empty() {
        return Err(MatcherError::validation(&job.key, "type must not be empty"));
      }
      if !seen.insert(job.key.as_str()) {
        return Err(MatcherError::validation(&job.key, "duplicate key"));
      }
    }
    Ok(())
  }
}

/// Paths and identity for one run, read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
  /// Job configuration file (`DOC_JOBS_CONFIG`).
  pub config_path: PathBuf,
  /// Report destination (`DOC_JOBS_OUTPUT`).
  pub output_path: PathBuf,
  /// Who triggered the run (`GITHUB_ACTOR`), if set.
  pub actor: Option<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
      output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
      actor: None,
    }
  }
}

impl Settings {
  pub fn from_env() -> Self {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let defaults = Self::default();
    Self {
      config_path: non_empty("DOC_JOBS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or(defaults.config_path),
      output_path: non_empty("DOC_JOBS_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or(defaults.output_path),
      actor: non_empty("GITHUB_ACTOR"),
    }
  }
}

/// Default report path, honouring `DOC_JOBS_OUTPUT`.
pub fn default_output_path() -> PathBuf {
  Settings::from_env().output_path
}
