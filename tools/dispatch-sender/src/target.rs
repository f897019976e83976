//! Target repository resolved from the git remote URL.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DispatchError;

static GITHUB_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"^(?:https://(?:[^@/]+@)?github\.com/|git@github\.com:|ssh://git@github\.com/)([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$",
  )
  .unwrap()
});

/// `owner/name` of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRepo {
  pub owner: String,
  pub name: String,
}

impl TargetRepo {
  /// Parse https, scp-style and ssh:// GitHub remotes.
  pub fn from_remote_url(url: &str) -> Result<Self, DispatchError> {
    let caps = GITHUB_REMOTE_RE
      .captures(url.trim())
      .ok_or_else(|| DispatchError::UnsupportedRemote(url.to_string()))?;
    Ok(Self {
      owner: caps[1].to_string(),
      name: caps[2].to_string(),
    })
  }

  /// REST path of the repository_dispatch endpoint.
  pub fn dispatches_endpoint(&self) -> String {
    format!("repos/{}/{}/dispatches", self.owner, self.name)
  }
}

impl fmt::Display for TargetRepo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}
