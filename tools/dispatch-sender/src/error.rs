//! Structured error types for the dispatch sender.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
  #[error("required tool not available: {0}")]
  MissingTool(String),

  #[error("gh is not authenticated; run `gh auth login`: {0}")]
  Unauthenticated(String),

  #[error(transparent)]
  Report(#[from] change_matcher::MatcherError),

  #[error("unsupported remote URL: {0}")]
  UnsupportedRemote(String),

  #[error("send: {0}")]
  Send(String),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl DispatchError {
  pub fn send(msg: impl Into<String>) -> Self {
    Self::Send(msg.into())
  }
}
