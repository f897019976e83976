//! Outbound notification seam and its `gh` CLI implementation.

use std::io::Write;
use std::process::Command;

use crate::error::DispatchError;
use crate::payload::DispatchRequest;
use crate::target::TargetRepo;

/// Delivers one dispatch request. An `Err` is a per-job failure, never fatal.
pub trait Notifier {
  fn send(&mut self, repo: &TargetRepo, request: &DispatchRequest) -> Result<(), DispatchError>;
}

/// Sends through `gh api`, which carries the caller's authenticated session.
#[derive(Debug, Clone)]
pub struct GhCliNotifier {
  program: String,
}

impl Default for GhCliNotifier {
  fn default() -> Self {
    Self::new("gh")
  }
}

impl GhCliNotifier {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
    }
  }

  /// Fails unless the CLI can be executed.
  pub fn ensure_installed(&self) -> Result<(), DispatchError> {
    let ok = Command::new(&self.program)
      .arg("--version")
      .output()
      .map(|o| o.status.success())
      .unwrap_or(false);
    if ok {
      Ok(())
    } else {
      Err(DispatchError::MissingTool(self.program.clone()))
    }
  }

  pub fn ensure_authenticated(&self) -> Result<(), DispatchError> {
    let output = Command::new(&self.program)
      .args(["auth", "status"])
      .output()
      .map_err(|e| DispatchError::MissingTool(format!("{}: {}", self.program, e)))?;
    if output.status.success() {
      Ok(())
    } else {
      Err(DispatchError::Unauthenticated(
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
      ))
    }
  }
}

impl Notifier for GhCliNotifier {
  fn send(&mut self, repo: &TargetRepo, request: &DispatchRequest) -> Result<(), DispatchError> {
    // Removed when `staged` drops, whether or not the call succeeded.
    let mut staged = tempfile::Builder::new()
      .prefix("dispatch-")
      .suffix(".json")
      .tempfile()?;
    serde_json::to_writer(&mut staged, request)?;
    staged.flush()?;

    let endpoint = repo.dispatches_endpoint();
    let output = Command::new(&self.program)
      .args(["api", endpoint.as_str(), "--method", "POST", "--input"])
      .arg(staged.path())
      .output()?;

    if output.status.success() {
      Ok(())
    } else {
      Err(DispatchError::send(format!(
        "{} exited with {}: {}",
        self.program,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
      )))
    }
  }
}
