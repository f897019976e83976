//! Thin wrapper over the `git` CLI: work-tree checks, commit facts, changed files.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::MatcherError;
use crate::report::GitContext;

/// Runs git commands against one working directory.
#[derive(Debug, Clone)]
pub struct Git {
  workdir: PathBuf,
}

impl Git {
  pub fn new(workdir: impl Into<PathBuf>) -> Self {
    Self {
      workdir: workdir.into(),
    }
  }

  /// Git in the current directory.
  pub fn current() -> Self {
    Self::new(".")
  }

  fn run(&self, args: &[&str]) -> Result<Output, MatcherError> {
    Command::new("git")
      .args(args)
      .current_dir(&self.workdir)
      .output()
      .map_err(|e| MatcherError::git(format!("cannot run git {}: {}", args.join(" "), e)))
  }

  /// Trimmed stdout of a successful command; `None` on failure or empty output.
  fn query(&self, args: &[&str]) -> Option<String> {
    self
      .run(args)
      .ok()
      .filter(|output| output.status.success())
      .and_then(|output| String::from_utf8(output.stdout).ok())
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
  }

  /// Fails unless the git binary can be executed.
  pub fn ensure_available(&self) -> Result<(), MatcherError> {
    let output = self.run(&["--version"])?;
    if !output.status.success() {
      return Err(MatcherError::git("git --version failed"));
    }
    Ok(())
  }

  pub fn ensure_work_tree(&self) -> Result<(), MatcherError> {
    match self.query(&["rev-parse", "--is-inside-work-tree"]).as_deref() {
      Some("true") => Ok(()),
      _ => Err(MatcherError::NotAWorkTree),
    }
  }

  pub fn rev_parse(&self, rev: &str) -> Option<String> {
    self.query(&["rev-parse", "--verify", "--quiet", rev])
  }

  /// Current branch name; `None` when detached.
  pub fn branch(&self) -> Option<String> {
    self
      .query(&["rev-parse", "--abbrev-ref", "HEAD"])
      .filter(|b| b != "HEAD")
  }

  pub fn remote_url(&self) -> Option<String> {
    self.query(&["config", "--get", "remote.origin.url"])
  }

  /// Author name of the latest commit.
  pub fn head_author(&self) -> Option<String> {
    self.query(&["log", "-1", "--format=%an"])
  }

  /// Commit identities for HEAD and its parent, plus branch and origin remote.
  pub fn context(&self) -> GitContext {
    GitContext::from_parts(
      self.rev_parse("HEAD"),
      self.rev_parse("HEAD~1"),
      self.branch(),
      self.remote_url(),
    )
  }

  /// Paths changed between two commits. Without a previous commit nothing is diffed.
  pub fn changed_files(&self, previous: Option<&str>, current: &str) -> Result<Vec<String>, MatcherError> {
    let previous = match previous {
      Some(p) => p,
      None => return Ok(Vec::new()),
    };
    // -z: paths come back verbatim, never C-quoted.
    let output = self.run(&["diff", "-z", "--name-only", previous, current])?;
    if !output.status.success() {
      return Err(MatcherError::git(format!(
        "diff {}..{} failed: {}",
        previous,
        current,
        String::from_utf8_lossy(&output.stderr).trim()
      )));
    }
    Ok(parse_name_list(&String::from_utf8_lossy(&output.stdout)))
  }
}

/// NUL-separated paths (`git diff -z`); empty entries and repeats dropped,
/// first-seen order kept. Paths are not trimmed.
pub fn parse_name_list(raw: &str) -> Vec<String> {
  let mut seen = HashSet::new();
  raw
    .split('\0')
    .filter(|path| !path.is_empty())
    .filter(|path| seen.insert(*path))
    .map(str::to_string)
    .collect()
}
