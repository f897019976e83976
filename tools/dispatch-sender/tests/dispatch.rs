//! Integration tests for the dispatch sender (no network, no gh).

use std::time::Duration;

use change_matcher::{Git, Report};
use dispatch_sender::payload::DispatchRequest;
use dispatch_sender::{dispatch, Cli, DispatchError, DispatchOptions, GhCliNotifier, Notifier, TargetRepo};

/// Records every request; fails those whose job key is listed.
#[derive(Default)]
struct RecordingNotifier {
  fail_keys: Vec<String>,
  sent: Vec<(String, DispatchRequest)>,
}

impl Notifier for RecordingNotifier {
  fn send(&mut self, repo: &TargetRepo, request: &DispatchRequest) -> Result<(), DispatchError> {
    self.sent.push((repo.to_string(), request.clone()));
    if self.fail_keys.contains(&request.client_payload.job_key) {
      return Err(DispatchError::send("HTTP 422"));
    }
    Ok(())
  }
}

/// Panics on any send; dry runs must never reach it.
struct ForbiddenNotifier;

impl Notifier for ForbiddenNotifier {
  fn send(&mut self, _: &TargetRepo, _: &DispatchRequest) -> Result<(), DispatchError> {
    panic!("dry run must not call the notifier");
  }
}

fn fixture_report() -> Report {
  let json = r#"{
    "summary": {
      "total_jobs_checked": 3,
      "jobs_with_changes": 2,
      "has_changes": true,
      "timestamp": "2025-01-15T10:30:00Z",
      "triggered_by": "octocat"
    },
    "git_context": {
      "current_commit": "c0ffee",
      "previous_commit": "bead",
      "branch": "main",
      "repository": "git@github.com:acme/app.git",
      "changed_files": ["src/A.cls", "README.md"],
      "changed_file_count": 2
    },
    "jobs": [
      {
        "job_key": "apex-api",
        "job_type": "apex",
        "modified_files": ["src/A.cls"],
        "documentation_files": ["docs/api.md"],
        "modified_count": 1,
        "urgent": true,
        "git_context": {"current_commit": "c0ffee", "previous_commit": "bead", "branch": "main", "repository": "git@github.com:acme/app.git"},
        "metadata": {"triggered_by": "octocat", "timestamp": "2025-01-15T10:30:00Z", "processing_status": "queued"}
      },
      {
        "job_key": "readme",
        "job_type": "guide",
        "modified_files": ["README.md"],
        "documentation_files": [],
        "modified_count": 1,
        "urgent": false,
        "git_context": {"current_commit": "c0ffee", "previous_commit": "bead", "branch": "main", "repository": "git@github.com:acme/app.git"},
        "metadata": {"triggered_by": "octocat", "timestamp": "2025-01-15T10:30:00Z", "processing_status": "queued"}
      }
    ]
  }"#;
  serde_json::from_str(json).unwrap()
}

fn target() -> TargetRepo {
  TargetRepo::from_remote_url("git@github.com:acme/docs.git").unwrap()
}

fn options(enhanced: bool, dry_run: bool) -> DispatchOptions {
  DispatchOptions {
    enhanced,
    dry_run,
    pacing: Duration::ZERO,
  }
}

#[test]
fn one_failure_is_counted_and_the_rest_still_run() {
  let mut notifier = RecordingNotifier {
    fail_keys: vec!["apex-api".into()],
    ..Default::default()
  };
  let summary = dispatch(&fixture_report(), &target(), &options(false, false), &mut notifier);

  assert_eq!(summary.success_count, 1);
  assert_eq!(summary.error_count, 1);
  assert!(!summary.is_success());
  let keys: Vec<_> = notifier.sent.iter().map(|(_, r)| r.client_payload.job_key.as_str()).collect();
  assert_eq!(keys, vec!["apex-api", "readme"], "both jobs attempted in report order");
}

#[test]
fn every_job_gets_its_own_event() {
  let mut notifier = RecordingNotifier::default();
  let summary = dispatch(&fixture_report(), &target(), &options(false, false), &mut notifier);

  assert!(summary.is_success());
  assert_eq!(summary.success_count, 2);
  assert_eq!(notifier.sent[0].0, "acme/docs");
  assert_eq!(notifier.sent[0].1.event_type, "update-documentation-apex");
  assert_eq!(notifier.sent[1].1.event_type, "update-documentation-guide");
  assert!(notifier.sent.iter().all(|(_, r)| r.client_payload.enhanced.is_none()));
}

#[test]
fn enhanced_mode_sends_full_context() {
  let mut notifier = RecordingNotifier::default();
  dispatch(&fixture_report(), &target(), &options(true, false), &mut notifier);

  let body = serde_json::to_value(&notifier.sent[0].1).unwrap();
  let payload = &body["client_payload"];
  assert_eq!(payload["urgent"], true);
  assert_eq!(payload["modified_count"], 1);
  assert_eq!(payload["git_context"]["branch"], "main");
  assert_eq!(payload["metadata"]["triggered_by"], "octocat");
  assert_eq!(payload["metadata"]["source"], "dispatch-sender");
}

#[test]
fn dry_run_never_sends_and_always_succeeds() {
  let summary = dispatch(&fixture_report(), &target(), &options(true, true), &mut ForbiddenNotifier);
  assert_eq!(summary.success_count, 2);
  assert_eq!(summary.error_count, 0);
}

#[test]
fn report_without_changes_is_a_no_op() {
  let mut report = fixture_report();
  report.jobs.clear();
  report.summary.jobs_with_changes = 0;
  report.summary.has_changes = false;

  let summary = dispatch(&report, &target(), &options(false, false), &mut ForbiddenNotifier);
  assert_eq!(summary.success_count, 0);
  assert_eq!(summary.error_count, 0);
  assert!(summary.is_success());
}

#[test]
fn pacing_separates_real_sends() {
  let mut notifier = RecordingNotifier::default();
  let opts = DispatchOptions {
    pacing: Duration::from_millis(50),
    ..options(false, false)
  };
  let start = std::time::Instant::now();
  dispatch(&fixture_report(), &target(), &opts, &mut notifier);
  // Two jobs, one gap.
  assert!(start.elapsed() >= Duration::from_millis(50));
  assert_eq!(notifier.sent.len(), 2);
}

#[test]
fn missing_report_is_a_precondition_failure() {
  let dir = tempfile::tempdir().unwrap();
  let err = Report::read(&dir.path().join("changed-jobs.json")).unwrap_err();
  let err: DispatchError = err.into();
  assert!(matches!(err, DispatchError::Report(_)));
}

#[test]
fn summary_mismatch_still_dispatches_every_job() {
  let mut report = fixture_report();
  report.summary.has_changes = false;
  report.summary.jobs_with_changes = 0;

  let mut notifier = RecordingNotifier::default();
  let summary = dispatch(&report, &target(), &options(false, false), &mut notifier);
  assert_eq!(summary.success_count, 2);
  assert_eq!(notifier.sent.len(), 2);
}

#[test]
fn records_without_modified_files_are_counted_as_skipped() {
  let mut report = fixture_report();
  report.jobs[0].modified_files.clear();
  report.jobs[0].modified_count = 0;

  let mut notifier = RecordingNotifier::default();
  let summary = dispatch(&report, &target(), &options(false, false), &mut notifier);
  assert_eq!(summary.success_count, 1);
  assert_eq!(summary.error_count, 0);
  assert_eq!(summary.skipped_count, 1);
  let keys: Vec<_> = notifier.sent.iter().map(|(_, r)| r.client_payload.job_key.as_str()).collect();
  assert_eq!(keys, vec!["readme"]);
}

#[cfg(unix)]
#[test]
fn unauthenticated_gh_aborts_before_any_job() {
  use std::fs;
  use std::os::unix::fs::PermissionsExt;

  let dir = tempfile::tempdir().unwrap();
  let api_calls = dir.path().join("api-calls");
  let script = dir.path().join("fake-gh");
  fs::write(
    &script,
    format!(
      "#!/bin/sh\ncase \"$1\" in\n  --version) exit 0 ;;\n  auth) echo 'You are not logged into any GitHub hosts' >&2; exit 1 ;;\n  *) echo \"$@\" >> '{}'; exit 0 ;;\nesac\n",
      api_calls.display()
    ),
  )
  .unwrap();
  fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

  let mut notifier = GhCliNotifier::new(script.to_string_lossy().to_string());
  // Temp dirs mounted noexec cannot run the stand-in.
  if notifier.ensure_installed().is_err() {
    return;
  }

  let report_path = dir.path().join("changed-jobs.json");
  fixture_report().write(&report_path).unwrap();
  let cli = Cli {
    enhanced: false,
    dry_run: false,
    output: Some(report_path),
  };

  let err = dispatch_sender::run_with(&cli, &mut notifier, &Git::new(dir.path())).unwrap_err();
  assert!(matches!(err, DispatchError::Unauthenticated(_)), "{}", err);
  assert!(err.to_string().contains("not logged into"));
  assert!(!api_calls.exists(), "no dispatch may be attempted");
}
