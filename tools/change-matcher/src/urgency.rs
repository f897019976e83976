//! Urgency derived from how many watched files changed and what kind they are.

/// More matched files than this makes a job urgent on its own.
pub const URGENT_FILE_COUNT: usize = 3;

/// Metadata suffixes whose changes always need prompt doc updates (case-sensitive).
pub const SENSITIVE_SUFFIXES: &[&str] = &[".flow-meta.xml", ".cls", ".trigger"];

pub fn is_sensitive(path: &str) -> bool {
  SENSITIVE_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Urgent when more than [`URGENT_FILE_COUNT`] files matched, or any one is sensitive.
pub fn is_urgent(matched: &[String]) -> bool {
  matched.len() > URGENT_FILE_COUNT || matched.iter().any(|p| is_sensitive(p))
}
