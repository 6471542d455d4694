//! Data models for discovery findings and persisted snapshots.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Finding`]: A single discovered item (GitHub repository or arXiv paper)
//! - [`FindingsSnapshot`]: The JSON artifact written once per scan run
//!
//! Findings are immutable after creation: a collector builds one, the store
//! sorts and serializes it, and the analyzer only reads it back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a finding was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Github,
    Arxiv,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Github => "github",
            Source::Arxiv => "arxiv",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of item a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Repository,
    Paper,
}

/// A single item discovered during a scan run.
///
/// The github-only fields (`topic`, `stars`, `language`, `updated_at`,
/// `topics`) and the arxiv-only field (`published_at`) are optional and
/// omitted from the serialized snapshot when absent. Timestamps are stored
/// as RFC 3339 strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Finding {
    pub source: Source,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    /// The search topic that surfaced this repository (github only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub title: String,
    /// Truncated to 500 characters plus an ellipsis at creation time.
    pub description: String,
    pub url: String,
    /// Stargazer count (github only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    /// Primary language reported by GitHub, when it reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Repository topic tags (github only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    /// Submission timestamp of the paper (arxiv only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub found_at: String,
}

impl Finding {
    /// Lowercased `title` + `description` used by the relevance predicates
    /// and the analyzer's keyword scoring. Plain substring containment over
    /// this text is the matching contract; no tokenization is performed.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// Like [`Finding::haystack`] but with the topic tags appended, for
    /// novel-concept matching.
    pub fn haystack_with_topics(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.topics.join(" ")).to_lowercase()
    }
}

/// The persisted artifact of one scan run.
///
/// Written to `<output_dir>/agent_findings_<YYYYMMDD_HHMMSS>.json`; one file
/// per run, never updated in place, never deleted by this tool.
#[derive(Debug, Deserialize, Serialize)]
pub struct FindingsSnapshot {
    /// Timestamp of the save, RFC 3339.
    pub scan_date: String,
    pub total_findings: usize,
    /// The distinct sources present, in the same (descending) order as the
    /// findings themselves.
    pub sources: Vec<String>,
    /// Sorted by source descending, then stars descending (missing = 0).
    pub findings: Vec<Finding>,
}

/// Sort findings by source descending ("github" before "arxiv"), then by
/// stars descending, treating findings without stars as 0.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        b.source
            .as_str()
            .cmp(a.source.as_str())
            .then_with(|| b.stars.unwrap_or(0).cmp(&a.stars.unwrap_or(0)))
    });
}
