//! GitHub repository collector.
//!
//! Queries the GitHub search API once per configured topic for repositories
//! pushed within the lookback window, most recently updated first. Results
//! are mapped to [`Finding`]s and passed through the repository relevance
//! predicate before being kept.
//!
//! A failed topic (network error, non-2xx status, malformed body) is logged
//! and skipped so the remaining topics still contribute to the run. No
//! request is retried.

use crate::filters::is_relevant_repo;
use crate::models::{Finding, FindingKind, Source};
use chrono::{Duration, Local, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use tracing::{debug, info, instrument, warn};

const SEARCH_URL: &str = "https://api.github.com/search/repositories";

/// Results kept per topic query.
const PER_PAGE: u32 = 20;

/// Repositories whose full name contains this marker are skipped so the
/// tool never reports on itself.
const SELF_REPO_MARKER: &str = env!("CARGO_PKG_NAME");

/// Topics scanned on every run.
pub const TOPICS: &[&str] = &["ai-agent", "autonomous-agent", "llm-agent", "agent-profile"];

/// One item of the search response body. Only the fields the pipeline needs
/// are deserialized.
#[derive(Debug, Deserialize)]
pub(crate) struct RepoItem {
    pub full_name: String,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub updated_at: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RepoItem>,
}

/// Scan every topic, accumulating relevant findings across all of them.
///
/// Per-topic failures are logged and skipped; the remaining topics are
/// still scanned.
#[instrument(level = "info", skip_all, fields(topics = topics.len(), days_back))]
pub async fn scan_topics(client: &Client, topics: &[&str], days_back: i64) -> Vec<Finding> {
    let since = (Utc::now() - Duration::days(days_back))
        .format("%Y-%m-%d")
        .to_string();

    let mut findings = Vec::new();
    for topic in topics {
        match scan_topic(client, topic, &since).await {
            Ok(mut topic_findings) => {
                debug!(topic, count = topic_findings.len(), "Scanned GitHub topic");
                findings.append(&mut topic_findings);
            }
            Err(e) => {
                warn!(topic, error = %e, "Error scanning topic; continuing with remaining topics");
            }
        }
    }

    info!(count = findings.len(), "Found GitHub repositories");
    findings
}

/// Issue one search request for a single topic and map the response to
/// relevant findings.
async fn scan_topic(
    client: &Client,
    topic: &str,
    since: &str,
) -> Result<Vec<Finding>, Box<dyn Error>> {
    let query = format!("topic:{topic} pushed:>{since}");
    let per_page = PER_PAGE.to_string();
    let body = client
        .get(SEARCH_URL)
        .header("Accept", "application/vnd.github+json")
        .query(&[
            ("q", query.as_str()),
            ("sort", "updated"),
            ("order", "desc"),
            ("per_page", per_page.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let response: SearchResponse = serde_json::from_str(&body)?;
    let found_at = Local::now().to_rfc3339();
    Ok(findings_from_items(topic, response.items, &found_at))
}

/// Map raw search items to findings: skip the tool's own repository, then
/// keep only items the repository relevance predicate accepts.
pub(crate) fn findings_from_items(
    topic: &str,
    items: Vec<RepoItem>,
    found_at: &str,
) -> Vec<Finding> {
    items
        .into_iter()
        .filter(|item| !item.full_name.contains(SELF_REPO_MARKER))
        .map(|item| Finding {
            source: Source::Github,
            kind: FindingKind::Repository,
            topic: Some(topic.to_string()),
            title: item.name,
            description: item.description.unwrap_or_default(),
            url: item.html_url,
            stars: Some(item.stargazers_count),
            language: item.language,
            updated_at: Some(item.updated_at),
            topics: item.topics,
            published_at: None,
            found_at: found_at.to_string(),
        })
        .filter(is_relevant_repo)
        .collect()
}
