//! arXiv paper collector.
//!
//! Issues a single Atom feed query across the cs.AI, cs.LG, and cs.CL
//! categories for recently submitted agent-related papers, parses the feed
//! entries, drops anything older than the lookback window, and keeps the
//! entries the paper relevance predicate accepts.
//!
//! Unlike the GitHub collector there is only one request, so any network or
//! parse failure aborts the whole arXiv contribution for the run. The caller
//! logs the error and continues with whatever GitHub produced.

use crate::filters::is_relevant_paper;
use crate::models::{Finding, FindingKind, Source};
use crate::utils::truncate_description;
use chrono::{DateTime, Duration, Local, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use std::error::Error;
use tracing::{info, instrument, warn};
use url::Url;

const API_URL: &str = "http://export.arxiv.org/api/query";

/// Category filters plus agent terms over title/abstract.
const SEARCH_QUERY: &str = "cat:cs.AI OR cat:cs.LG OR cat:cs.CL AND \
    (ti:agent OR abs:agent OR ti:\"large language model\" OR abs:\"autonomous agent\")";

const MAX_RESULTS: u32 = 20;

/// One `<entry>` of the Atom response, reduced to the fields the pipeline
/// needs.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub published: String,
    pub id: String,
}

/// Query arXiv once and map the feed to relevant findings.
#[instrument(level = "info", skip_all, fields(days_back))]
pub async fn scan(client: &Client, days_back: i64) -> Result<Vec<Finding>, Box<dyn Error>> {
    let max_results = MAX_RESULTS.to_string();
    let body = client
        .get(API_URL)
        .query(&[
            ("search_query", SEARCH_QUERY),
            ("start", "0"),
            ("max_results", max_results.as_str()),
            ("sortBy", "submittedDate"),
            ("sortOrder", "descending"),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let entries = parse_feed(&body)?;
    let cutoff = Utc::now() - Duration::days(days_back);
    let found_at = Local::now().to_rfc3339();

    let findings: Vec<Finding> = entries
        .into_iter()
        .filter_map(|entry| entry_to_finding(entry, cutoff, &found_at))
        .filter(is_relevant_paper)
        .collect();

    info!(count = findings.len(), "Found arXiv papers");
    Ok(findings)
}

/// Parse the Atom feed into entries.
///
/// Only `<title>`, `<summary>`, `<published>`, and `<id>` inside `<entry>`
/// elements are read; the feed-level `<title>` and `<id>` are ignored.
pub(crate) fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<&'static str> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if current.is_none() {
                    if e.local_name().as_ref() == b"entry" {
                        current = Some(FeedEntry::default());
                    }
                } else {
                    field = match e.local_name().as_ref() {
                        b"title" => Some("title"),
                        b"summary" => Some("summary"),
                        b"published" => Some("published"),
                        b"id" => Some("id"),
                        _ => None,
                    };
                }
            }
            Event::Text(t) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let text = t.unescape()?;
                    let target = match field {
                        "title" => &mut entry.title,
                        "summary" => &mut entry.summary,
                        "published" => &mut entry.published,
                        _ => &mut entry.id,
                    };
                    // Long titles and abstracts arrive hard-wrapped across
                    // lines; collapse runs of whitespace to single spaces.
                    for word in text.split_whitespace() {
                        if !target.is_empty() {
                            target.push(' ');
                        }
                        target.push_str(word);
                    }
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"entry" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                } else {
                    field = None;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Build a paper finding from a feed entry, or drop it when it was
/// published before the cutoff or carries an unparseable timestamp.
pub(crate) fn entry_to_finding(
    entry: FeedEntry,
    cutoff: DateTime<Utc>,
    found_at: &str,
) -> Option<Finding> {
    let published = match DateTime::parse_from_rfc3339(&entry.published) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(e) => {
            warn!(id = %entry.id, error = %e, "Skipping entry with unparseable published date");
            return None;
        }
    };
    if published < cutoff {
        return None;
    }

    Some(Finding {
        source: Source::Arxiv,
        kind: FindingKind::Paper,
        topic: None,
        title: entry.title,
        description: truncate_description(&entry.summary),
        url: canonical_url(&entry.id),
        stars: None,
        language: None,
        updated_at: None,
        topics: vec![],
        published_at: Some(entry.published),
        found_at: found_at.to_string(),
    })
}

/// Rewrite an abstract link to the secure scheme. arXiv entry ids still use
/// plain `http://arxiv.org/abs/...`.
fn canonical_url(link: &str) -> String {
    match Url::parse(link) {
        Ok(mut url) => {
            if url.scheme() == "http" {
                let _ = url.set_scheme("https");
            }
            url.to_string()
        }
        Err(_) => link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <id>http://arxiv.org/api/example</id>
  <entry>
    <id>http://arxiv.org/abs/2508.11111v1</id>
    <title>Coordinating Autonomous Agents
      with Shared Memory</title>
    <summary>We present a system for multi-agent coordination &amp; planning.</summary>
    <published>2025-08-20T17:30:00Z</published>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2508.00001v2</id>
    <title>An Old Paper About Agents</title>
    <summary>Agent-based simulation from a while ago.</summary>
    <published>2025-08-01T09:00:00Z</published>
  </entry>
</feed>"#;

    fn cutoff(date: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn feed_parses_entry_fields() {
        let entries = parse_feed(FEED).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.id, "http://arxiv.org/abs/2508.11111v1");
        assert_eq!(first.title, "Coordinating Autonomous Agents with Shared Memory");
        assert_eq!(
            first.summary,
            "We present a system for multi-agent coordination & planning."
        );
        assert_eq!(first.published, "2025-08-20T17:30:00Z");
    }

    #[test]
    fn feed_level_title_and_id_are_ignored() {
        let entries = parse_feed(FEED).unwrap();
        assert!(!entries[0].title.contains("Query Results"));
        assert!(!entries[0].id.contains("api/example"));
    }

    #[test]
    fn malformed_feed_is_an_error() {
        assert!(parse_feed("<feed><entry></feed>").is_err());
    }

    #[test]
    fn entries_older_than_cutoff_are_dropped() {
        let entries = parse_feed(FEED).unwrap();
        let cutoff = cutoff("2025-08-16T00:00:00Z");

        let mut entries = entries.into_iter();
        let recent = entry_to_finding(entries.next().unwrap(), cutoff, "2025-08-23T09:00:00Z");
        let stale = entry_to_finding(entries.next().unwrap(), cutoff, "2025-08-23T09:00:00Z");

        assert!(recent.is_some());
        assert!(stale.is_none());
    }

    #[test]
    fn finding_carries_secure_url_and_paper_shape() {
        let entries = parse_feed(FEED).unwrap();
        let finding = entry_to_finding(
            entries.into_iter().next().unwrap(),
            cutoff("2025-08-16T00:00:00Z"),
            "2025-08-23T09:00:00Z",
        )
        .unwrap();

        assert_eq!(finding.source, Source::Arxiv);
        assert_eq!(finding.kind, FindingKind::Paper);
        assert_eq!(finding.url, "https://arxiv.org/abs/2508.11111v1");
        assert_eq!(finding.published_at.as_deref(), Some("2025-08-20T17:30:00Z"));
        assert!(finding.stars.is_none());
    }

    #[test]
    fn unparseable_published_date_drops_the_entry() {
        let entry = FeedEntry {
            title: "Agents".to_string(),
            summary: "agent stuff".to_string(),
            published: "yesterday".to_string(),
            id: "http://arxiv.org/abs/2508.2".to_string(),
        };
        assert!(entry_to_finding(entry, cutoff("2025-08-16T00:00:00Z"), "now").is_none());
    }

    #[test]
    fn long_summaries_are_truncated() {
        let entry = FeedEntry {
            title: "A Survey of Agents".to_string(),
            summary: "agent ".repeat(200),
            published: "2025-08-22T00:00:00Z".to_string(),
            id: "http://arxiv.org/abs/2508.3".to_string(),
        };
        let finding =
            entry_to_finding(entry, cutoff("2025-08-16T00:00:00Z"), "now").unwrap();
        assert_eq!(finding.description.chars().count(), 503);
        assert!(finding.description.ends_with("..."));
    }
}
