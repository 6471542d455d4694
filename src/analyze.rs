//! Read-only analysis of a saved findings snapshot.
//!
//! Loads the most recent snapshot from the output directory and prints a
//! console report: high-impact repositories, trending topics, novel-concept
//! matches, recent papers, relevance-scored rankings, and recommended
//! follow-ups. The snapshot is never modified and no output artifact is
//! produced besides the report itself, so re-running against the same file
//! always prints the same thing.
//!
//! Snapshot selection keys off the timestamp embedded in the filename rather
//! than file modification time, which is not ordered consistently across
//! filesystems.

use crate::models::{Finding, FindingsSnapshot, Source};
use crate::store::SNAPSHOT_PREFIX;
use crate::utils::clip;
use itertools::Itertools;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Phrases worth +10: the tool exists to find exactly these.
const HIGH_VALUE_PHRASES: &[&str] = &["agent profile", "agent discovery", "agent registry"];

/// Framework-level phrases, +5.
const FRAMEWORK_PHRASES: &[&str] = &["agent framework", "multi-agent", "agent orchestration"];

/// Generic agent-type phrases, +3.
const AGENT_TYPE_PHRASES: &[&str] = &["llm agent", "ai agent", "autonomous agent"];

/// Phrases that mark throwaway material, −2.
const GENERIC_PHRASES: &[&str] = &["tutorial", "example", "demo", "hello world"];

/// Keywords tracked as potentially novel concepts.
const NOVEL_KEYWORDS: &[&str] = &[
    "mcp",
    "model-context-protocol",
    "agentic",
    "multi-agent",
    "agent-framework",
    "agent-orchestration",
    "swarm",
];

/// Topics too generic to be worth trending on.
const TOPIC_STOPLIST: &[&str] = &["ai", "python", "typescript", "javascript"];

/// Analyze the most recent snapshot in `output_dir` and print the report.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub fn run(output_dir: &str) -> Result<(), Box<dyn Error>> {
    let path = latest_snapshot(output_dir)?;
    info!(path = %path.display(), "Analyzing snapshot");
    println!("Analyzing: {}", path.display());

    let snapshot = load_snapshot(&path)?;
    print_report(&snapshot);
    Ok(())
}

/// Find the most recent snapshot file by the timestamp embedded in its name.
///
/// The `YYYYMMDD_HHMMSS` suffix sorts lexicographically in chronological
/// order, so the maximum filename is the newest snapshot.
pub fn latest_snapshot(output_dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let mut newest: Option<PathBuf> = None;
    for dir_entry in fs::read_dir(output_dir)? {
        let path = dir_entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with(SNAPSHOT_PREFIX) || !name.ends_with(".json") {
            continue;
        }
        if newest.as_ref().is_none_or(|best| path > *best) {
            newest = Some(path);
        }
    }

    newest.ok_or_else(|| format!("no snapshot files found in {output_dir}").into())
}

pub fn load_snapshot(path: &Path) -> Result<FindingsSnapshot, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Score a finding by keyword and popularity signals.
///
/// Phrase sets contribute +10/+5/+3, the star tiers >5000/>1000/>100
/// contribute +5/+3/+1 (highest tier only), and generic-material phrases
/// subtract 2.
pub(crate) fn relevance_score(finding: &Finding) -> i64 {
    let text = finding.haystack();
    let mut score = 0;

    if HIGH_VALUE_PHRASES.iter().any(|p| text.contains(p)) {
        score += 10;
    }
    if FRAMEWORK_PHRASES.iter().any(|p| text.contains(p)) {
        score += 5;
    }
    if AGENT_TYPE_PHRASES.iter().any(|p| text.contains(p)) {
        score += 3;
    }

    if finding.source == Source::Github {
        let stars = finding.stars.unwrap_or(0);
        if stars > 5000 {
            score += 5;
        } else if stars > 1000 {
            score += 3;
        } else if stars > 100 {
            score += 1;
        }
    }

    if GENERIC_PHRASES.iter().any(|p| text.contains(p)) {
        score -= 2;
    }

    score
}

fn github_findings(snapshot: &FindingsSnapshot) -> Vec<&Finding> {
    snapshot
        .findings
        .iter()
        .filter(|f| f.source == Source::Github)
        .collect()
}

/// GitHub findings above 1000 stars, highest first.
fn high_impact<'a>(github: &[&'a Finding]) -> Vec<&'a Finding> {
    github
        .iter()
        .copied()
        .filter(|f| f.stars.unwrap_or(0) > 1000)
        .sorted_by_key(|f| std::cmp::Reverse(f.stars.unwrap_or(0)))
        .collect()
}

/// Topic tag frequencies across GitHub findings, stoplist excluded, top 15
/// by count. Ties break alphabetically so the report is stable.
fn topic_frequencies(github: &[&Finding]) -> Vec<(String, usize)> {
    github
        .iter()
        .flat_map(|f| f.topics.iter())
        .filter(|topic| !TOPIC_STOPLIST.contains(&topic.as_str()))
        .counts()
        .into_iter()
        .map(|(topic, count)| (topic.clone(), count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(15)
        .collect()
}

/// Findings matching a novel-concept keyword over title + description +
/// topics.
fn keyword_matches<'a>(snapshot: &'a FindingsSnapshot, keyword: &str) -> Vec<&'a Finding> {
    snapshot
        .findings
        .iter()
        .filter(|f| f.haystack_with_topics().contains(keyword))
        .collect()
}

/// Findings with a positive relevance score, highest first. Ties keep the
/// snapshot's stored order.
fn scored_findings(snapshot: &FindingsSnapshot) -> Vec<(i64, &Finding)> {
    snapshot
        .findings
        .iter()
        .map(|f| (relevance_score(f), f))
        .filter(|(score, _)| *score > 0)
        .sorted_by_key(|(score, _)| std::cmp::Reverse(*score))
        .collect()
}

fn source_label(finding: &Finding) -> String {
    match finding.source {
        Source::Github => format!("[github, {} stars]", finding.stars.unwrap_or(0)),
        Source::Arxiv => "[arxiv]".to_string(),
    }
}

/// Print the full analysis report to stdout.
pub fn print_report(snapshot: &FindingsSnapshot) {
    let github = github_findings(snapshot);

    println!();
    println!("AGENT DISCOVERY ANALYSIS");
    println!("{}", "=".repeat(50));

    println!();
    println!("HIGH-IMPACT GITHUB REPOS (>1000 stars):");
    for finding in high_impact(&github).iter().take(10) {
        println!("  {} stars - {}", finding.stars.unwrap_or(0), finding.title);
        println!("      {}", clip(&finding.description, 80));
        let topics = finding.topics.iter().take(5).join(", ");
        if !topics.is_empty() {
            println!("      topics: {topics}");
        }
    }

    println!();
    println!("TRENDING TOPICS/TECHNOLOGIES:");
    let top_topics = topic_frequencies(&github);
    for (topic, count) in &top_topics {
        println!("  {topic}: {count} repos");
    }

    println!();
    println!("POTENTIALLY NOVEL CONCEPTS:");
    for keyword in NOVEL_KEYWORDS {
        let matches = keyword_matches(snapshot, keyword);
        if matches.is_empty() {
            continue;
        }
        println!();
        println!("  '{keyword}' - {} matches:", matches.len());
        for finding in matches.iter().take(3) {
            println!("    {} {}", finding.title, source_label(finding));
        }
    }

    println!();
    println!("RECENT ACADEMIC PAPERS:");
    for finding in snapshot
        .findings
        .iter()
        .filter(|f| f.source == Source::Arxiv)
        .take(5)
    {
        println!("  {}", finding.title);
        println!("      {}", clip(&finding.description, 100));
    }

    println!();
    println!("TOP 5 BY RELEVANCE SCORE:");
    let scored = scored_findings(snapshot);
    for (score, finding) in scored.iter().take(5) {
        println!("  [{score}] {} {}", finding.title, source_label(finding));
        println!("      {}", clip(&finding.description, 80));
    }

    println!();
    println!("RECOMMENDED ACTIONS:");
    let schema_candidates = scored.iter().filter(|(score, _)| *score >= 7).count();
    if schema_candidates > 0 {
        println!("  SCHEMA UPDATES: Review {schema_candidates} high-scoring items for schema additions");
    }
    let example_candidates = github
        .iter()
        .filter(|f| f.stars.unwrap_or(0) > 500 && f.title.to_lowercase().contains("agent"))
        .count();
    if example_candidates > 0 {
        println!("  NEW EXAMPLES: Consider {example_candidates} repos for example profiles");
    }
    let trending: Vec<&str> = top_topics
        .iter()
        .filter(|(_, count)| *count >= 3)
        .map(|(topic, _)| topic.as_str())
        .collect();
    if !trending.is_empty() {
        println!("  TRENDING: Monitor these topics: {}", trending.join(", "));
    }

    println!();
    println!(
        "Analysis complete. Reviewed {} findings.",
        snapshot.findings.len()
    );
}
