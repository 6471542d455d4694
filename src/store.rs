//! Snapshot persistence for a scan run.
//!
//! Accumulated findings are sorted, wrapped in a [`FindingsSnapshot`], and
//! written to a new JSON file whose name embeds the save time to second
//! granularity:
//!
//! ```text
//! output_dir/
//! ├── agent_findings_20250822_090211.json
//! └── agent_findings_20250823_091507.json
//! ```
//!
//! Prior runs are never overwritten or deleted. A run with zero findings
//! writes nothing.

use crate::models::{Finding, FindingsSnapshot, sort_findings};
use chrono::Local;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Filename prefix shared by the store and the analyzer's snapshot lookup.
pub const SNAPSHOT_PREFIX: &str = "agent_findings_";

/// Sort the findings and write one snapshot file for this run.
///
/// Returns the path of the written file, or `None` when there was nothing
/// to save. Per-source counts are logged after the write.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, count = findings.len()))]
pub async fn save_findings(
    mut findings: Vec<Finding>,
    output_dir: &str,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    if findings.is_empty() {
        info!("No new findings to save");
        return Ok(None);
    }

    sort_findings(&mut findings);
    let snapshot = build_snapshot(findings);

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = PathBuf::from(output_dir).join(format!("{SNAPSHOT_PREFIX}{timestamp}.json"));

    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = snapshot.total_findings, "Saved findings");

    for source in &snapshot.sources {
        let count = snapshot
            .findings
            .iter()
            .filter(|f| f.source.as_str() == source)
            .count();
        info!(source, count, "Findings by source");
    }

    Ok(Some(path))
}

/// Wrap sorted findings in a snapshot, recording the distinct sources in
/// the order they appear.
fn build_snapshot(findings: Vec<Finding>) -> FindingsSnapshot {
    let mut sources: Vec<String> = Vec::new();
    for finding in &findings {
        let name = finding.source.as_str().to_string();
        if !sources.contains(&name) {
            sources.push(name);
        }
    }

    FindingsSnapshot {
        scan_date: Local::now().to_rfc3339(),
        total_findings: findings.len(),
        sources,
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use crate::models::tests::{paper_finding, repo_finding};

    #[tokio::test]
    async fn empty_run_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();

        let path = save_findings(Vec::new(), output_dir).await.unwrap();
        assert!(path.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn snapshot_saves_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();

        let finding = repo_finding("agent-kit", 50);
        let path = save_findings(vec![finding], output_dir)
            .await
            .unwrap()
            .expect("a snapshot file");
        assert!(
            path.file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with(SNAPSHOT_PREFIX)
        );

        let json = std::fs::read_to_string(&path).unwrap();
        let snapshot: FindingsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.total_findings, 1);
        assert_eq!(snapshot.sources, vec!["github"]);
        assert_eq!(snapshot.findings[0].stars, Some(50));
    }

    #[tokio::test]
    async fn snapshot_is_sorted_and_lists_both_sources() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();

        let findings = vec![
            paper_finding("paper"),
            repo_finding("small", 10),
            repo_finding("big", 2000),
        ];
        let path = save_findings(findings, output_dir).await.unwrap().unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let snapshot: FindingsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.sources, vec!["github", "arxiv"]);
        assert_eq!(snapshot.findings[0].title, "big");
        assert_eq!(snapshot.findings[1].title, "small");
        assert_eq!(snapshot.findings[2].source, Source::Arxiv);
    }
}
