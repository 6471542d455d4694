//! Helper functions for string truncation and file system checks.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a description to at most 500 characters, appending `"..."` when
/// the input was longer. Inputs of 500 characters or fewer are returned
/// verbatim, so the stored description never exceeds 503 characters.
///
/// Counts characters, not bytes, so multi-byte text truncates cleanly.
pub fn truncate_description(text: &str) -> String {
    const MAX_CHARS: usize = 500;

    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(MAX_CHARS).collect();
        truncated.push_str("...");
        truncated
    }
}

/// Clip a string to `max` characters for single-line report output.
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max).collect::<String>())
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_descriptions_pass_through_verbatim() {
        let text = "a concise description";
        assert_eq!(truncate_description(text), text);

        let exactly_500 = "a".repeat(500);
        assert_eq!(truncate_description(&exactly_500), exactly_500);
    }

    #[test]
    fn long_descriptions_truncate_to_503_chars() {
        let text = "b".repeat(501);
        let result = truncate_description(&text);
        assert_eq!(result.chars().count(), 503);
        assert!(result.ends_with("..."));
        assert!(result.starts_with(&"b".repeat(500)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(600);
        let result = truncate_description(&text);
        assert_eq!(result.chars().count(), 503);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn clip_shortens_long_lines() {
        assert_eq!(clip("short", 80), "short");
        let long = "c".repeat(100);
        let clipped = clip(&long, 80);
        assert_eq!(clipped.chars().count(), 83);
        assert!(clipped.ends_with("..."));
    }
}
