// SYNOID Shorts Content Record
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Tag every upload carries so the platform files it as a short.
pub const SHORTS_TAG: &str = "shorts";

/// Maximum title length accepted by the platform, in characters.
pub const TITLE_LIMIT: usize = 100;

/// The five fields driving both the frame and the upload metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub hook: String,
    pub body: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl ContentRecord {
    /// Defaults seeded before parsing a model response; any field the model
    /// omits keeps its value from here.
    pub fn seeded(theme: &str) -> Self {
        Self {
            hook: "Stop trusting your friends...".to_string(),
            body: "They secretly want you to fail.".to_string(),
            title: "Trust No One 👁️".to_string(),
            description: format!(
                "Focus on yourself. #billionaire #truth #{}",
                theme_hashtag(theme)
            ),
            tags: derive_tags("motivation, dark psychology, business, sigma, viral"),
        }
    }

    /// Record used when generation fails outright.
    pub fn fallback() -> Self {
        Self {
            hook: "Never forget this...".to_string(),
            body: "Consistency is what transforms average into excellence.".to_string(),
            title: "The Secret to Success 💯 #shorts".to_string(),
            description: "Daily motivation for you. Keep grinding! #discipline #growth #mindset"
                .to_string(),
            tags: derive_tags("motivation, discipline, hustle, viral, shorts"),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize record")?;
        fs::write(path, json).with_context(|| format!("failed to write record {:?}", path))?;
        info!("[CONTENT] 💾 Record saved: {:?}", path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json =
            fs::read_to_string(path).with_context(|| format!("failed to read record {:?}", path))?;
        let mut record: Self =
            serde_json::from_str(&json).with_context(|| format!("invalid record {:?}", path))?;
        record.tags = normalize_tags(record.tags);
        Ok(record)
    }
}

/// Split a comma-separated tag field into the upload tag list.
pub fn derive_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(',').map(str::to_string).collect())
}

/// Trim tags, drop empty entries and append `shorts` unless a tag already
/// equals it (compared case-insensitively).
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if !out.iter().any(|t| t.eq_ignore_ascii_case(SHORTS_TAG)) {
        out.push(SHORTS_TAG.to_string());
    }
    out
}

/// Cut titles over the limit to `TITLE_LIMIT` characters ending in `...`.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_LIMIT {
        return title.to_string();
    }
    let mut cut: String = title.chars().take(TITLE_LIMIT - 3).collect();
    cut.push_str("...");
    cut
}

fn theme_hashtag(theme: &str) -> String {
    theme.chars().filter(|c| c.is_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_trimmed_and_shorts_appended() {
        assert_eq!(derive_tags("a, b ,c"), vec!["a", "b", "c", "shorts"]);
    }

    #[test]
    fn test_shorts_not_duplicated() {
        assert_eq!(derive_tags("shorts, money"), vec!["shorts", "money"]);
        assert_eq!(derive_tags("Money, Shorts"), vec!["Money", "Shorts"]);
    }

    #[test]
    fn test_empty_tag_entries_dropped() {
        assert_eq!(derive_tags(" , ,"), vec!["shorts"]);
        assert_eq!(derive_tags("a,,b,"), vec!["a", "b", "shorts"]);
    }

    #[test]
    fn test_title_truncation() {
        let title = "x".repeat(105);
        let cut = truncate_title(&title);
        assert_eq!(cut.chars().count(), 100);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..97], &title[..97]);

        let exact = "y".repeat(100);
        assert_eq!(truncate_title(&exact), exact);
    }

    #[test]
    fn test_title_truncation_counts_chars_not_bytes() {
        let title = "💯".repeat(101);
        let cut = truncate_title(&title);
        assert_eq!(cut.chars().count(), 100);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_seeded_description_carries_theme() {
        let record = ContentRecord::seeded("Trust Nobody");
        assert!(record.description.ends_with("#TrustNobody"));
        assert_eq!(record.tags.last().map(String::as_str), Some("shorts"));
    }

    #[test]
    fn test_theme_hashtag_drops_punctuation() {
        let record = ContentRecord::seeded("The Rule of the 1%");
        assert!(record.description.ends_with("#TheRuleofthe1"));
        assert_eq!(theme_hashtag("Don't Chase, Attract"), "DontChaseAttract");
    }

    #[test]
    fn test_fallback_does_not_repeat_shorts_tag() {
        let record = ContentRecord::fallback();
        let count = record.tags.iter().filter(|t| *t == "shorts").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_record_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        let record = ContentRecord::fallback();
        record.save(&path).unwrap();
        assert_eq!(ContentRecord::load(&path).unwrap(), record);
    }
}
