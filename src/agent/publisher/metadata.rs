// SYNOID Shorts Upload Metadata
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::agent::record::{normalize_tags, truncate_title, ContentRecord};
use crate::config::UploadConfig;
use serde::Serialize;

/// Request body for `videos.insert` with `part=snippet,status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoResource {
    pub snippet: Snippet,
    pub status: VideoStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: String,
    pub self_declared_made_for_kids: bool,
}

impl VideoResource {
    pub fn from_record(record: &ContentRecord, config: &UploadConfig) -> Self {
        Self {
            snippet: Snippet {
                title: truncate_title(&record.title),
                description: record.description.clone(),
                tags: normalize_tags(record.tags.clone()),
                category_id: config.category_id.clone(),
            },
            status: VideoStatus {
                privacy_status: config.privacy_status.clone(),
                self_declared_made_for_kids: config.made_for_kids,
            },
        }
    }
}
