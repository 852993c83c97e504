// SYNOID Shorts Resumable Upload
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::metadata::VideoResource;
use super::PublishError;
use reqwest::header::{CONTENT_RANGE, CONTENT_TYPE, LOCATION, RANGE};
use reqwest::StatusCode;
use serde::Deserialize;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

const MEDIA_TYPE: &str = "video/mp4";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedVideo {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// Fraction of the file the server has acknowledged.
    Progress(f64),
    Complete(UploadedVideo),
}

/// `Content-Range` for bytes `[start, end)` of `total`.
pub fn content_range(start: u64, end: u64, total: u64) -> String {
    if start >= end {
        format!("bytes */{}", total)
    } else {
        format!("bytes {}-{}/{}", start, end - 1, total)
    }
}

/// Exclusive end of the chunk starting at `start`, clamped to the file.
pub fn chunk_end(start: u64, chunk_size: u64, total: u64) -> u64 {
    start.saturating_add(chunk_size).min(total)
}

/// Offset to resume from after a 308, given its `Range: bytes=0-N` header.
pub fn next_offset(range: Option<&str>) -> Option<u64> {
    let Some(range) = range else {
        return Some(0);
    };
    let last = range.trim().strip_prefix("bytes=")?.split('-').nth(1)?;
    last.trim().parse::<u64>().ok().map(|n| n + 1)
}

pub struct ResumableUpload {
    client: reqwest::Client,
    session_url: String,
    access_token: String,
    path: PathBuf,
    file: File,
    total: u64,
    offset: u64,
    chunk_size: u64,
}

impl ResumableUpload {
    /// Open the session: metadata goes in the initial POST and the session
    /// URI comes back in `Location`.
    pub async fn start(
        client: &reqwest::Client,
        upload_url: &str,
        access_token: &str,
        resource: &VideoResource,
        path: &Path,
        chunk_size: Option<u64>,
    ) -> Result<Self, PublishError> {
        let io_err = |source| PublishError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).await.map_err(io_err)?;
        let total = file.metadata().await.map_err(io_err)?.len();
        if total == 0 {
            return Err(PublishError::Protocol(format!(
                "refusing to upload empty file {:?}",
                path
            )));
        }

        let resp = client
            .post(upload_url)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .bearer_auth(access_token)
            .header("X-Upload-Content-Type", MEDIA_TYPE)
            .header("X-Upload-Content-Length", total)
            .json(resource)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let session_url = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                PublishError::Protocol("upload session response had no Location".to_string())
            })?
            .to_string();

        Ok(Self {
            client: client.clone(),
            session_url,
            access_token: access_token.to_string(),
            path: path.to_path_buf(),
            file,
            total,
            offset: 0,
            chunk_size: chunk_size.filter(|c| *c > 0).unwrap_or(total),
        })
    }

    pub fn session_url(&self) -> &str {
        &self.session_url
    }

    pub fn progress(&self) -> f64 {
        self.offset as f64 / self.total as f64
    }

    pub async fn next_chunk(&mut self) -> Result<ChunkOutcome, PublishError> {
        let start = self.offset;
        let end = chunk_end(start, self.chunk_size, self.total);
        let mut buf = vec![0u8; (end - start) as usize];

        let io_err = |source| PublishError::Io {
            path: self.path.clone(),
            source,
        };
        self.file
            .seek(SeekFrom::Start(start))
            .await
            .map_err(io_err)?;
        self.file.read_exact(&mut buf).await.map_err(io_err)?;

        let resp = self
            .client
            .put(&self.session_url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, MEDIA_TYPE)
            .header(CONTENT_RANGE, content_range(start, end, self.total))
            .body(buf)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::PERMANENT_REDIRECT {
            let range = resp.headers().get(RANGE).and_then(|v| v.to_str().ok());
            let next = next_offset(range).ok_or_else(|| {
                PublishError::Protocol(format!("unparseable Range header: {:?}", range))
            })?;
            if next <= start || next > self.total {
                return Err(PublishError::Protocol(format!(
                    "server acknowledged {} bytes after chunk starting at {}",
                    next, start
                )));
            }
            self.offset = next;
            return Ok(ChunkOutcome::Progress(self.progress()));
        }

        if status.is_success() {
            let video = resp
                .json::<UploadedVideo>()
                .await
                .map_err(|e| PublishError::Protocol(format!("upload response: {}", e)))?;
            self.offset = self.total;
            return Ok(ChunkOutcome::Complete(video));
        }

        let body = resp.text().await.unwrap_or_default();
        Err(PublishError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
