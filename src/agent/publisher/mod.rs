// SYNOID Shorts Publisher
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Authenticates against YouTube and pushes the rendered clip through a
// resumable upload session, logging progress after every chunk.

pub mod metadata;
pub mod oauth;
pub mod upload;

use crate::agent::record::ContentRecord;
use crate::config::{ShortsConfig, UploadConfig};
use metadata::VideoResource;
use oauth::{Authenticator, ClientSecrets};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use upload::{ChunkOutcome, ResumableUpload, UploadedVideo};

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("file error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid client secrets {path:?}: {reason}")]
    Secrets { path: PathBuf, reason: String },
    #[error("authorization failed: {0}")]
    Auth(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("unexpected upload protocol state: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for PublishError {
    fn from(e: reqwest::Error) -> Self {
        PublishError::Network(e.to_string())
    }
}

pub struct Publisher {
    client: reqwest::Client,
    auth: Authenticator,
    config: UploadConfig,
}

impl Publisher {
    pub fn new(auth: Authenticator, config: UploadConfig) -> Result<Self, PublishError> {
        // 308 is the resumable protocol's "keep going", not a redirect.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            auth,
            config,
        })
    }

    pub fn from_config(config: &ShortsConfig) -> Result<Self, PublishError> {
        let secrets = ClientSecrets::load(&config.paths.client_secrets)?;
        Self::new(
            Authenticator::new(secrets, &config.paths.token),
            config.upload.clone(),
        )
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    pub async fn upload_short(
        &self,
        file: &Path,
        record: &ContentRecord,
    ) -> Result<UploadedVideo, PublishError> {
        let token = self.auth.access_token().await?;
        info!("[PUBLISH] 🚀 Uploading {:?} to YouTube...", file);

        let resource = VideoResource::from_record(record, &self.config);
        let mut upload = ResumableUpload::start(
            &self.client,
            &self.config.upload_url,
            &token,
            &resource,
            file,
            self.config.chunk_size,
        )
        .await?;

        loop {
            match upload.next_chunk().await? {
                ChunkOutcome::Progress(fraction) => {
                    info!("[PUBLISH] 📊 Upload progress: {}%", (fraction * 100.0) as u32);
                }
                ChunkOutcome::Complete(video) => {
                    info!("[PUBLISH] ✅ Upload complete! ID: {}", video.id);
                    return Ok(video);
                }
            }
        }
    }
}
