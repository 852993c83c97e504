// SYNOID Shorts Core
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Central pipeline kernel shared by every CLI subcommand. It owns the run
// settings and walks one video through content -> frame -> clip -> upload.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::agent::content_requester::ContentRequester;
use crate::agent::frame_composer::FrameComposer;
use crate::agent::gemini_bridge::GeminiClient;
use crate::agent::production_tools::{ClipRenderer, ProductionResult};
use crate::agent::prompt::PromptTemplate;
use crate::agent::publisher::upload::UploadedVideo;
use crate::agent::publisher::Publisher;
use crate::agent::record::ContentRecord;
use crate::agent::themes::{Theme, ThemeCatalog};
use crate::config::ShortsConfig;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Use this theme instead of a weighted random pick.
    pub theme: Option<String>,
    pub upload: bool,
    /// Write the generated record here for a later manual upload.
    pub save_record: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RunReport {
    pub theme: Theme,
    pub record: ContentRecord,
    pub video: ProductionResult,
    pub upload: Option<UploadedVideo>,
}

pub struct ShortsCore {
    config: ShortsConfig,
    catalog: ThemeCatalog,
    template: PromptTemplate,
}

impl ShortsCore {
    /// Theme pools and prompt wording follow `config.prompt.voice`.
    pub fn new(config: ShortsConfig) -> Self {
        let voice = config.prompt.voice;
        Self::with_prompt(
            config,
            ThemeCatalog::for_voice(voice),
            PromptTemplate::for_voice(voice),
        )
    }

    pub fn with_prompt(config: ShortsConfig, catalog: ThemeCatalog, template: PromptTemplate) -> Self {
        Self {
            config,
            catalog,
            template,
        }
    }

    pub fn config(&self) -> &ShortsConfig {
        &self.config
    }

    pub fn prompt_for(&self, theme: &Theme) -> String {
        self.template.render(theme)
    }

    // --- Pipeline Stages ---

    pub fn choose_theme(&self, requested: Option<&str>) -> Theme {
        match requested {
            Some(name) => self.catalog.resolve(name),
            None => self.catalog.pick(&mut rand::thread_rng()),
        }
    }

    /// Never fails: a missing key or a failed call yields the fallback record.
    pub async fn generate(&self, theme: &Theme) -> ContentRecord {
        let model = match GeminiClient::from_env(&self.config.model) {
            Ok(model) => model,
            Err(e) => {
                error!("[CORE] ❌ {}", e);
                warn!("[CORE] ⚠️ Using fallback content.");
                return ContentRecord::fallback();
            }
        };
        ContentRequester::new(model, self.catalog.clone(), self.template.clone())
            .request_or_fallback(theme)
            .await
    }

    /// Compose the still frame and render it into `output`. The frame file
    /// is gone when this returns, whatever the outcome.
    pub async fn create_video(&self, record: &ContentRecord, output: &Path) -> Result<ProductionResult> {
        let composer = FrameComposer::new(self.config.layout.clone(), &self.config.paths);
        let frame = composer
            .write_frame(&record.hook, &record.body, &self.config.paths.frame)
            .with_context(|| format!("writing frame {:?}", self.config.paths.frame))?;

        let rendered = ClipRenderer::new(self.config.render.clone())
            .render(frame.path(), output)
            .await;
        drop(frame);

        rendered.with_context(|| format!("rendering {:?}", output))
    }

    pub async fn publish(&self, file: &Path, record: &ContentRecord) -> Result<UploadedVideo> {
        let publisher = Publisher::from_config(&self.config).context("preparing YouTube publisher")?;
        let video = publisher.upload_short(file, record).await?;
        Ok(video)
    }

    /// Run only the OAuth step so later uploads can reuse the stored token.
    pub async fn authorize(&self) -> Result<()> {
        let publisher = Publisher::from_config(&self.config).context("preparing YouTube publisher")?;
        publisher.authenticator().access_token().await?;
        info!(
            "[CORE] ✅ Authorized; token stored at {:?}",
            publisher.authenticator().token_path()
        );
        Ok(())
    }

    pub async fn run(&self, opts: &RunOptions) -> Result<RunReport> {
        let theme = self.choose_theme(opts.theme.as_deref());
        info!("[CORE] 🎯 Theme: {} ({})", theme.name, theme.category);

        let record = self.generate(&theme).await;
        if let Some(path) = &opts.save_record {
            record.save(path)?;
        }

        let output = self.config.paths.output.clone();
        let video = self.create_video(&record, &output).await?;
        info!("[CORE] ✅ Clip ready: {:?} ({:.2} MB)", video.output_path, video.size_mb);

        let upload = if opts.upload {
            match self.publish(&video.output_path, &record).await {
                Ok(uploaded) => Some(uploaded),
                Err(e) => {
                    error!("[CORE] ❌ Upload failed: {:#}", e);
                    info!("[CORE] Rendered file kept at {:?}", video.output_path);
                    return Err(e.context(format!("upload of {:?} failed", video.output_path)));
                }
            }
        } else {
            info!("[CORE] Upload skipped.");
            None
        };

        Ok(RunReport {
            theme,
            record,
            video,
            upload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_theme_is_resolved() {
        let core = ShortsCore::new(ShortsConfig::default());
        let theme = core.choose_theme(Some("Discipline"));
        assert_eq!(theme.name, "Discipline");

        let random = core.choose_theme(None);
        assert!(core
            .catalog
            .pools()
            .iter()
            .any(|p| p.themes.iter().any(|t| t == &random.name)));
    }

    #[test]
    fn test_720_preset_uses_stoic_voice() {
        let core = ShortsCore::new(ShortsConfig::portrait_720());
        let theme = core.choose_theme(None);
        assert_eq!(theme.category, "MINDSET");

        let prompt = core.prompt_for(&theme);
        assert!(prompt.starts_with(&PromptTemplate::stoic_mentor().persona));
        assert!(prompt.contains("Category: MINDSET"));

        let default_core = ShortsCore::new(ShortsConfig::portrait_1080());
        assert!(default_core
            .prompt_for(&theme)
            .starts_with(&PromptTemplate::ruthless_mentor().persona));
    }

    #[tokio::test]
    async fn test_frame_removed_when_render_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ShortsConfig::portrait_720();
        config.render.ffmpeg_path = "__no_ffmpeg_for_this_test".to_string();
        config.paths.frame = dir.path().join("frame.png");
        let frame_path = config.paths.frame.clone();
        let output = dir.path().join("clip.mp4");

        let core = ShortsCore::new(config);
        let err = core
            .create_video(&ContentRecord::fallback(), &output)
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("__no_ffmpeg_for_this_test"));
        assert!(!frame_path.exists());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_missing_key_yields_fallback() {
        let mut config = ShortsConfig::default();
        config.model.api_key_env = "__SYNOID_SHORTS_TEST_NO_KEY".to_string();
        let core = ShortsCore::new(config);
        let record = core.generate(&Theme::new("Discipline", "WEALTH")).await;
        assert_eq!(record, ContentRecord::fallback());
    }

    #[tokio::test]
    async fn test_publish_without_secrets_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ShortsConfig::default();
        config.paths.client_secrets = dir.path().join("client_secrets.json");
        config.paths.token = dir.path().join("token.json");
        let core = ShortsCore::new(config);
        let err = core
            .publish(&dir.path().join("clip.mp4"), &ContentRecord::fallback())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("client_secrets.json"));
    }
}
