// SYNOID Shorts Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Every stage of the pipeline receives its settings from this structure
// instead of module-level constants. Defaults reproduce the 1080x1920
// portrait layout; `portrait_720()` is the smaller variant.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Default location of the optional JSON override file.
pub const DEFAULT_CONFIG_FILE: &str = "shorts_config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level settings for one run of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortsConfig {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub paths: PathsConfig,
    pub model: ModelConfig,
    pub upload: UploadConfig,
    pub prompt: PromptConfig,
}

impl Default for ShortsConfig {
    fn default() -> Self {
        Self::portrait_1080()
    }
}

impl ShortsConfig {
    /// 1080x1920 layout: label 250px down, body starting at 40% of the height.
    pub fn portrait_1080() -> Self {
        Self {
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
            paths: PathsConfig::default(),
            model: ModelConfig::default(),
            upload: UploadConfig::default(),
            prompt: PromptConfig::default(),
        }
    }

    /// 720x1280 layout with the body block centred under the label.
    pub fn portrait_720() -> Self {
        Self {
            layout: LayoutConfig {
                canvas_width: 720,
                canvas_height: 1280,
                label_top: 166,
                label_height: 106,
                hook_font_size: 37.0,
                body_font_size: 43.0,
                line_padding: 16,
                hook_optical_offset: 5.0,
                body_placement: BodyPlacement::CenteredBelowLabel,
                ..LayoutConfig::default()
            },
            paths: PathsConfig {
                frame: PathBuf::from("temp_frame_720.png"),
                output: PathBuf::from("viral_short_720.mp4"),
                ..PathsConfig::default()
            },
            prompt: PromptConfig {
                voice: PromptVoice::StoicMentor,
            },
            ..Self::portrait_1080()
        }
    }

    /// Strict loader: the file must exist and parse.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load overrides from `path`, falling back to `base` when the file is
    /// missing or unreadable.
    pub fn load_or(path: &Path, base: Self) -> Self {
        if !path.exists() {
            info!("[CONFIG] No {:?} found, using built-in defaults", path);
            return base;
        }
        match Self::try_load(path) {
            Ok(config) => {
                info!("[CONFIG] Loaded settings from {:?}", path);
                config
            }
            Err(e) => {
                warn!("[CONFIG] ⚠️ {}. Using built-in defaults.", e);
                base
            }
        }
    }
}

/// Where the body text block sits vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum BodyPlacement {
    /// First line starts at `fraction * canvas_height`.
    FixedFraction { fraction: f32 },
    /// Whole block centred in the area between the label bottom and the canvas bottom.
    CenteredBelowLabel,
}

impl Default for BodyPlacement {
    fn default() -> Self {
        BodyPlacement::FixedFraction { fraction: 0.40 }
    }
}

/// Canvas geometry, typography and colours for the still frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Distance from the top edge to the label band.
    pub label_top: u32,
    pub label_height: u32,
    pub hook_font_size: f32,
    pub body_font_size: f32,
    /// Greedy wrap width for the body, in characters.
    pub max_chars_per_line: usize,
    /// Vertical gap between wrapped body lines.
    pub line_padding: u32,
    /// Nudges the hook upwards inside the label.
    pub hook_optical_offset: f32,
    pub body_placement: BodyPlacement,
    pub background: [u8; 3],
    pub label_fill: [u8; 3],
    pub hook_color: [u8; 3],
    pub body_color: [u8; 3],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1080,
            canvas_height: 1920,
            label_top: 250,
            label_height: 160,
            hook_font_size: 55.0,
            body_font_size: 65.0,
            max_chars_per_line: 24,
            line_padding: 25,
            hook_optical_offset: 8.0,
            body_placement: BodyPlacement::default(),
            background: [0, 0, 0],
            label_fill: [255, 255, 255],
            hook_color: [0, 0, 0],
            body_color: [255, 255, 255],
        }
    }
}

/// Clip timing and encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fade_in: f64,
    pub hold: f64,
    pub fade_out: f64,
    pub fps: u32,
    pub video_codec: String,
    pub ffmpeg_path: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fade_in: 1.0,
            hold: 2.0,
            fade_out: 1.0,
            fps: 24,
            video_codec: "libx264".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn total_duration(&self) -> f64 {
        self.fade_in + self.hold + self.fade_out
    }
}

/// Fixed file locations used by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub font: PathBuf,
    /// Tried in order when `font` cannot be loaded, before the built-in bitmap font.
    pub fallback_fonts: Vec<PathBuf>,
    pub frame: PathBuf,
    pub output: PathBuf,
    pub token: PathBuf,
    pub client_secrets: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::from("arialbd.ttf"),
            fallback_fonts: [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
                "/Library/Fonts/Arial Bold.ttf",
                "C:\\Windows\\Fonts\\arialbd.ttf",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            frame: PathBuf::from("temp_frame_v3.png"),
            output: PathBuf::from("viral_short_v3.mp4"),
            token: PathBuf::from("token.json"),
            client_secrets: PathBuf::from("client_secrets.json"),
        }
    }
}

/// Which prompt wording and theme pools a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVoice {
    /// Weighted WEALTH/TRUTH pools with the blunt mentor prompt.
    #[default]
    RuthlessMentor,
    /// One MINDSET pool with the calmer stoic prompt.
    StoicMentor,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub voice: PromptVoice,
}

/// Generative model endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

/// Video platform metadata defaults and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub upload_url: String,
    pub category_id: String,
    pub privacy_status: String,
    pub made_for_kids: bool,
    /// Bytes per resumable chunk; `None` sends the whole file in one request.
    pub chunk_size: Option<u64>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_url: "https://www.googleapis.com/upload/youtube/v3/videos".to_string(),
            category_id: "22".to_string(),
            privacy_status: "public".to_string(),
            made_for_kids: false,
            chunk_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_1080_fixed_fraction() {
        let config = ShortsConfig::default();
        assert_eq!(config.layout.canvas_width, 1080);
        assert_eq!(config.layout.canvas_height, 1920);
        assert_eq!(
            config.layout.body_placement,
            BodyPlacement::FixedFraction { fraction: 0.40 }
        );
        assert_eq!(config.render.total_duration(), 4.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"layout": {{"canvas_width": 720, "body_placement": {{"policy": "centered_below_label"}}}}, "render": {{"hold": 3.5}}}}"#
        )
        .unwrap();

        let config = ShortsConfig::try_load(file.path()).unwrap();
        assert_eq!(config.layout.canvas_width, 720);
        assert_eq!(config.layout.canvas_height, 1920);
        assert_eq!(config.layout.body_placement, BodyPlacement::CenteredBelowLabel);
        assert_eq!(config.render.hold, 3.5);
        assert_eq!(config.render.fps, 24);
        assert_eq!(config.upload.category_id, "22");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            ShortsConfig::try_load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        let config = ShortsConfig::load_or(file.path(), ShortsConfig::portrait_720());
        assert_eq!(config, ShortsConfig::portrait_720());
    }

    #[test]
    fn test_voice_follows_preset_and_file() {
        assert_eq!(ShortsConfig::default().prompt.voice, PromptVoice::RuthlessMentor);
        assert_eq!(ShortsConfig::portrait_720().prompt.voice, PromptVoice::StoicMentor);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"prompt": {{"voice": "stoic_mentor"}}}}"#).unwrap();
        let config = ShortsConfig::try_load(file.path()).unwrap();
        assert_eq!(config.prompt.voice, PromptVoice::StoicMentor);
        assert_eq!(config.layout.canvas_width, 1080);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = ShortsConfig::load_or(Path::new("__no_such_shorts_config.json"), ShortsConfig::default());
        assert_eq!(config, ShortsConfig::default());
    }
}
