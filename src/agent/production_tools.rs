// SYNOID Production Tools - Still-Frame Clip Rendering
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// FFmpeg wrapper that turns one still frame into a short clip:
// linear fade-in, hold, linear fade-out, constant frame rate.

use crate::agent::io_shield::AtomicMover;
use crate::config::RenderConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("ffmpeg exited with {status}: {stderr}")]
    Ffmpeg { status: String, stderr: String },
    #[error("render output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a production operation
#[derive(Debug)]
pub struct ProductionResult {
    pub output_path: PathBuf,
    pub size_mb: f64,
    pub duration_secs: f64,
}

/// `fade=in` from t=0, `fade=out` starting once the hold ends.
pub fn fade_filter(config: &RenderConfig) -> String {
    format!(
        "fade=t=in:st=0:d={},fade=t=out:st={}:d={},format=yuv420p",
        config.fade_in,
        config.fade_in + config.hold,
        config.fade_out
    )
}

pub fn ffmpeg_args(frame: &Path, output: &Path, config: &RenderConfig) -> Vec<String> {
    let fps = config.fps.to_string();
    vec![
        "-y".into(),
        "-nostdin".into(),
        "-loop".into(),
        "1".into(),
        "-framerate".into(),
        fps.clone(),
        "-i".into(),
        frame.to_string_lossy().into_owned(),
        "-t".into(),
        config.total_duration().to_string(),
        "-vf".into(),
        fade_filter(config),
        "-r".into(),
        fps,
        "-c:v".into(),
        config.video_codec.clone(),
        "-an".into(),
        "-movflags".into(),
        "+faststart".into(),
        "-f".into(),
        "mp4".into(),
        output.to_string_lossy().into_owned(),
    ]
}

pub struct ClipRenderer {
    config: RenderConfig,
}

impl ClipRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `frame` into `output`. The encoder writes to a sidecar temp
    /// file that is only moved into place on success.
    pub async fn render(&self, frame: &Path, output: &Path) -> Result<ProductionResult, RenderError> {
        let total = self.config.total_duration();
        info!(
            "[RENDER] 🎬 Rendering {:?} -> {:?} ({:.1}s @ {} fps, {})",
            frame, output, total, self.config.fps, self.config.video_codec
        );

        let tmp = AtomicMover::tmp_path_for(output);
        let result = Command::new(&self.config.ffmpeg_path)
            .args(ffmpeg_args(frame, &tmp, &self.config))
            .output()
            .await
            .map_err(|source| RenderError::Spawn {
                program: self.config.ffmpeg_path.clone(),
                source,
            })?;

        if !result.status.success() {
            AtomicMover::discard(&tmp);
            let stderr = String::from_utf8_lossy(&result.stderr);
            warn!("[RENDER] FFmpeg render failed: {}", stderr);
            return Err(RenderError::Ffmpeg {
                status: result.status.to_string(),
                stderr: tail(&stderr, 2000),
            });
        }

        AtomicMover::commit(&tmp, output)?;
        let size_mb = std::fs::metadata(output)?.len() as f64 / 1_048_576.0;
        info!("[RENDER] ✅ Video ready: {:?} ({:.2} MB)", output, size_mb);

        Ok(ProductionResult {
            output_path: output.to_path_buf(),
            size_mb,
            duration_secs: total,
        })
    }
}

fn tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max_chars)).collect()
}
