// SYNOID I/O Shield — Transient Frames & Shadow Writes
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
//   * `FrameFile` owns the transient still frame and removes it on drop,
//     whether or not the render that consumed it succeeded.
//   * `AtomicMover` promotes a finished `.synoid_tmp` render to its final
//     name, so an interrupted encode never leaves a truncated video behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct FrameFile {
    path: PathBuf,
}

impl FrameFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FrameFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => info!("[IO_SHIELD] 🗑️ Transient frame removed: {:?}", self.path),
            Err(e) => warn!("[IO_SHIELD] Could not remove {:?}: {}", self.path, e),
        }
    }
}

pub struct AtomicMover;

impl AtomicMover {
    /// Move a completed temp file onto its final path, copying across
    /// devices when a rename is not possible.
    pub fn commit(temp_path: &Path, final_path: &Path) -> io::Result<()> {
        if fs::rename(temp_path, final_path).is_ok() {
            return Ok(());
        }
        warn!("[IO_SHIELD] Rename failed (cross-drive?). Falling back to copy-delete.");
        fs::copy(temp_path, final_path)?;
        fs::remove_file(temp_path)
    }

    /// `output.mp4` → `output.mp4.synoid_tmp`
    pub fn tmp_path_for(final_path: &Path) -> PathBuf {
        let mut tmp = final_path.as_os_str().to_owned();
        tmp.push(".synoid_tmp");
        PathBuf::from(tmp)
    }

    /// Best-effort removal of a leftover temp file after a failed render.
    pub fn discard(temp_path: &Path) {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                warn!("[IO_SHIELD] Could not discard {:?}: {}", temp_path, e);
            }
        }
    }
}
