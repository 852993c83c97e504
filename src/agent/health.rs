// SYNOID Health Check
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Start-up check for the external tools the pipeline shells out to.

use std::process::{Command, Stdio};
use tracing::debug;

/// Whether `program -version` runs successfully.
pub fn binary_available(program: &str) -> bool {
    match Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            debug!("[HEALTH] {} not runnable: {}", program, e);
            false
        }
    }
}

/// Names of required binaries that could not be run.
pub fn check_dependencies(ffmpeg_path: &str) -> Vec<String> {
    [ffmpeg_path]
        .into_iter()
        .filter(|bin| !binary_available(bin))
        .map(str::to_string)
        .collect()
}
