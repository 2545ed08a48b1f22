use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use raylib::prelude::*;
use tracing::{info, warn};

use crate::error::{LandingError, Result};

/// Pipes raw RGBA frames into an `ffmpeg` process encoding an H.264 video.
pub struct Recorder {
    process: Child,
    stdin: Option<ChildStdin>,
    width: i32,
    height: i32,
    frames: u64,
    output: PathBuf,
}

impl Recorder {
    pub fn new(width: i32, height: i32, fps: u32, output: &Path) -> Result<Recorder> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            // libx264 wants even dimensions
            .args(["-vf", "crop=trunc(iw/2)*2:trunc(ih/2)*2"])
            .arg(output)
            .spawn()
            .map_err(|e| LandingError::Recorder(format!("failed to start ffmpeg: {}", e)))?;
        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| LandingError::Recorder("ffmpeg stdin unavailable".to_string()))?;
        info!(?output, width, height, fps, "recording started");
        Ok(Recorder {
            process,
            stdin: Some(stdin),
            width,
            height,
            frames: 0,
            output: output.to_path_buf(),
        })
    }

    /// Writes one frame read back from a render texture (bottom row first).
    pub fn write(&mut self, image: &Image) -> Result<()> {
        if image.width() != self.width || image.height() != self.height {
            warn!(
                width = image.width(),
                height = image.height(),
                "skipping frame with a size different from the recording"
            );
            return Ok(());
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| LandingError::Recorder("recorder already finished".to_string()))?;

        let row_len = self.width as usize * 4;
        let image_len = row_len * self.height as usize;
        // SAFETY: render texture read-backs are uncompressed RGBA8, `width * height * 4` bytes
        let pixels = unsafe { std::slice::from_raw_parts(image.data() as *const u8, image_len) };

        // ffmpeg expects rows top to bottom
        for row in pixels.chunks_exact(row_len).rev() {
            stdin
                .write_all(row)
                .map_err(|e| LandingError::Recorder(format!("failed to write frame: {}", e)))?;
        }
        self.frames += 1;
        Ok(())
    }

    /// Closes the pipe and waits for ffmpeg to finish the file.
    pub fn finish(mut self) -> Result<()> {
        self.close()
    }

    fn close(&mut self) -> Result<()> {
        if self.stdin.take().is_none() {
            return Ok(());
        }
        let status = self
            .process
            .wait()
            .map_err(|e| LandingError::Recorder(format!("failed to wait for ffmpeg: {}", e)))?;
        if !status.success() {
            return Err(LandingError::Recorder(format!("ffmpeg exited with {}", status)));
        }
        info!(output = ?self.output, frames = self.frames, "recording finished");
        Ok(())
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("{}", e);
        }
    }
}
