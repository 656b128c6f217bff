use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Fps, Rgba8},
    foundation::error::{ClockError, ClockResult},
    foundation::math::mul_div255_u16,
    render::raster::FrameRGBA,
};

/// Output settings for an MP4 clock recording.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Frame width; must be even.
    pub width: u32,
    /// Frame height; must be even.
    pub height: u32,
    /// Integer frame rate.
    pub fps: u32,
    /// Destination file.
    pub out_path: PathBuf,
    /// Replace `out_path` if it exists.
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Recording of `canvas` at `fps`. Fractional rates are refused.
    pub fn for_canvas(
        canvas: Canvas,
        fps: Fps,
        out_path: impl Into<PathBuf>,
        overwrite: bool,
    ) -> ClockResult<Self> {
        Fps::new(fps.num, fps.den)?;
        if fps.den != 1 {
            return Err(ClockError::validation(format!(
                "mp4 recording needs a whole frame rate, got {}/{}",
                fps.num, fps.den
            )));
        }
        let cfg = Self {
            width: canvas.width,
            height: canvas.height,
            fps: fps.num,
            out_path: out_path.into(),
            overwrite,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject sizes and rates that cannot become a yuv420p stream.
    pub fn validate(&self) -> ClockResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ClockError::validation("recording canvas is empty"));
        }
        if self.fps == 0 {
            return Err(ClockError::validation("recording fps is zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(ClockError::validation(format!(
                "recording canvas {}x{} must have even sides for yuv420p",
                self.width, self.height
            )));
        }
        Ok(())
    }

    fn ffmpeg_args(&self) -> Vec<String> {
        let size = format!("{}x{}", self.width, self.height);
        let rate = self.fps.to_string();
        let mut args: Vec<String> = vec![
            if self.overwrite { "-y" } else { "-n" }.into(),
            "-loglevel".into(),
            "error".into(),
        ];
        // Raw frames on stdin.
        args.extend(
            [
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                size.as_str(),
                "-r",
                rate.as_str(),
                "-i",
                "pipe:0",
            ]
            .map(String::from),
        );
        // H.264 in a streamable mp4.
        args.extend(
            [
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]
            .map(String::from),
        );
        args.push(self.out_path.display().to_string());
        args
    }
}

/// Whether an `ffmpeg` binary answers on `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> ClockResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams clock frames into a system `ffmpeg` process.
///
/// Video has no alpha, so every frame is laid over the face's background first.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    background: Rgba8,
    child: Child,
    stdin: Option<ChildStdin>,
    opaque: Vec<u8>,
    frames_written: u64,
}

impl FfmpegEncoder {
    /// Start recording `cfg` over an opaque `background`.
    pub fn new(cfg: EncodeConfig, background: Rgba8) -> ClockResult<Self> {
        cfg.validate()?;
        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(ClockError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(ClockError::encode("no ffmpeg binary found on PATH"));
        }
        ensure_parent_dir(&cfg.out_path)?;

        let mut child = Command::new("ffmpeg")
            .args(cfg.ffmpeg_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ClockError::encode(format!("spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ClockError::encode("ffmpeg stdin unavailable"))?;

        tracing::debug!(
            out = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            "recording started"
        );
        Ok(Self {
            opaque: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            background: Rgba8 {
                a: 255,
                ..background
            },
            child,
            stdin: Some(stdin),
            frames_written: 0,
        })
    }

    /// Append one frame.
    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> ClockResult<()> {
        if (frame.width, frame.height) != (self.cfg.width, self.cfg.height) {
            return Err(ClockError::validation(format!(
                "frame is {}x{} but the recording is {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        lay_over_background(&mut self.opaque, frame, self.background)?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ClockError::encode("recording already finished"))?;
        stdin
            .write_all(&self.opaque)
            .map_err(|e| ClockError::encode(format!("pipe frame to ffmpeg: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    /// Close the stream and wait for ffmpeg; returns the number of frames written.
    pub fn finish(mut self) -> ClockResult<u64> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| ClockError::encode(format!("wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            return Err(ClockError::encode(format!(
                "ffmpeg failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        tracing::info!(
            out = %self.cfg.out_path.display(),
            frames = self.frames_written,
            "mp4 written"
        );
        Ok(self.frames_written)
    }
}

/// Write `frame` composited over an opaque `background` into `dst`.
fn lay_over_background(
    dst: &mut [u8],
    frame: &FrameRGBA,
    background: Rgba8,
) -> ClockResult<()> {
    if dst.len() != frame.data.len() || !dst.len().is_multiple_of(4) {
        return Err(ClockError::validation(
            "frame data does not match the recording size",
        ));
    }

    let bg = [background.r, background.g, background.b].map(u16::from);
    for (out, px) in dst.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let alpha = u16::from(px[3]);
        let uncovered = 255 - alpha;
        for c in 0..3 {
            let ink = u16::from(px[c]);
            let ink = if frame.premultiplied {
                ink
            } else {
                mul_div255_u16(ink, alpha)
            };
            out[c] = (ink + mul_div255_u16(bg[c], uncovered)).min(255) as u8;
        }
        out[3] = 255;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
