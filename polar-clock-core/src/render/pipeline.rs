use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    compose::face::{ClockFace, DrawableFrame},
    config::settings::ClockSettings,
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder},
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{ClockError, ClockResult},
    render::{
        raster::{FrameRGBA, SvgRasterizer},
        style::FaceStyle,
        svg::frame_to_svg,
    },
    time::calendar::{ClockInstant, Timestamp},
    time::decompose::RING_COUNT,
};

/// How sequence rasterization is spread over threads.
///
/// Composition always runs in frame order on the calling thread; only the pure
/// SVG-to-pixels step is parallelized.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Rasterize each chunk on a rayon pool.
    pub parallel: bool,
    /// Frames composed before each rasterization batch (`0` is treated as `1`).
    pub chunk_size: usize,
    /// Pool size override; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Counters reported by sequence renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames produced.
    pub frames_total: u64,
    /// Frames in which at least one ring was snapping back.
    pub frames_snapping: u64,
}

/// Options for [`ClockRenderer::render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Number of frames to record.
    pub frames: u64,
    /// Recording frame rate; must be integral.
    pub fps: Fps,
    /// Whether to replace an existing output file.
    pub overwrite: bool,
    /// Threading of the rasterization step.
    pub threading: RenderThreading,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            frames: 60,
            fps: Fps::default(),
            overwrite: true,
            threading: RenderThreading::default(),
        }
    }
}

/// A clock face bound to a canvas, a style and a rasterizer.
///
/// Owns the face (and therefore the wrap smoother), so frames must be requested in time order.
#[derive(Debug)]
pub struct ClockRenderer {
    canvas: Canvas,
    face: ClockFace,
    style: FaceStyle,
    rasterizer: SvgRasterizer,
}

impl ClockRenderer {
    /// Build a renderer from settings, loading fonts once.
    pub fn new(settings: &ClockSettings) -> ClockResult<Self> {
        settings.validate()?;
        Ok(Self::from_parts(
            settings.canvas,
            settings.face(),
            settings.style(),
            SvgRasterizer::new(settings.font_dir.as_deref()),
        ))
    }

    /// Assemble a renderer from prepared parts.
    pub fn from_parts(
        canvas: Canvas,
        face: ClockFace,
        style: FaceStyle,
        rasterizer: SvgRasterizer,
    ) -> Self {
        Self {
            canvas,
            face,
            style,
            rasterizer,
        }
    }

    /// Output surface.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// The face and its animation state.
    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    /// Compose without rasterizing.
    pub fn compose(&mut self, instant: &ClockInstant) -> DrawableFrame {
        self.face.compose(instant, self.canvas)
    }

    /// Compose and serialize to SVG.
    pub fn render_svg(&mut self, instant: &ClockInstant) -> ClockResult<String> {
        let frame = self.compose(instant);
        frame_to_svg(&frame, &self.style)
    }

    /// Compose and rasterize one frame.
    #[tracing::instrument(level = "debug", skip(self, instant), fields(t = instant.seconds))]
    pub fn render_frame(&mut self, instant: &ClockInstant) -> ClockResult<FrameRGBA> {
        let svg = self.render_svg(instant)?;
        self.rasterizer.rasterize(&svg, self.canvas)
    }

    /// Render `frames` frames starting at `start`, frame `i` at `start + i / fps`.
    #[tracing::instrument(skip(self, threading))]
    pub fn render_sequence(
        &mut self,
        start: &Timestamp,
        fps: Fps,
        frames: u64,
        threading: &RenderThreading,
    ) -> ClockResult<(Vec<FrameRGBA>, RenderStats)> {
        if frames == 0 {
            return Err(ClockError::validation("frame count must be non-zero"));
        }
        Fps::new(fps.num, fps.den)?;

        let pool = maybe_thread_pool(threading)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut out = Vec::with_capacity(frames.min(4096) as usize);
        let mut stats = RenderStats::default();

        let mut chunk_start = 0;
        while chunk_start < frames {
            let chunk_end = (chunk_start + chunk_size).min(frames);
            let mut chunk =
                self.render_chunk(start, fps, chunk_start..chunk_end, pool.as_ref(), &mut stats)?;
            out.append(&mut chunk);
            chunk_start = chunk_end;
        }

        Ok((out, stats))
    }

    /// Record `opts.frames` frames starting at `start` into an MP4 via the system `ffmpeg`.
    #[tracing::instrument(skip(self, out_path, opts))]
    pub fn render_to_mp4(
        &mut self,
        start: &Timestamp,
        out_path: impl Into<PathBuf>,
        opts: RenderToMp4Opts,
    ) -> ClockResult<RenderStats> {
        if opts.frames == 0 {
            return Err(ClockError::validation("frame count must be non-zero"));
        }
        let cfg = EncodeConfig::for_canvas(self.canvas, opts.fps, out_path, opts.overwrite)?;
        let mut enc = FfmpegEncoder::new(cfg, self.style.theme.background())?;

        let pool = maybe_thread_pool(&opts.threading)?;
        let chunk_size = normalized_chunk_size(opts.threading.chunk_size);
        let mut stats = RenderStats::default();

        let mut chunk_start = 0;
        while chunk_start < opts.frames {
            let chunk_end = (chunk_start + chunk_size).min(opts.frames);
            let frames = self.render_chunk(
                start,
                opts.fps,
                chunk_start..chunk_end,
                pool.as_ref(),
                &mut stats,
            )?;
            for frame in &frames {
                enc.encode_frame(frame)?;
            }
            chunk_start = chunk_end;
        }

        enc.finish()?;
        Ok(stats)
    }

    fn render_chunk(
        &mut self,
        start: &Timestamp,
        fps: Fps,
        range: std::ops::Range<u64>,
        pool: Option<&rayon::ThreadPool>,
        stats: &mut RenderStats,
    ) -> ClockResult<Vec<FrameRGBA>> {
        let mut svgs = Vec::with_capacity((range.end - range.start) as usize);
        for f in range {
            let instant = ClockInstant::at_offset(start, fps.frames_to_secs(FrameIndex(f)));
            let frame = self.face.compose(&instant, self.canvas);
            let smoother = self.face.smoother();
            if (0..RING_COUNT).any(|i| smoother.state(i).is_some_and(|s| s.is_snapping)) {
                stats.frames_snapping += 1;
            }
            svgs.push(frame_to_svg(&frame, &self.style)?);
            stats.frames_total += 1;
        }

        let canvas = self.canvas;
        let rasterizer = &self.rasterizer;
        let rendered: Vec<ClockResult<FrameRGBA>> = match pool {
            Some(pool) => pool.install(|| {
                svgs.par_iter()
                    .map(|svg| rasterizer.rasterize(svg, canvas))
                    .collect()
            }),
            None => svgs
                .iter()
                .map(|svg| rasterizer.rasterize(svg, canvas))
                .collect(),
        };
        rendered.into_iter().collect()
    }
}

fn maybe_thread_pool(threading: &RenderThreading) -> ClockResult<Option<rayon::ThreadPool>> {
    if !threading.parallel {
        return Ok(None);
    }
    build_thread_pool(threading.threads).map(Some)
}

fn build_thread_pool(threads: Option<usize>) -> ClockResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ClockError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ClockError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
