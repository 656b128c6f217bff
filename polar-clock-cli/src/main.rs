use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use polar_clock::{
    ClockRenderer, ClockSettings, FixedClock, RenderThreading, RenderToMp4Opts, SystemClock,
    Theme, TimeSource, Timestamp,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "polar-clock", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single clock face as a PNG.
    Frame(FrameArgs),
    /// Print the composed frame (rings, arcs, glyph placements) as JSON.
    Layout(LayoutArgs),
    /// Record the clock running into an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ClockArgs {
    /// Instant to show (RFC 3339); defaults to the local system clock.
    #[arg(long, value_parser = parse_timestamp)]
    at: Option<Timestamp>,

    /// Settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Override background theme.
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Recording length in seconds.
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Fail instead of replacing an existing output file.
    #[arg(long = "no-overwrite", action = ArgAction::SetFalse)]
    overwrite: bool,

    /// Rasterize frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames composed per rasterization batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn parse_timestamp(s: &str) -> Result<Timestamp, String> {
    chrono::DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid RFC 3339 time: {e}"))
}

impl ClockArgs {
    fn settings(&self) -> anyhow::Result<ClockSettings> {
        let mut settings = match &self.config {
            Some(path) => ClockSettings::from_path(path)?,
            None => ClockSettings::default(),
        };
        if let Some(width) = self.width {
            settings.canvas.width = width;
        }
        if let Some(height) = self.height {
            settings.canvas.height = height;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme.into();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// `--at` pins the clock; otherwise it follows the system clock.
    fn clock(&self) -> Box<dyn TimeSource> {
        match self.at {
            Some(at) => Box::new(FixedClock(at)),
            None => Box::new(SystemClock),
        }
    }

    fn start(&self) -> Timestamp {
        self.at.unwrap_or_else(polar_clock::local_now)
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let settings = args.clock.settings()?;
    let mut renderer = ClockRenderer::new(&settings)?;
    let instant = args.clock.clock().now();
    let frame = renderer.render_frame(&instant)?;
    polar_clock::save_png(&frame, &args.out)?;

    tracing::info!(out = %args.out.display(), "wrote png");
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let settings = args.clock.settings()?;
    let mut face = settings.face();
    let instant = args.clock.clock().now();
    let frame = face.compose(&instant, settings.canvas);
    let json = serde_json::to_string_pretty(&frame).context("serialize frame layout")?;

    match &args.out {
        Some(out) => {
            write_text(out, &json)?;
            tracing::info!(out = %out.display(), "wrote layout");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        anyhow::bail!("--seconds must be a positive number");
    }
    let settings = args.clock.settings()?;
    let frames = settings.fps.secs_to_frames_floor(args.seconds).max(1);
    let mut renderer = ClockRenderer::new(&settings)?;

    let opts = RenderToMp4Opts {
        frames,
        fps: settings.fps,
        overwrite: args.overwrite,
        threading: RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
        },
    };
    let stats = renderer.render_to_mp4(&args.clock.start(), &args.out, opts)?;

    tracing::info!(
        out = %args.out.display(),
        frames = stats.frames_total,
        snapping = stats.frames_snapping,
        "wrote mp4"
    );
    Ok(())
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    polar_clock::ensure_parent_dir(path)?;
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}
