use polar_clock::{ClockRenderer, ClockSettings, RenderThreading, RenderToMp4Opts};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    if !polar_clock::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg not found on PATH");
    }

    let settings = ClockSettings::default();
    let mut renderer = ClockRenderer::new(&settings)?;
    let out_path = std::path::Path::new("target").join("polar_clock.mp4");

    let stats = renderer.render_to_mp4(
        &polar_clock::local_now(),
        &out_path,
        RenderToMp4Opts {
            frames: u64::from(settings.fps.num) * 3,
            fps: settings.fps,
            overwrite: true,
            threading: RenderThreading {
                parallel: true,
                ..RenderThreading::default()
            },
        },
    )?;

    eprintln!(
        "wrote {} ({} frames)",
        out_path.display(),
        stats.frames_total
    );
    Ok(())
}
