use polar_clock::{ClockInstant, ClockRenderer, ClockSettings, Theme, save_png};

fn parse_theme() -> Theme {
    match std::env::args().nth(1).as_deref() {
        Some("light") => Theme::Light,
        _ => Theme::Dark,
    }
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let settings = ClockSettings {
        theme: parse_theme(),
        ..ClockSettings::default()
    };
    let mut renderer = ClockRenderer::new(&settings)?;
    let instant = ClockInstant::from_datetime(&polar_clock::local_now());
    let frame = renderer.render_frame(&instant)?;

    let out_path = std::path::Path::new("target").join("render_one_frame.png");
    save_png(&frame, &out_path)?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}
