use polar_clock::{Canvas, ClockFace, ClockInstant, Fps, FrameIndex, RingKind};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let start = chrono::DateTime::parse_from_rfc3339("2024-03-15T13:45:59.5Z")?;
    let fps = Fps::new(20, 1)?;
    let mut face = ClockFace::default();

    for f in 0..30u64 {
        let instant = ClockInstant::at_offset(&start, fps.frames_to_secs(FrameIndex(f)));
        let frame = face.compose(&instant, Canvas::default());
        let Some(seconds) = frame.rings.iter().find(|r| r.kind == RingKind::Second) else {
            continue;
        };
        println!(
            "frame {f:2}: real {:.4} shown {:.4} {}",
            seconds.real_progress, seconds.smoothed_progress, seconds.label
        );
    }

    Ok(())
}
