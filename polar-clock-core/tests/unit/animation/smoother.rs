use super::*;

fn wrapped_smoother() -> WrapSmoother {
    let mut s = WrapSmoother::new(SnapConfig::default());
    assert_eq!(s.display_progress(5, 0.95, 10.0), 0.95);
    s
}

#[test]
fn wrap_starts_at_full_and_lands_on_real_progress() {
    let mut s = wrapped_smoother();

    let at_start = s.display_progress(5, 0.02, 11.0);
    assert_eq!(at_start, 1.0);
    let st = s.state(5).unwrap();
    assert!(st.is_snapping);
    assert_eq!(st.snap_start_time, Some(11.0));
    assert_eq!(st.snap_start_progress, 0.02);

    let at_end = s.display_progress(5, 0.02, 11.5);
    assert_eq!(at_end, 0.02);
    assert!(!s.state(5).unwrap().is_snapping);
    assert_eq!(s.state(5).unwrap().snap_start_time, None);
}

#[test]
fn snap_back_is_strictly_decreasing_and_bounded() {
    let mut s = wrapped_smoother();
    let real = 0.02;
    let mut last = s.display_progress(5, real, 11.0);
    for step in 1..50 {
        let now = 11.0 + f64::from(step) * 0.01;
        let v = s.display_progress(5, real, now);
        assert!(v < last, "step {step}: {v} !< {last}");
        assert!((real..=1.0).contains(&v));
        last = v;
    }
}

#[test]
fn snap_back_follows_ease_out_formula() {
    let mut s = wrapped_smoother();
    s.display_progress(5, 0.02, 11.0);
    let v = s.display_progress(5, 0.04, 11.25);
    let e = 1.0 - (1.0_f64 - 0.5).powi(2);
    assert!((v - (1.0 - e * (1.0 - 0.04))).abs() < 1e-12);
}

#[test]
fn no_false_wrap_on_small_backward_step() {
    let mut s = WrapSmoother::new(SnapConfig::default());
    s.display_progress(0, 0.5, 0.0);
    assert_eq!(s.display_progress(0, 0.45, 0.016), 0.45);
    assert!(!s.state(0).unwrap().is_snapping);
}

#[test]
fn first_frame_never_wraps() {
    let mut s = WrapSmoother::new(SnapConfig::default());
    for ring in 0..RING_COUNT {
        assert_eq!(s.display_progress(ring, 0.01, 0.0), 0.01);
        assert!(!s.state(ring).unwrap().is_snapping);
    }
}

#[test]
fn wrap_while_snapping_does_not_restart() {
    let mut s = wrapped_smoother();
    s.display_progress(5, 0.02, 11.0);
    s.display_progress(5, 0.95, 11.1);
    s.display_progress(5, 0.03, 11.2);
    let st = s.state(5).unwrap();
    assert!(st.is_snapping);
    assert_eq!(st.snap_start_time, Some(11.0));
    assert_eq!(st.snap_start_progress, 0.02);
}

#[test]
fn previous_progress_tracks_every_frame() {
    let mut s = wrapped_smoother();
    s.display_progress(5, 0.02, 11.0);
    assert_eq!(s.state(5).unwrap().previous_progress, 0.02);
    s.display_progress(5, 0.03, 11.1);
    assert_eq!(s.state(5).unwrap().previous_progress, 0.03);
}

#[test]
fn rings_are_independent() {
    let mut s = wrapped_smoother();
    s.display_progress(4, 0.5, 10.0);
    s.display_progress(5, 0.02, 11.0);
    assert_eq!(s.display_progress(4, 0.51, 11.0), 0.51);
    assert!(!s.state(4).unwrap().is_snapping);
}

#[test]
fn unknown_ring_passes_through() {
    let mut s = WrapSmoother::default();
    assert_eq!(s.display_progress(RING_COUNT, 0.3, 0.0), 0.3);
    assert!(s.state(RING_COUNT).is_none());
}

#[test]
fn clock_running_backwards_holds_full_ring() {
    let mut s = wrapped_smoother();
    s.display_progress(5, 0.02, 11.0);
    assert_eq!(s.display_progress(5, 0.02, 10.5), 1.0);
}

#[test]
fn config_validation() {
    assert!(SnapConfig::default().validate().is_ok());
    let bad_duration = SnapConfig {
        duration_secs: 0.0,
        ..SnapConfig::default()
    };
    assert!(bad_duration.validate().is_err());
    let inverted = SnapConfig {
        wrap_low: 0.9,
        wrap_high: 0.1,
        ..SnapConfig::default()
    };
    assert!(inverted.validate().is_err());
    let out_of_range = SnapConfig {
        wrap_high: 1.5,
        ..SnapConfig::default()
    };
    assert!(out_of_range.validate().is_err());
}

#[test]
fn custom_duration_and_ease() {
    let mut s = WrapSmoother::new(SnapConfig {
        duration_secs: 2.0,
        ease: Ease::Linear,
        ..SnapConfig::default()
    });
    s.display_progress(3, 0.99, 0.0);
    s.display_progress(3, 0.0, 1.0);
    let v = s.display_progress(3, 0.0, 2.0);
    assert!((v - 0.5).abs() < 1e-12);
    assert_eq!(s.display_progress(3, 0.0, 3.0), 0.0);
}
