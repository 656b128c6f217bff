use super::*;

#[test]
fn fps_validation_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    assert_eq!(Fps::new(60, 1).unwrap(), Fps::default());
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(FrameIndex(123));
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn canvas_center_and_min_dimension() {
    let c = Canvas::new(800, 600).unwrap();
    assert_eq!(c.min_dimension(), 600.0);
    assert_eq!(c.center(), Point::new(400.0, 300.0));
    assert!(Canvas::new(0, 10).is_err());
}

#[test]
fn rgba_hex_and_opacity() {
    let c = Rgba8 {
        r: 255,
        g: 8,
        b: 171,
        a: 51,
    };
    assert_eq!(c.to_hex(), "#ff08ab");
    assert!((c.opacity() - 0.2).abs() < 1e-12);
    assert_eq!(Rgba8::rgb(1, 2, 3).to_array(), [1, 2, 3, 255]);
}
