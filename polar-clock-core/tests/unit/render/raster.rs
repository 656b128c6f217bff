use super::*;
use crate::{
    compose::face::ClockFace,
    render::{
        style::{FaceStyle, RING_PALETTE, Theme},
        svg::frame_to_svg,
    },
    time::calendar::{ClockInstant, Timestamp},
};

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}

fn canvas() -> Canvas {
    Canvas {
        width: 200,
        height: 200,
    }
}

#[test]
fn rasterizes_plain_svg() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="#ff0000"/></svg>"##;
    let frame = SvgRasterizer::new(None)
        .rasterize(
            svg,
            Canvas {
                width: 4,
                height: 4,
            },
        )
        .unwrap();
    assert_eq!(frame.data.len(), 4 * 4 * 4);
    assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(4, 0), None);
}

#[test]
fn broken_svg_is_an_error() {
    let err = SvgRasterizer::new(None).rasterize("<svg", canvas());
    assert!(err.is_err());
}

#[test]
fn clock_face_pixels_show_background_and_ring_color() {
    let at = Timestamp::parse_from_rfc3339("2024-03-15T13:45:30.500Z").unwrap();
    let drawable = ClockFace::default().compose(&ClockInstant::from_datetime(&at), canvas());
    let rasterizer = SvgRasterizer::new(None);

    for theme in [Theme::Dark, Theme::Light] {
        let svg = frame_to_svg(&drawable, &FaceStyle::for_theme(theme)).unwrap();
        let frame = rasterizer.rasterize(&svg, canvas()).unwrap();
        assert_eq!(frame.pixel(0, 0), Some(theme.background().to_array()));

        // Month ring (radius 24) starts at 12 o'clock.
        let month = frame.pixel(100, 76).unwrap();
        assert!(
            close(month, RING_PALETTE[0].to_array()),
            "month ring pixel {month:?}"
        );
    }
}

#[test]
fn straight_alpha_conversion() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 128, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![128, 0, 255, 128]);
}

#[test]
fn save_png_writes_file() {
    let dir = std::env::temp_dir().join("polar_clock_raster_test");
    let path = dir.join("one.png");
    let _ = std::fs::remove_file(&path);
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![255; 16],
        premultiplied: true,
    };
    save_png(&frame, &path).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (2, 2));
}
