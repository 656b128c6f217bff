use super::*;
use crate::{
    compose::face::ClockFace,
    foundation::core::Canvas,
    render::style::{RING_PALETTE, Theme},
    time::calendar::{ClockInstant, Timestamp},
};

fn frame() -> DrawableFrame {
    let at = Timestamp::parse_from_rfc3339("2024-03-15T13:45:30.500Z").unwrap();
    ClockFace::default().compose(
        &ClockInstant::from_datetime(&at),
        Canvas {
            width: 320,
            height: 240,
        },
    )
}

#[test]
fn document_has_one_arc_per_ring_and_one_text_per_visible_glyph() {
    let frame = frame();
    let svg = frame_to_svg(&frame, &FaceStyle::default()).unwrap();

    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<path ").count(), 6);

    let visible: usize = frame
        .rings
        .iter()
        .flat_map(|r| &r.layout.glyphs)
        .filter(|g| !g.character.is_whitespace())
        .count();
    assert!(visible > 0);
    assert_eq!(svg.matches("<text ").count(), visible);
}

#[test]
fn ring_colors_and_theme_background_are_used() {
    let frame = frame();
    let dark = frame_to_svg(&frame, &FaceStyle::default()).unwrap();
    assert!(dark.contains(r##"fill="#000000""##));
    for c in RING_PALETTE {
        assert!(dark.contains(&format!(r#"stroke="{}""#, c.to_hex())));
    }

    let light = frame_to_svg(&frame, &FaceStyle::for_theme(Theme::Light)).unwrap();
    assert!(light.contains(r##"<rect x="0" y="0" width="320" height="240" fill="#ffffff"/>"##));
}

#[test]
fn document_parses_as_svg() {
    let svg = frame_to_svg(&frame(), &FaceStyle::default()).unwrap();
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 320.0);
    assert_eq!(tree.size().height(), 240.0);
}

#[test]
fn xml_special_characters_are_escaped() {
    assert_eq!(escape_xml(r#"a&b<c>"d'"#), "a&amp;b&lt;c&gt;&quot;d&apos;");
    assert_eq!(escape_xml("plain"), "plain");
}

#[test]
fn palette_wraps_past_ring_count() {
    let style = FaceStyle::default();
    assert_eq!(style.ring_color(6), style.ring_color(0));
}
