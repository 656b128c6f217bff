use std::f64::consts::PI;

use super::*;

const EPS: f64 = 1e-9;

fn center() -> Point {
    Point::new(500.0, 400.0)
}

#[test]
fn font_and_glyph_width_ratios() {
    assert_eq!(font_size(40.0), 20.0);
    assert!((char_width(20.0) - 12.0).abs() < EPS);
}

#[test]
fn minimum_progress_matches_arc_length_formula() {
    let min = minimum_progress(8, 120.0, 20.0);
    let expected = (8.0 * 12.0) / (2.0 * PI * 120.0);
    assert!((min - expected).abs() < EPS);
}

#[test]
fn december_label_never_shrinks_below_its_text() {
    let layout = layout_ring(0.001, center(), 120.0, 40.0, "december");
    assert!(layout.minimum_progress > 0.001);
    assert!(layout.display_progress >= layout.minimum_progress);
    assert_eq!(layout.display_progress, layout.minimum_progress);
    assert_eq!(layout.glyphs.len(), 8);
}

#[test]
fn real_progress_wins_when_larger_than_minimum() {
    let layout = layout_ring(0.6, center(), 120.0, 40.0, "may");
    assert_eq!(layout.display_progress, 0.6);
    assert!((layout.arc.end_angle_deg - (-90.0 + 0.6 * 360.0)).abs() < EPS);
    assert_eq!(layout.arc.start_angle_deg, -90.0);
    assert_eq!(layout.arc.line_cap, LineCap::Round);
}

#[test]
fn flip_boundaries() {
    assert!(should_flip(90.0));
    assert!(should_flip(45.0));
    assert!(should_flip(179.0));
    assert!(should_flip(450.0));
    assert!(!should_flip(270.0));
    assert!(!should_flip(-90.0));
    assert!(!should_flip(0.0));
    assert!(!should_flip(180.0));
    assert!(!should_flip(-10.0));
}

#[test]
fn chord_to_arc_small_chord_approximates_ratio() {
    let a = chord_to_arc(1.0, 1000.0);
    assert!((a - 0.001).abs() < 1e-9);
}

#[test]
fn chord_to_arc_clamps_degenerate_inputs() {
    assert!((chord_to_arc(10.0, 1.0) - PI).abs() < EPS);
    assert!((chord_to_arc(10.0, 0.0) - PI).abs() < EPS);
    assert_eq!(chord_to_arc(0.0, 0.0), 0.0);
    assert!(chord_to_arc(12.0, -3.0).is_finite());
}

#[test]
fn degenerate_radius_has_no_minimum() {
    assert_eq!(minimum_progress(8, 0.0, 20.0), 0.0);
    assert_eq!(minimum_progress(8, -5.0, 20.0), 0.0);
    let layout = layout_ring(0.5, center(), 0.0, 40.0, "december");
    assert!(layout.glyphs.iter().all(|g| g.x.is_finite() && g.y.is_finite()));
}

#[test]
fn unflipped_label_ends_at_arc_end() {
    // 0.8 of a turn ends at 198 degrees: upper-left, not flipped.
    let layout = layout_ring(0.8, center(), 200.0, 40.0, "abc");
    let end = layout.arc.end_angle_deg.to_radians();
    let w = chord_to_arc(char_width(layout.font_size), 200.0);

    assert!(!should_flip(layout.arc.end_angle_deg));
    let g = &layout.glyphs;
    assert_eq!(g.len(), 3);
    assert!((g[2].angle_rad + w / 2.0 - end).abs() < EPS);
    assert!((g[0].angle_rad - w / 2.0 - (end - 3.0 * w)).abs() < EPS);
    assert!(g[0].angle_rad < g[1].angle_rad && g[1].angle_rad < g[2].angle_rad);
    for p in g {
        assert!((p.rotation_deg - (p.angle_rad.to_degrees() + 90.0)).abs() < EPS);
    }
}

#[test]
fn flipped_label_walks_backwards_from_arc_end() {
    // 0.5 of a turn ends at 90 degrees: 6 o'clock, flipped.
    let layout = layout_ring(0.5, center(), 200.0, 40.0, "abc");
    let end = layout.arc.end_angle_deg.to_radians();
    let w = chord_to_arc(char_width(layout.font_size), 200.0);

    assert!(should_flip(layout.arc.end_angle_deg));
    let g = &layout.glyphs;
    assert_eq!(g.iter().map(|p| p.character).collect::<String>(), "abc");
    assert!((g[0].angle_rad - (end - w / 2.0)).abs() < EPS);
    assert!((g[2].angle_rad - (end - 2.5 * w)).abs() < EPS);
    assert!(g[0].angle_rad > g[1].angle_rad && g[1].angle_rad > g[2].angle_rad);
    for p in g {
        assert!((p.rotation_deg - (p.angle_rad.to_degrees() - 90.0)).abs() < EPS);
    }
}

#[test]
fn glyphs_sit_on_the_circle() {
    let c = center();
    let layout = layout_ring(0.3, c, 150.0, 30.0, "12 minutes");
    assert_eq!(layout.glyphs.len(), 10);
    for g in &layout.glyphs {
        let d = g.position().distance(c);
        assert!((d - 150.0).abs() < 1e-6);
        assert!((g.x - (c.x + 150.0 * g.angle_rad.cos())).abs() < EPS);
        assert!((g.y - (c.y + 150.0 * g.angle_rad.sin())).abs() < EPS);
    }
}

#[test]
fn near_empty_ring_has_no_label() {
    let layout = layout_ring(0.005, center(), 150.0, 30.0, "");
    assert_eq!(layout.display_progress, 0.005);
    assert!(layout.glyphs.is_empty());
}

#[test]
fn progress_is_clamped_to_a_full_turn() {
    let layout = layout_ring(1.7, center(), 150.0, 30.0, "x");
    assert_eq!(layout.display_progress, 1.0);
    assert!((layout.arc.sweep_deg() - 360.0).abs() < EPS);
}

#[test]
fn layout_is_idempotent() {
    let a = layout_ring(0.42, center(), 180.0, 36.0, "wednesday");
    let b = layout_ring(0.42, center(), 180.0, 36.0, "wednesday");
    assert_eq!(a, b);
}

#[test]
fn arc_path_starts_at_twelve_o_clock() {
    let layout = layout_ring(0.25, Point::new(0.0, 0.0), 100.0, 10.0, "");
    let arc = layout.arc.to_arc();
    assert!((arc.sweep_angle - PI / 2.0).abs() < EPS);
    let path = layout.arc.to_path(0.1);
    let first = path.elements().first().copied();
    match first {
        Some(kurbo::PathEl::MoveTo(p)) => {
            assert!(p.x.abs() < 1e-6);
            assert!((p.y + 100.0).abs() < 1e-6);
        }
        other => panic!("unexpected first element {other:?}"),
    }
}
