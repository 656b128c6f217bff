//! Arc geometry and curved-label layout.
//!
//! Angles follow screen conventions: `0°` points at 3 o'clock and angles grow clockwise because
//! `y` grows downward. Rings start at 12 o'clock (`-90°`).

use kurbo::Shape as _;

use crate::foundation::{
    core::{BezPath, Point, Vec2},
    math::clamp_unit,
};

/// Label font size as a fraction of the stroke width.
pub const FONT_SIZE_RATIO: f64 = 0.5;
/// Estimated advance of one glyph as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Angle every ring starts from (12 o'clock), in degrees.
pub const START_ANGLE_DEG: f64 = -90.0;
/// Rings at or below this progress are drawn without a label.
pub const LABEL_MIN_PROGRESS: f64 = 0.01;

/// Stroke end style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Flat end at the path end.
    Butt,
    /// Semicircular end.
    #[default]
    Round,
}

impl LineCap {
    /// SVG `stroke-linecap` keyword.
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Stroked circular arc swept from `start_angle_deg` towards increasing angles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArcStroke {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Stroke width.
    pub stroke_width: f64,
    /// Start angle in degrees.
    pub start_angle_deg: f64,
    /// End angle in degrees, `>= start_angle_deg`.
    pub end_angle_deg: f64,
    /// Cap style at both ends.
    pub line_cap: LineCap,
}

impl ArcStroke {
    /// Swept angle in degrees.
    pub fn sweep_deg(&self) -> f64 {
        self.end_angle_deg - self.start_angle_deg
    }

    /// The arc as a kurbo shape.
    pub fn to_arc(&self) -> kurbo::Arc {
        let r = self.radius.max(0.0);
        kurbo::Arc {
            center: self.center,
            radii: Vec2::new(r, r),
            start_angle: self.start_angle_deg.to_radians(),
            sweep_angle: self.sweep_deg().to_radians(),
            x_rotation: 0.0,
        }
    }

    /// Flattened-to-cubics path of the arc's center line.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        self.to_arc().to_path(tolerance)
    }
}

/// One glyph of a curved label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharacterPlacement {
    /// The glyph.
    pub character: char,
    /// Angle of the glyph center on the circle, in radians.
    pub angle_rad: f64,
    /// Glyph rotation in degrees, keeping it tangent to the arc and upright.
    pub rotation_deg: f64,
    /// Glyph center x.
    pub x: f64,
    /// Glyph center y.
    pub y: f64,
}

impl CharacterPlacement {
    /// Glyph center.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Everything needed to draw one ring.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingLayout {
    /// Progress actually drawn, never below [`RingLayout::minimum_progress`].
    pub display_progress: f64,
    /// Smallest progress whose arc can hold the label.
    pub minimum_progress: f64,
    /// Label font size.
    pub font_size: f64,
    /// The stroked arc.
    pub arc: ArcStroke,
    /// Label glyphs, empty for near-empty rings.
    pub glyphs: Vec<CharacterPlacement>,
}

/// Label font size for a ring drawn with `stroke_width`.
pub fn font_size(stroke_width: f64) -> f64 {
    stroke_width * FONT_SIZE_RATIO
}

/// Estimated glyph advance. This is a fixed approximation, not a font measurement.
pub fn char_width(font_size: f64) -> f64 {
    font_size * CHAR_WIDTH_RATIO
}

/// Smallest progress whose arc length at `radius` holds `label_len` glyphs.
///
/// Degenerate radii yield `0` (no extension); results are clamped to `[0, 1]`.
pub fn minimum_progress(label_len: usize, radius: f64, font_size: f64) -> f64 {
    let circumference = 2.0 * std::f64::consts::PI * radius;
    if !(circumference.is_finite() && circumference > 0.0) {
        return 0.0;
    }
    let text_width = label_len as f64 * char_width(font_size);
    let minimum_degrees = (text_width / circumference) * 360.0;
    clamp_unit(minimum_degrees / 360.0)
}

/// End angle in degrees of a ring showing `display_progress`.
pub fn end_angle_deg(display_progress: f64) -> f64 {
    START_ANGLE_DEG + display_progress * 360.0
}

/// Angle in radians subtended by a chord of length `chord` on a circle of `radius`.
///
/// The `asin` argument is clamped to `[-1, 1]`, so chords wider than the circle take half a turn.
pub fn chord_to_arc(chord: f64, radius: f64) -> f64 {
    let ratio = chord / (2.0 * radius);
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(-1.0, 1.0)
    };
    2.0 * ratio.asin()
}

/// Whether a label ending at `end_angle_deg` sits on the lower half of the circle and must be
/// reversed to read upright.
pub fn should_flip(end_angle_deg: f64) -> bool {
    let normalized = end_angle_deg.rem_euclid(360.0);
    normalized > 0.0 && normalized < 180.0
}

/// Place the glyphs of `label` along the circle so the text ends at `end_angle_deg`.
pub fn layout_label(
    label: &str,
    center: Point,
    radius: f64,
    end_angle_deg: f64,
    font_size: f64,
) -> Vec<CharacterPlacement> {
    let glyph_arc = chord_to_arc(char_width(font_size), radius);
    let arcs: Vec<(char, f64)> = label.chars().map(|c| (c, glyph_arc)).collect();
    let total_arc: f64 = arcs.iter().map(|(_, a)| a).sum();

    let flip = should_flip(end_angle_deg);
    let end_rad = end_angle_deg.to_radians();
    let start_rad = end_rad - total_arc;
    let turn = if flip { -90.0 } else { 90.0 };

    let mut before = 0.0;
    let mut out = Vec::with_capacity(arcs.len());
    for (character, arc) in arcs {
        let angle_rad = if flip {
            end_rad - before - arc / 2.0
        } else {
            start_rad + before + arc / 2.0
        };
        before += arc;

        out.push(CharacterPlacement {
            character,
            angle_rad,
            rotation_deg: angle_rad.to_degrees() + turn,
            x: center.x + radius * angle_rad.cos(),
            y: center.y + radius * angle_rad.sin(),
        });
    }
    out
}

/// Lay out a full ring: widen the arc to fit its label, then place the label at the arc's end.
pub fn layout_ring(
    progress: f64,
    center: Point,
    radius: f64,
    stroke_width: f64,
    label: &str,
) -> RingLayout {
    let font_size = font_size(stroke_width);
    let minimum_progress = minimum_progress(label.chars().count(), radius, font_size);
    let display_progress = clamp_unit(progress.max(minimum_progress));
    let end = end_angle_deg(display_progress);

    let arc = ArcStroke {
        center,
        radius,
        stroke_width,
        start_angle_deg: START_ANGLE_DEG,
        end_angle_deg: end,
        line_cap: LineCap::Round,
    };

    let glyphs = if display_progress > LABEL_MIN_PROGRESS {
        layout_label(label, center, radius, end, font_size)
    } else {
        Vec::new()
    };

    RingLayout {
        display_progress,
        minimum_progress,
        font_size,
        arc,
        glyphs,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/arc.rs"]
mod tests;
