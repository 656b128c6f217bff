use crate::{
    animation::smoother::{SnapConfig, WrapSmoother},
    foundation::core::{Canvas, Point},
    foundation::error::{ClockError, ClockResult},
    layout::arc::{RingLayout, layout_ring},
    time::calendar::ClockInstant,
    time::decompose::{RING_COUNT, RingKind, decompose},
};

/// Face measurements relative to the smaller canvas dimension.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FaceProportions {
    /// Stroke width as a fraction of the smaller canvas dimension.
    pub stroke_ratio: f64,
    /// Distance between ring centers in stroke widths.
    pub ring_spacing: f64,
    /// Innermost radius as a fraction of the smaller canvas dimension.
    pub inner_radius_ratio: f64,
}

impl Default for FaceProportions {
    fn default() -> Self {
        Self {
            stroke_ratio: 0.04,
            ring_spacing: 1.8,
            inner_radius_ratio: 0.12,
        }
    }
}

impl FaceProportions {
    /// Reject non-positive or non-finite proportions.
    pub fn validate(&self) -> ClockResult<()> {
        for (name, v) in [
            ("stroke_ratio", self.stroke_ratio),
            ("ring_spacing", self.ring_spacing),
            ("inner_radius_ratio", self.inner_radius_ratio),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ClockError::validation(format!(
                    "face proportion '{name}' must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the proportions against a concrete canvas.
    pub fn resolve(&self, canvas: Canvas) -> FaceGeometry {
        let min_dimension = canvas.min_dimension();
        let stroke_width = min_dimension * self.stroke_ratio;
        FaceGeometry {
            center: canvas.center(),
            stroke_width,
            ring_spacing: stroke_width * self.ring_spacing,
            inner_radius: min_dimension * self.inner_radius_ratio,
        }
    }
}

/// Pixel measurements of a face on one canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FaceGeometry {
    /// Shared center of every ring.
    pub center: Point,
    /// Stroke width of every ring.
    pub stroke_width: f64,
    /// Distance between consecutive ring radii.
    pub ring_spacing: f64,
    /// Radius of ring 0.
    pub inner_radius: f64,
}

impl FaceGeometry {
    /// Radius of ring `index` (0 = innermost).
    pub fn ring_radius(&self, index: usize) -> f64 {
        self.inner_radius + index as f64 * self.ring_spacing
    }
}

/// One ring ready to draw.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RingDrawable {
    /// Unit shown by the ring.
    pub kind: RingKind,
    /// Label text.
    pub label: String,
    /// Palette slot.
    pub color_index: usize,
    /// Ring radius.
    pub radius: f64,
    /// Progress straight from the calendar.
    pub real_progress: f64,
    /// Progress after wrap smoothing, before label widening.
    pub smoothed_progress: f64,
    /// Arc and glyph geometry.
    pub layout: RingLayout,
}

/// A complete frame description, innermost ring first.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawableFrame {
    /// Surface the frame was composed for.
    pub canvas: Canvas,
    /// Face measurements used.
    pub geometry: FaceGeometry,
    /// Rings in draw order.
    pub rings: Vec<RingDrawable>,
}

/// A running clock: proportions plus the wrap smoother that persists between frames.
///
/// The host pulls one frame per tick with [`ClockFace::compose`].
#[derive(Clone, Debug, Default)]
pub struct ClockFace {
    proportions: FaceProportions,
    smoother: WrapSmoother,
}

impl ClockFace {
    /// New face with fresh animation state.
    pub fn new(proportions: FaceProportions, snap: SnapConfig) -> Self {
        Self {
            proportions,
            smoother: WrapSmoother::new(snap),
        }
    }

    /// Proportions in use.
    pub fn proportions(&self) -> &FaceProportions {
        &self.proportions
    }

    /// Animation state, read-only.
    pub fn smoother(&self) -> &WrapSmoother {
        &self.smoother
    }

    /// Compose the frame for `instant` on `canvas`, advancing every ring's animation state once.
    #[tracing::instrument(level = "trace", skip(self, instant), fields(t = instant.seconds))]
    pub fn compose(&mut self, instant: &ClockInstant, canvas: Canvas) -> DrawableFrame {
        let geometry = self.proportions.resolve(canvas);
        let specs = decompose(&instant.fields.sanitized());

        let mut rings = Vec::with_capacity(RING_COUNT);
        for (index, spec) in specs.into_iter().enumerate() {
            let smoothed = self
                .smoother
                .display_progress(index, spec.progress, instant.seconds);
            let radius = geometry.ring_radius(index);
            let layout = layout_ring(
                smoothed,
                geometry.center,
                radius,
                geometry.stroke_width,
                &spec.label,
            );
            rings.push(RingDrawable {
                kind: spec.kind,
                label: spec.label,
                color_index: spec.color_index,
                radius,
                real_progress: spec.progress,
                smoothed_progress: smoothed,
                layout,
            });
        }

        DrawableFrame {
            canvas,
            geometry,
            rings,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/face.rs"]
mod tests;
