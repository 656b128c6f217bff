//! Polar clock: a clock face of six concentric, progressively filling rings.
//!
//! From the inside out, the rings show month of year, day of month, day of week,
//! hour, minute and second. Each ring carries a label that is laid out along the
//! curve and rides the leading edge of its arc.
//!
//! # Pipeline overview
//!
//! 1. **Decompose**: `CalendarFields -> [RingSpec; 6]` (nested cycle progress plus labels)
//! 2. **Smooth**: per-ring [`WrapSmoother`] turns the jump back to zero into a short snap
//! 3. **Lay out**: arc geometry and per-character placement along each ring
//! 4. **Compose**: [`ClockFace::compose`] produces a [`DrawableFrame`]
//! 5. **Render** (optional): SVG via [`frame_to_svg`], pixels via [`SvgRasterizer`],
//!    and MP4 through the system `ffmpeg` binary
//!
//! Everything up to step 4 is pure and deterministic for a given sequence of instants.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod compose;
mod config;
mod encode;
mod foundation;
mod layout;
mod render;
mod time;

pub use animation::ease::Ease;
pub use animation::smoother::{RingAnimState, SnapConfig, WrapSmoother};
pub use compose::face::{ClockFace, DrawableFrame, FaceGeometry, FaceProportions, RingDrawable};
pub use config::settings::ClockSettings;
pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use foundation::core::{BezPath, Canvas, Fps, FrameIndex, Point, Rgba8, Vec2};
pub use foundation::error::{ClockError, ClockResult};
pub use layout::arc::{
    ArcStroke, CHAR_WIDTH_RATIO, CharacterPlacement, FONT_SIZE_RATIO, LABEL_MIN_PROGRESS,
    LineCap, RingLayout, START_ANGLE_DEG, char_width, chord_to_arc, end_angle_deg, font_size,
    layout_label, layout_ring, minimum_progress, should_flip,
};
pub use render::pipeline::{ClockRenderer, RenderStats, RenderThreading, RenderToMp4Opts};
pub use render::raster::{FrameRGBA, SvgRasterizer, save_png};
pub use render::style::{FaceStyle, GlyphShadow, RING_PALETTE, Theme};
pub use render::svg::frame_to_svg;
pub use time::calendar::{
    CalendarFields, ClockInstant, FixedClock, SystemClock, TimeSource, Timestamp, days_in_month,
    local_now,
};
pub use time::decompose::{
    CycleProgress, RING_COUNT, RingKind, RingSpec, decompose, ordinal_suffix, ring_label,
};
