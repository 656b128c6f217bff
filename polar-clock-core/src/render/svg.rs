//! SVG serialization of a [`DrawableFrame`].
//!
//! The document is self-contained: a background rect, then per ring (innermost first) the
//! stroked arc followed by its glyphs, each rotated about its own center.

use std::fmt::Write as _;

use crate::{
    compose::face::{DrawableFrame, RingDrawable},
    foundation::error::{ClockError, ClockResult},
    render::style::FaceStyle,
};

/// Curve flattening tolerance for arc paths, in pixels.
const ARC_TOLERANCE: f64 = 0.05;
const SHADOW_FILTER_ID: &str = "glyph-shadow";

/// Render `frame` as an SVG document.
pub fn frame_to_svg(frame: &DrawableFrame, style: &FaceStyle) -> ClockResult<String> {
    let mut out = String::with_capacity(8 * 1024);
    write_document(&mut out, frame, style)
        .map_err(|e| ClockError::layout(format!("format svg document: {e}")))?;
    Ok(out)
}

fn write_document(
    out: &mut String,
    frame: &DrawableFrame,
    style: &FaceStyle,
) -> std::fmt::Result {
    let w = frame.canvas.width;
    let h = frame.canvas.height;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;

    let shadow = style.shadow;
    writeln!(
        out,
        r#"<defs><filter id="{SHADOW_FILTER_ID}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="0" stdDeviation="{:.3}" flood-color="{}" flood-opacity="{:.3}"/></filter></defs>"#,
        shadow.radius,
        shadow.color.to_hex(),
        shadow.color.opacity(),
    )?;

    let bg = style.theme.background();
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        bg.to_hex()
    )?;

    for ring in &frame.rings {
        write_ring(out, ring, style)?;
    }

    writeln!(out, "</svg>")
}

fn write_ring(out: &mut String, ring: &RingDrawable, style: &FaceStyle) -> std::fmt::Result {
    let arc = &ring.layout.arc;
    let color = style.ring_color(ring.color_index);
    writeln!(
        out,
        r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.3}" stroke-linecap="{}"/>"#,
        arc.to_path(ARC_TOLERANCE).to_svg(),
        color.to_hex(),
        color.opacity(),
        arc.stroke_width,
        arc.line_cap.as_svg(),
    )?;

    if ring.layout.glyphs.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        r#"<g font-family="{}" font-size="{:.3}" font-weight="{}" fill="{}" fill-opacity="{:.3}" text-anchor="middle" dominant-baseline="central" filter="url(#{SHADOW_FILTER_ID})">"#,
        escape_xml(&style.font_family),
        ring.layout.font_size,
        style.font_weight,
        style.glyph_color.to_hex(),
        style.glyph_color.opacity(),
    )?;
    for g in &ring.layout.glyphs {
        if g.character.is_whitespace() {
            continue;
        }
        let mut buf = [0u8; 4];
        writeln!(
            out,
            r#"<text x="{x:.3}" y="{y:.3}" transform="rotate({r:.3} {x:.3} {y:.3})">{c}</text>"#,
            x = g.x,
            y = g.y,
            r = g.rotation_deg,
            c = escape_xml(g.character.encode_utf8(&mut buf)),
        )?;
    }
    writeln!(out, "</g>")
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
