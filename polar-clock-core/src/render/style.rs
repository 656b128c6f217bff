use crate::{foundation::core::Rgba8, time::decompose::RING_COUNT};

/// Color scheme of the host, used only for the background fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Black background.
    #[default]
    Dark,
    /// White background.
    Light,
}

impl Theme {
    /// Background fill for this scheme.
    pub fn background(self) -> Rgba8 {
        match self {
            Self::Dark => Rgba8::rgb(0, 0, 0),
            Self::Light => Rgba8::rgb(255, 255, 255),
        }
    }
}

/// Ring colors, month ring first: cyan, green, yellow, orange, red, purple.
pub const RING_PALETTE: [Rgba8; RING_COUNT] = [
    Rgba8::rgb(50, 173, 230),
    Rgba8::rgb(52, 199, 89),
    Rgba8::rgb(255, 204, 0),
    Rgba8::rgb(255, 149, 0),
    Rgba8::rgb(255, 59, 48),
    Rgba8::rgb(175, 82, 222),
];

/// Blurred shadow drawn under every glyph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphShadow {
    /// Shadow color; its alpha is the shadow opacity.
    pub color: Rgba8,
    /// Blur radius in pixels.
    pub radius: f64,
}

impl Default for GlyphShadow {
    fn default() -> Self {
        Self {
            color: Rgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 204,
            },
            radius: 2.0,
        }
    }
}

/// Visual styling of a rendered face.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FaceStyle {
    /// Background scheme.
    pub theme: Theme,
    /// Stroke color per ring index.
    pub ring_colors: [Rgba8; RING_COUNT],
    /// Glyph fill.
    pub glyph_color: Rgba8,
    /// Glyph shadow.
    pub shadow: GlyphShadow,
    /// CSS font family list for labels.
    pub font_family: String,
    /// CSS font weight for labels.
    pub font_weight: u16,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            ring_colors: RING_PALETTE,
            glyph_color: Rgba8::rgb(255, 255, 255),
            shadow: GlyphShadow::default(),
            font_family: "SF Pro Rounded, Nunito, Varela Round, sans-serif".to_string(),
            font_weight: 500,
        }
    }
}

impl FaceStyle {
    /// Default styling for `theme`.
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Stroke color of ring `index`; indices past the palette wrap around.
    pub fn ring_color(&self, index: usize) -> Rgba8 {
        self.ring_colors[index % RING_COUNT]
    }
}
