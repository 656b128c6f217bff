use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    animation::smoother::SnapConfig,
    compose::face::{ClockFace, FaceProportions},
    foundation::core::{Canvas, Fps},
    foundation::error::{ClockError, ClockResult},
    render::style::{FaceStyle, Theme},
};

/// Everything a host can tune, loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockSettings {
    /// Output surface.
    pub canvas: Canvas,
    /// Frame rate for sequences and video.
    pub fps: Fps,
    /// Background scheme.
    pub theme: Theme,
    /// Ring measurements.
    pub proportions: FaceProportions,
    /// Wrap detection and snap-back tuning.
    pub snap: SnapConfig,
    /// Label font family override.
    pub font_family: Option<String>,
    /// Extra directory of font files for labels.
    pub font_dir: Option<PathBuf>,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            theme: Theme::Dark,
            proportions: FaceProportions::default(),
            snap: SnapConfig::default(),
            font_family: None,
            font_dir: None,
        }
    }
}

impl ClockSettings {
    /// Read and validate a settings file.
    pub fn from_path(path: &Path) -> ClockResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let settings = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Parse and validate settings JSON.
    pub fn from_json(text: &str) -> ClockResult<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every section.
    pub fn validate(&self) -> ClockResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        self.proportions.validate()?;
        self.snap.validate()?;
        if let Some(family) = &self.font_family
            && family.trim().is_empty()
        {
            return Err(ClockError::validation("font_family must not be blank"));
        }
        Ok(())
    }

    /// A fresh clock face with these proportions and snap tuning.
    pub fn face(&self) -> ClockFace {
        ClockFace::new(self.proportions, self.snap)
    }

    /// Styling for these settings.
    pub fn style(&self) -> FaceStyle {
        let mut style = FaceStyle::for_theme(self.theme);
        if let Some(family) = &self.font_family {
            style.font_family = family.clone();
        }
        style
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
