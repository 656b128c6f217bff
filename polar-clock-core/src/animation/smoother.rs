use crate::{
    animation::ease::Ease,
    foundation::error::{ClockError, ClockResult},
    foundation::math::clamp_unit,
    time::decompose::RING_COUNT,
};

/// Tuning for wrap detection and the snap-back animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Length of the snap-back sweep in seconds.
    pub duration_secs: f64,
    /// A wrap needs the new progress below this value...
    pub wrap_low: f64,
    /// ...and the previous progress above this one.
    pub wrap_high: f64,
    /// Curve applied to the normalized snap time.
    pub ease: Ease,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            duration_secs: 0.5,
            wrap_low: 0.1,
            wrap_high: 0.9,
            ease: Ease::OutQuad,
        }
    }
}

impl SnapConfig {
    /// Reject durations and thresholds the state machine cannot honor.
    pub fn validate(&self) -> ClockResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(ClockError::validation(
                "snap duration_secs must be finite and > 0",
            ));
        }
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.wrap_low) || !in_unit(self.wrap_high) {
            return Err(ClockError::validation(
                "snap wrap thresholds must lie in [0, 1]",
            ));
        }
        if self.wrap_low >= self.wrap_high {
            return Err(ClockError::validation(
                "snap wrap_low must be < wrap_high",
            ));
        }
        Ok(())
    }

    /// Normalized snap time in `[0, 1]` after `elapsed_secs`.
    pub fn phase(&self, elapsed_secs: f64) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        clamp_unit(elapsed_secs / self.duration_secs)
    }

    fn is_wrap(&self, previous: f64, real: f64) -> bool {
        real < self.wrap_low && previous > self.wrap_high
    }
}

/// Per-ring animation state, persisted across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RingAnimState {
    /// Real progress observed on the previous frame (`0` before the first frame).
    pub previous_progress: f64,
    /// Whether the ring is sweeping back after a wrap.
    pub is_snapping: bool,
    /// Time the current snap-back started.
    pub snap_start_time: Option<f64>,
    /// Real progress at the moment the wrap was detected.
    pub snap_start_progress: f64,
}

impl RingAnimState {
    /// Advance one frame and return the progress to display.
    ///
    /// While snapping, the display value eases from `1.0` down to the (still moving) real
    /// progress and lands on it exactly once the duration has elapsed.
    pub fn step(&mut self, real: f64, now: f64, cfg: &SnapConfig) -> f64 {
        let mut display = real;

        if !self.is_snapping && cfg.is_wrap(self.previous_progress, real) {
            self.is_snapping = true;
            self.snap_start_time = Some(now);
            self.snap_start_progress = real;
        }

        if self.is_snapping
            && let Some(start) = self.snap_start_time
        {
            let t = cfg.phase(now - start);
            if t >= 1.0 {
                self.is_snapping = false;
                self.snap_start_time = None;
            } else {
                let e = cfg.ease.apply(t);
                display = 1.0 - e * (1.0 - real);
            }
        }

        self.previous_progress = real;
        clamp_unit(display)
    }
}

/// Owns the animation state of every ring on a face.
///
/// Each ring must be stepped exactly once per frame, in frame order.
#[derive(Clone, Debug, Default)]
pub struct WrapSmoother {
    states: [RingAnimState; RING_COUNT],
    config: SnapConfig,
}

impl WrapSmoother {
    /// Fresh smoother: every ring Following with a previous progress of `0`.
    pub fn new(config: SnapConfig) -> Self {
        Self {
            states: [RingAnimState::default(); RING_COUNT],
            config,
        }
    }

    /// Tuning in use.
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// State of `ring`, if the index is valid.
    pub fn state(&self, ring: usize) -> Option<&RingAnimState> {
        self.states.get(ring)
    }

    /// Display progress for `ring` this frame. Unknown ring indices pass `real` through.
    pub fn display_progress(&mut self, ring: usize, real: f64, now: f64) -> f64 {
        let Some(state) = self.states.get_mut(ring) else {
            return real;
        };

        let was_snapping = state.is_snapping;
        let display = state.step(real, now, &self.config);
        match (was_snapping, state.is_snapping) {
            (false, true) => tracing::debug!(ring, real, "wrap detected, snapping back"),
            (true, false) => tracing::debug!(ring, real, "snap-back finished"),
            _ => {}
        }
        display
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/smoother.rs"]
mod tests;
