//! Renderer tuning knobs. Defaults are the game's shipped tuning;
//! tests shrink the time windows instead of sleeping for real.

use crate::error::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// How long a sampled location list stays fixed for one region.
    #[serde(default = "default_sample_window_ms")]
    pub sample_window_ms: u64,

    /// How long a building keeps showing the same zot. Deliberately NOT a
    /// multiple of the sample window, so the two refreshes rarely align and
    /// markers never all swap in visible lock-step.
    #[serde(default = "default_choice_window_ms")]
    pub choice_window_ms: u64,

    /// Max locations drawn per region per window (K).
    #[serde(default = "default_sample_cap")]
    pub sample_cap: usize,

    /// Max resident region keys in the sample cache. Bounds rapid-panning
    /// sessions that mint a fresh key per viewport position.
    #[serde(default = "default_region_capacity")]
    pub region_capacity: usize,

    /// Max resident zot choices (C). Addressed by every location ever
    /// sampled in a session, not just the current viewport.
    #[serde(default = "default_choice_capacity")]
    pub choice_capacity: usize,

    /// Animation clock period.
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,

    /// Degrees added to the phase per clock tick.
    #[serde(default = "default_phase_step_degrees")]
    pub phase_step_degrees: f64,

    /// Vertical bob amplitude as a fraction of block size.
    #[serde(default = "default_bob_amplitude")]
    pub bob_amplitude: f64,
}

fn default_sample_window_ms() -> u64 {
    10_000
}
fn default_choice_window_ms() -> u64 {
    15_000
}
fn default_sample_cap() -> usize {
    5
}
fn default_region_capacity() -> usize {
    64
}
fn default_choice_capacity() -> usize {
    10_000
}
fn default_tick_period_ms() -> u64 {
    50
}
fn default_phase_step_degrees() -> f64 {
    5.0
}
fn default_bob_amplitude() -> f64 {
    0.1
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_window_ms: default_sample_window_ms(),
            choice_window_ms: default_choice_window_ms(),
            sample_cap: default_sample_cap(),
            region_capacity: default_region_capacity(),
            choice_capacity: default_choice_capacity(),
            tick_period_ms: default_tick_period_ms(),
            phase_step_degrees: default_phase_step_degrees(),
            bob_amplitude: default_bob_amplitude(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> RenderResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.sample_window_ms == 0 || self.choice_window_ms == 0 {
            return Err(RenderError::Config(
                "cache windows must be non-zero".to_string(),
            ));
        }
        if self.sample_cap == 0 {
            return Err(RenderError::Config("sample_cap must be > 0".to_string()));
        }
        if self.region_capacity == 0 || self.choice_capacity == 0 {
            return Err(RenderError::Config(
                "cache capacities must be > 0".to_string(),
            ));
        }
        if self.tick_period_ms == 0 {
            return Err(RenderError::Config(
                "tick_period_ms must be > 0".to_string(),
            ));
        }
        if !(self.phase_step_degrees > 0.0 && self.phase_step_degrees < 360.0) {
            return Err(RenderError::Config(
                "phase_step_degrees must be in (0, 360)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sample_window(&self) -> Duration {
        Duration::from_millis(self.sample_window_ms)
    }

    pub fn choice_window(&self) -> Duration {
        Duration::from_millis(self.choice_window_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
