//! Tunables for the sequencer and its scroll binding.

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::core::ViewportClass;
use crate::foundation::error::{SequencerError, SequencerResult};

/// Sequencer tunables. Every field has a default, so a config file only needs the overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencerConfig {
    /// Duration of one card motion on the shared timeline.
    pub base_duration: f64,
    /// Viewports strictly narrower than this are classified narrow.
    pub narrow_width_px: f64,
    /// Scrub catch-up time on wide viewports, in seconds. `0` applies scroll instantly.
    pub scrub_wide_secs: f64,
    /// Scrub catch-up time on narrow viewports, in seconds.
    pub scrub_narrow_secs: f64,
    /// Delay between attempts to measure a card whose height is still zero.
    pub measure_retry_ms: u64,
    /// Measurement attempts before falling back to a static layout. `None` retries forever.
    pub max_measure_retries: Option<u32>,
    /// Resize events closer together than this are coalesced into one rebuild.
    pub resize_debounce_ms: u64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            base_duration: 0.5,
            narrow_width_px: 768.0,
            scrub_wide_secs: 1.0,
            scrub_narrow_secs: 1.5,
            measure_retry_ms: 100,
            max_measure_retries: Some(40),
            resize_debounce_ms: 250,
        }
    }
}

impl SequencerConfig {
    pub fn from_json_str(s: &str) -> SequencerResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| SequencerError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> SequencerResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read sequencer config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> SequencerResult<()> {
        if !self.base_duration.is_finite() || self.base_duration <= 0.0 {
            return Err(SequencerError::validation(
                "base_duration must be finite and > 0",
            ));
        }
        if !self.narrow_width_px.is_finite() || self.narrow_width_px < 0.0 {
            return Err(SequencerError::validation(
                "narrow_width_px must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("scrub_wide_secs", self.scrub_wide_secs),
            ("scrub_narrow_secs", self.scrub_narrow_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SequencerError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.measure_retry_ms == 0 {
            return Err(SequencerError::validation("measure_retry_ms must be > 0"));
        }
        Ok(())
    }

    pub fn scrub_secs(&self, class: ViewportClass) -> f64 {
        match class {
            ViewportClass::Narrow => self.scrub_narrow_secs,
            ViewportClass::Wide => self.scrub_wide_secs,
        }
    }

    #[inline]
    pub fn measure_retry(&self) -> Duration {
        Duration::from_millis(self.measure_retry_ms)
    }

    #[inline]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
