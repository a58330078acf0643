use std::time::Duration;

const SNAP_EPSILON: f64 = 1e-6;

/// Low-pass filter between the scroll-derived target and the timeline's playback position.
///
/// Each step closes `1 - exp(-dt / catch_up)` of the remaining gap, so the position approaches
/// the latest target monotonically and never overshoots it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubFilter {
    position: f64,
    target: f64,
    catch_up_secs: f64,
}

impl ScrubFilter {
    pub fn new(catch_up_secs: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            catch_up_secs: catch_up_secs.max(0.0),
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn catch_up_secs(&self) -> f64 {
        self.catch_up_secs
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Move both target and position, skipping the filter.
    pub fn jump_to(&mut self, position: f64) {
        if position.is_finite() {
            self.target = position;
            self.position = position;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.position == self.target
    }

    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.catch_up_secs <= 0.0 {
            self.position = self.target;
            return self.position;
        }
        let alpha = 1.0 - (-dt.as_secs_f64() / self.catch_up_secs).exp();
        self.position += (self.target - self.position) * alpha;
        if (self.target - self.position).abs() < SNAP_EPSILON {
            self.position = self.target;
        }
        self.position
    }
}
