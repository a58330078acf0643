use crate::foundation::error::{SequencerError, SequencerResult};

pub use kurbo::{Affine, Vec2};

/// Tolerance used when comparing timeline positions.
pub const TIME_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub height: f64,
}

impl ViewportMetrics {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn classify(self, narrow_width_px: f64) -> ViewportClass {
        if self.width < narrow_width_px {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Narrow,
    Wide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn offset(self, distance: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(distance, 0.0),
            Self::Vertical => Vec2::new(0.0, distance),
        }
    }
}

/// What the sequencer writes onto a card: a translation and a stacking order. Content is never
/// touched.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardPlacement {
    pub translate: Vec2,
    pub z_index: i32,
}

impl CardPlacement {
    pub fn identity(z_index: i32) -> Self {
        Self {
            translate: Vec2::ZERO,
            z_index,
        }
    }

    pub fn is_settled(self) -> bool {
        self.translate.x.abs() <= TIME_EPSILON && self.translate.y.abs() <= TIME_EPSILON
    }

    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate)
    }
}

/// Half-open interval `[start, start + duration)` on the shared timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeSpan {
    pub start: f64,
    pub duration: f64,
}

impl TimeSpan {
    pub fn new(start: f64, duration: f64) -> SequencerResult<Self> {
        if !start.is_finite() || start < 0.0 {
            return Err(SequencerError::validation(
                "TimeSpan start must be finite and >= 0",
            ));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(SequencerError::validation(
                "TimeSpan duration must be finite and >= 0",
            ));
        }
        Ok(Self { start, duration })
    }

    pub const fn zero() -> Self {
        Self {
            start: 0.0,
            duration: 0.0,
        }
    }

    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    pub fn is_empty(self) -> bool {
        self.duration <= 0.0
    }

    /// Normalized progress of `position` through this span, clamped to `[0, 1]`.
    pub fn progress_at(self, position: f64) -> f64 {
        if position <= self.start {
            return 0.0;
        }
        if self.is_empty() || position >= self.end() {
            return 1.0;
        }
        (position - self.start) / self.duration
    }
}
