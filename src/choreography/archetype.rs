use crate::animation::ease::Ease;
use crate::foundation::core::{TimeSpan, ViewportClass};

/// Motion patterns a card can follow into its resting place in the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Rests at the bottom of the stack from the first frame. Never animated.
    Base,
    /// Enters horizontally from one full viewport width away.
    SlideFromSide,
    /// Enters vertically from one card height away.
    SlideFromBelow,
    /// Enters vertically from `index` card heights away, travelling past the earlier cards.
    StackedSlideFromBelow,
}

impl Archetype {
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::Base)
    }

    /// Duration of this archetype's motion for the card at `index`.
    ///
    /// The stacked archetype scales with the card's index; every other archetype takes exactly
    /// one `base_duration`.
    pub fn duration_for(self, index: usize, base_duration: f64) -> f64 {
        match self {
            Self::Base => 0.0,
            Self::SlideFromSide | Self::SlideFromBelow => base_duration,
            Self::StackedSlideFromBelow => index as f64 * base_duration,
        }
    }
}

/// Resolved animation behaviour for one card. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationConfig {
    pub index: usize,
    pub archetype: Archetype,
    pub z_index: i32,
    pub span: TimeSpan,
    pub mobile_override: Option<Archetype>,
    pub ease: Ease,
}

impl AnimationConfig {
    /// The bottom-of-stack configuration, also used for any index the table does not know.
    pub fn base(index: usize) -> Self {
        Self {
            index,
            archetype: Archetype::Base,
            z_index: 0,
            span: TimeSpan::zero(),
            mobile_override: None,
            ease: Ease::Linear,
        }
    }

    pub fn start_time(&self) -> f64 {
        self.span.start
    }

    pub fn duration(&self) -> f64 {
        self.span.duration
    }

    /// Archetype to apply for a viewport class. Narrow viewports swap in the mobile override
    /// when one is configured; timing is unaffected.
    pub fn effective_archetype(&self, class: ViewportClass) -> Archetype {
        match (class, self.mobile_override) {
            (ViewportClass::Narrow, Some(o)) if self.archetype.is_animated() && o.is_animated() => {
                o
            }
            _ => self.archetype,
        }
    }
}

/// z-order for the card at `index`: base lowest, then strictly increasing with index.
pub fn z_index_for(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}
