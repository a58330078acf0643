use crate::foundation::core::CardPlacement;
use crate::stage::surface::CardHandle;
use crate::timeline::motion::Motion;

/// A card that sits still for the whole timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Hold {
    pub index: usize,
    pub handle: CardHandle,
    pub placement: CardPlacement,
}

/// Where one card should be drawn at a sampled timeline position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlacedCard {
    pub index: usize,
    pub handle: CardHandle,
    pub placement: CardPlacement,
}

/// Shared schedule of card motions, scrubbed by playback position rather than played at
/// wall-clock rate.
///
/// Motions are kept ordered by start time (then card index), so two timelines built from the
/// same inputs compare equal. The duration covers every registered motion and can be stretched
/// further, so cards missing from a build never shorten the authored run.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    holds: Vec<Hold>,
    motions: Vec<Motion>,
    duration: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every hold and motion. The instance is reused across rebuilds.
    pub fn clear(&mut self) {
        self.holds.clear();
        self.motions.clear();
        self.duration = 0.0;
    }

    pub fn hold(&mut self, index: usize, handle: CardHandle, placement: CardPlacement) {
        self.holds.retain(|h| h.index != index);
        self.holds.push(Hold {
            index,
            handle,
            placement,
        });
    }

    pub fn push(&mut self, motion: Motion) {
        self.duration = self.duration.max(motion.span.end());
        let key = (motion.span.start, motion.index);
        let at = self
            .motions
            .partition_point(|m| (m.span.start, m.index) <= key);
        self.motions.insert(at, motion);
    }

    /// Stretch the timeline to at least `duration`. Never shortens it.
    pub fn extend_to(&mut self, duration: f64) {
        if duration.is_finite() {
            self.duration = self.duration.max(duration);
        }
    }

    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    pub fn holds(&self) -> &[Hold] {
        &self.holds
    }

    pub fn motion_count(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty() && self.motions.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Every card's placement at `position`, clamped into `[0, duration]`, ordered by card index.
    pub fn seek(&self, position: f64) -> Vec<PlacedCard> {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, self.duration())
        };

        let mut out: Vec<PlacedCard> = self
            .holds
            .iter()
            .map(|h| PlacedCard {
                index: h.index,
                handle: h.handle,
                placement: h.placement,
            })
            .chain(self.motions.iter().map(|m| PlacedCard {
                index: m.index,
                handle: m.handle,
                placement: m.placement_at(position),
            }))
            .collect();
        out.sort_by_key(|p| p.index);
        out
    }

    pub fn placement_of(&self, index: usize, position: f64) -> Option<CardPlacement> {
        self.seek(position)
            .into_iter()
            .find(|p| p.index == index)
            .map(|p| p.placement)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequence.rs"]
mod tests;
