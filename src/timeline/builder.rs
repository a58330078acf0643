use crate::choreography::table::{AnimationTable, Choreography};
use crate::config::SequencerConfig;
use crate::foundation::core::{ViewportClass, ViewportMetrics};
use crate::foundation::error::SequencerResult;
use crate::stage::surface::{Card, Stage};
use crate::timeline::motion::{MotionMetrics, apply};
use crate::timeline::sequence::Timeline;

/// Why a build could not run yet. All of these are expected while layout settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotReady {
    NoCards,
    ViewportUnmeasurable,
    FirstCardUnmounted,
    FirstCardZeroHeight,
}

/// Layout sampled at the start of a build.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Measurement {
    pub viewport: ViewportMetrics,
    pub class: ViewportClass,
    pub card_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BuildReport {
    pub measurement: Measurement,
    pub motions: usize,
    pub skipped_cards: usize,
    pub total_duration: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    Built(BuildReport),
    Deferred(NotReady),
}

/// Populates a [`Timeline`] from a resolved choreography. Rebuilding the same timeline instance
/// clears it first, so repeated builds never accumulate motions.
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    table: AnimationTable,
    narrow_width_px: f64,
}

impl TimelineBuilder {
    pub fn new(choreography: &Choreography, config: &SequencerConfig) -> SequencerResult<Self> {
        config.validate()?;
        Ok(Self {
            table: choreography.resolve(config.base_duration)?,
            narrow_width_px: config.narrow_width_px,
        })
    }

    pub fn table(&self) -> &AnimationTable {
        &self.table
    }

    /// Sample viewport and first-card height. Cards are assumed to share the first card's
    /// height wherever their own is not yet known.
    pub fn measure<S: Stage + ?Sized>(
        &self,
        stage: &S,
        cards: &[Card],
    ) -> Result<Measurement, NotReady> {
        let Some(first) = cards.iter().min_by_key(|c| c.index) else {
            return Err(NotReady::NoCards);
        };
        let viewport = stage.viewport();
        if !viewport.is_measurable() {
            return Err(NotReady::ViewportUnmeasurable);
        }
        let Some(handle) = first.handle else {
            return Err(NotReady::FirstCardUnmounted);
        };
        let card_height = match stage.card_height(handle) {
            Some(h) if h.is_finite() && h > 0.0 => h,
            Some(_) => return Err(NotReady::FirstCardZeroHeight),
            None => return Err(NotReady::FirstCardUnmounted),
        };
        Ok(Measurement {
            viewport,
            class: viewport.classify(self.narrow_width_px),
            card_height,
        })
    }

    #[tracing::instrument(skip_all, fields(cards = cards.len()))]
    pub fn build<S: Stage + ?Sized>(
        &self,
        timeline: &mut Timeline,
        stage: &S,
        cards: &[Card],
    ) -> BuildOutcome {
        let measurement = match self.measure(stage, cards) {
            Ok(m) => m,
            Err(reason) => {
                tracing::debug!(?reason, "layout not ready, deferring build");
                return BuildOutcome::Deferred(reason);
            }
        };

        timeline.clear();
        let mut skipped_cards = 0usize;
        let mut sorted: Vec<Card> = cards.to_vec();
        sorted.sort_by_key(|c| c.index);
        for card in sorted {
            let config = self.table.config_for(card.index);
            let card_height = card
                .handle
                .and_then(|h| stage.card_height(h))
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(measurement.card_height);
            let metrics = MotionMetrics {
                viewport: measurement.viewport,
                class: measurement.class,
                card_height,
            };
            if !apply(timeline, card, &config, &metrics) {
                skipped_cards += 1;
            }
        }
        timeline.extend_to(self.table.total_duration());
        if skipped_cards > 0 {
            tracing::warn!(skipped_cards, "cards without a mounted element were skipped");
        }

        let report = BuildReport {
            measurement,
            motions: timeline.motion_count(),
            skipped_cards,
            total_duration: timeline.duration(),
        };
        tracing::debug!(
            motions = report.motions,
            total_duration = report.total_duration,
            class = ?measurement.class,
            "timeline built"
        );
        BuildOutcome::Built(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
