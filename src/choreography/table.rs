use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::choreography::archetype::{AnimationConfig, Archetype, z_index_for};
use crate::foundation::core::TimeSpan;
use crate::foundation::error::{SequencerError, SequencerResult};

/// Declarative motion record for one card, stored alongside the card's content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardMotion {
    pub archetype: Archetype,
    /// Archetype used instead on narrow viewports.
    #[serde(default)]
    pub mobile_override: Option<Archetype>,
    /// Index of the card whose motion this one follows. `None` follows the preceding card in
    /// array order; pointing at the base card (index 0) starts the timeline.
    #[serde(default)]
    pub after: Option<usize>,
    #[serde(default)]
    pub ease: Ease,
}

impl CardMotion {
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            mobile_override: None,
            after: None,
            ease: Ease::Linear,
        }
    }

    pub fn with_mobile_override(mut self, archetype: Archetype) -> Self {
        self.mobile_override = Some(archetype);
        self
    }

    pub fn after(mut self, index: usize) -> Self {
        self.after = Some(index);
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// An authored card sequence whose motions chain into one gapless run.
///
/// Construction validates the chaining, so every `Choreography` in hand resolves to a contiguous
/// partition of its timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Choreography {
    cards: Vec<CardMotion>,
    #[serde(skip)]
    order: Vec<usize>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ChoreographyDef {
    cards: Vec<CardMotion>,
}

impl<'de> serde::Deserialize<'de> for Choreography {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let def = <ChoreographyDef as serde::Deserialize>::deserialize(d)?;
        Self::new(def.cards).map_err(serde::de::Error::custom)
    }
}

impl Choreography {
    pub fn new(cards: Vec<CardMotion>) -> SequencerResult<Self> {
        let order = chain_order(&cards)?;
        Ok(Self { cards, order })
    }

    /// Built-in portfolio preset: a base card followed by a repeating
    /// below / side / stacked-below pattern, chained in array order. Side entries fall back to
    /// entering from below on narrow viewports.
    pub fn portfolio(card_count: usize) -> Self {
        let cards: Vec<CardMotion> = (0..card_count)
            .map(|i| match i {
                0 => CardMotion::new(Archetype::Base),
                i if i % 3 == 1 => CardMotion::new(Archetype::SlideFromBelow),
                i if i % 3 == 2 => CardMotion::new(Archetype::SlideFromSide)
                    .with_mobile_override(Archetype::SlideFromBelow),
                _ => CardMotion::new(Archetype::StackedSlideFromBelow),
            })
            .collect();
        let order = (1..card_count).collect();
        Self { cards, order }
    }

    pub fn from_json_str(s: &str) -> SequencerResult<Self> {
        serde_json::from_str(s).map_err(|e| SequencerError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> SequencerResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read choreography '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardMotion] {
        &self.cards
    }

    /// Animated card indices in the order their motions play.
    pub fn chain_order(&self) -> &[usize] {
        &self.order
    }

    #[tracing::instrument(skip(self), fields(cards = self.cards.len()))]
    pub fn resolve(&self, base_duration: f64) -> SequencerResult<AnimationTable> {
        if !base_duration.is_finite() || base_duration <= 0.0 {
            return Err(SequencerError::validation(
                "base_duration must be finite and > 0",
            ));
        }

        let mut configs: Vec<AnimationConfig> =
            (0..self.cards.len()).map(AnimationConfig::base).collect();
        let mut end = 0.0;
        for &index in &self.order {
            let cfg = animation_config(&self.cards[index], index, end, base_duration)?;
            end = cfg.span.end();
            configs[index] = cfg;
        }
        tracing::debug!(total_duration = end, "resolved animation table");

        Ok(AnimationTable {
            configs,
            order: self.order.clone(),
            total_duration: end,
        })
    }
}

/// Configuration for one card given where the preceding motion in the chain ends.
pub fn animation_config(
    motion: &CardMotion,
    index: usize,
    previous_end: f64,
    base_duration: f64,
) -> SequencerResult<AnimationConfig> {
    if index == 0 || !motion.archetype.is_animated() {
        return Ok(AnimationConfig::base(index));
    }
    let duration = motion.archetype.duration_for(index, base_duration);
    Ok(AnimationConfig {
        index,
        archetype: motion.archetype,
        z_index: z_index_for(index),
        span: TimeSpan::new(previous_end, duration)?,
        mobile_override: motion.mobile_override,
        ease: motion.ease,
    })
}

fn chain_order(cards: &[CardMotion]) -> SequencerResult<Vec<usize>> {
    let n = cards.len();
    if let Some(first) = cards.first()
        && first.archetype != Archetype::Base
    {
        return Err(SequencerError::choreography(
            "card 0 must use the base archetype",
        ));
    }

    // successor[j] = card that starts when card j's motion ends
    let mut successor: Vec<Option<usize>> = vec![None; n];
    let mut head: Option<usize> = None;
    for (i, card) in cards.iter().enumerate().skip(1) {
        if !card.archetype.is_animated() {
            return Err(SequencerError::choreography(format!(
                "card {i} uses the base archetype; only card 0 may"
            )));
        }
        let anchor = card.after.unwrap_or(i - 1);
        if anchor >= n {
            return Err(SequencerError::choreography(format!(
                "card {i} follows card {anchor}, which does not exist"
            )));
        }
        if anchor == i {
            return Err(SequencerError::choreography(format!(
                "card {i} follows itself"
            )));
        }
        if anchor == 0 {
            if let Some(prev) = head.replace(i) {
                return Err(SequencerError::choreography(format!(
                    "cards {prev} and {i} both start the timeline"
                )));
            }
            continue;
        }
        if let Some(prev) = successor[anchor].replace(i) {
            return Err(SequencerError::choreography(format!(
                "cards {prev} and {i} both follow card {anchor}"
            )));
        }
    }

    let mut order = Vec::with_capacity(n.saturating_sub(1));
    let mut cursor = head;
    while let Some(i) = cursor {
        if order.len() >= n {
            break;
        }
        order.push(i);
        cursor = successor[i];
    }
    if order.len() != n.saturating_sub(1) {
        return Err(SequencerError::choreography(
            "card motions do not form a single chain from the start of the timeline",
        ));
    }
    Ok(order)
}

/// Resolved configuration for every card, plus the chain that orders their motions.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationTable {
    configs: Vec<AnimationConfig>,
    order: Vec<usize>,
    total_duration: f64,
}

impl AnimationTable {
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Configuration for `index`. Unknown indices degrade to the base configuration.
    pub fn config_for(&self, index: usize) -> AnimationConfig {
        self.configs
            .get(index)
            .copied()
            .unwrap_or_else(|| AnimationConfig::base(index))
    }

    pub fn configs(&self) -> &[AnimationConfig] {
        &self.configs
    }

    pub fn chain_order(&self) -> &[usize] {
        &self.order
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/table.rs"]
mod tests;
