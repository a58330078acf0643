//! One applier per archetype. Each turns a card's [`AnimationConfig`] into entries on the shared
//! [`Timeline`]; none of them measure layout or touch the stage.

use crate::animation::ease::Ease;
use crate::choreography::archetype::{AnimationConfig, Archetype};
use crate::foundation::core::{
    Axis, CardPlacement, TimeSpan, Vec2, ViewportClass, ViewportMetrics,
};
use crate::stage::surface::{Card, CardHandle};
use crate::timeline::sequence::Timeline;

/// A translation along one axis from `from` to rest, played over `span`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Motion {
    pub index: usize,
    pub handle: CardHandle,
    pub z_index: i32,
    pub axis: Axis,
    pub from: f64,
    pub span: TimeSpan,
    pub ease: Ease,
}

impl Motion {
    pub fn offset_at(&self, position: f64) -> Vec2 {
        let t = self.ease.apply(self.span.progress_at(position));
        self.axis.offset(self.from * (1.0 - t))
    }

    pub fn placement_at(&self, position: f64) -> CardPlacement {
        CardPlacement {
            translate: self.offset_at(position),
            z_index: self.z_index,
        }
    }
}

/// Layout inputs for one (re)build, sampled once by the builder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionMetrics {
    pub viewport: ViewportMetrics,
    pub class: ViewportClass,
    pub card_height: f64,
}

/// Register `config` for `card` on `timeline`, swapping in the mobile override on narrow
/// viewports. Returns `false` when the card has no mounted element.
pub fn apply(
    timeline: &mut Timeline,
    card: Card,
    config: &AnimationConfig,
    metrics: &MotionMetrics,
) -> bool {
    let Some(handle) = card.handle else {
        return false;
    };
    match config.effective_archetype(metrics.class) {
        Archetype::Base => apply_base(timeline, card.index, handle, config),
        Archetype::SlideFromSide => {
            apply_slide_from_side(timeline, card.index, handle, config, metrics.viewport.width)
        }
        Archetype::SlideFromBelow => {
            apply_slide_from_below(timeline, card.index, handle, config, metrics.card_height)
        }
        Archetype::StackedSlideFromBelow => apply_stacked_slide_from_below(
            timeline,
            card.index,
            handle,
            config,
            metrics.card_height,
        ),
    }
    true
}

pub fn apply_base(
    timeline: &mut Timeline,
    index: usize,
    handle: CardHandle,
    config: &AnimationConfig,
) {
    timeline.hold(index, handle, CardPlacement::identity(config.z_index));
}

pub fn apply_slide_from_side(
    timeline: &mut Timeline,
    index: usize,
    handle: CardHandle,
    config: &AnimationConfig,
    viewport_width: f64,
) {
    push_slide(timeline, index, handle, config, Axis::Horizontal, viewport_width);
}

pub fn apply_slide_from_below(
    timeline: &mut Timeline,
    index: usize,
    handle: CardHandle,
    config: &AnimationConfig,
    card_height: f64,
) {
    push_slide(timeline, index, handle, config, Axis::Vertical, card_height);
}

pub fn apply_stacked_slide_from_below(
    timeline: &mut Timeline,
    index: usize,
    handle: CardHandle,
    config: &AnimationConfig,
    card_height: f64,
) {
    let distance = index as f64 * card_height;
    push_slide(timeline, index, handle, config, Axis::Vertical, distance);
}

fn push_slide(
    timeline: &mut Timeline,
    index: usize,
    handle: CardHandle,
    config: &AnimationConfig,
    axis: Axis,
    from: f64,
) {
    timeline.push(Motion {
        index,
        handle,
        z_index: config.z_index,
        axis,
        from,
        span: config.span,
        ease: config.ease,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/motion.rs"]
mod tests;
