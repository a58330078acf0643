use std::time::Duration;

use crate::choreography::table::Choreography;
use crate::config::SequencerConfig;
use crate::foundation::core::CardPlacement;
use crate::foundation::error::SequencerResult;
use crate::runtime::timers::{TimerId, Timers};
use crate::scroll::scrub::ScrubFilter;
use crate::stage::surface::{Card, ListenerId, ListenerKind, Stage};
use crate::timeline::builder::{BuildOutcome, BuildReport, NotReady, TimelineBuilder};
use crate::timeline::sequence::Timeline;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinderState {
    Uninitialized,
    /// Waiting for layout to become measurable.
    Measuring,
    /// Held only while an existing timeline is cleared and re-registered; a caller never sees
    /// it between calls.
    Rebuilding,
    Bound,
    /// Layout never became measurable; cards sit at rest with no animation.
    Static,
    /// Terminal.
    TornDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKind {
    MeasureRetry,
    ResizeDebounce,
}

/// Scroll interval the timeline is bound to, recomputed on every (re)build.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollBinding {
    /// Scroll offset at which the wrapper's top meets the viewport's top.
    pub start: f64,
    /// Pinned scroll distance: card count times the first card's height.
    pub span: f64,
    /// Timeline length mapped onto `span`.
    pub duration: f64,
    pub scrub_secs: f64,
}

impl ScrollBinding {
    pub fn end(&self) -> f64 {
        self.start + self.span
    }

    pub fn progress(&self, scroll_y: f64) -> f64 {
        if self.span <= 0.0 {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / self.span).clamp(0.0, 1.0)
    }

    pub fn timeline_position(&self, scroll_y: f64) -> f64 {
        self.progress(scroll_y) * self.duration
    }

    pub fn pins(&self, scroll_y: f64) -> bool {
        self.start <= scroll_y && scroll_y < self.end()
    }
}

/// Couples a card [`Timeline`] to scroll position and owns the wrapper's pin lifecycle.
///
/// All work happens on the caller's thread. Deferred work (measurement retries, resize
/// debounce) is queued on an internal timer queue and runs from [`ScrollBinder::tick`], which
/// the host calls once per frame with its clock.
///
/// ```text
/// Uninitialized -> Measuring -> Bound -> (resize) Measuring -> Rebuilding -> Bound ...
///                      \-> Static (retry budget spent)
/// any state -> TornDown
/// ```
#[derive(Debug)]
pub struct ScrollBinder {
    config: SequencerConfig,
    builder: TimelineBuilder,
    cards: Vec<Card>,
    timeline: Timeline,
    binding: Option<ScrollBinding>,
    scrub: ScrubFilter,
    timers: Timers<TimerKind>,
    retry_timer: Option<TimerId>,
    debounce_timer: Option<TimerId>,
    retries: u32,
    listeners: Vec<ListenerId>,
    state: BinderState,
    /// Latest host time seen by any entry point. Timers are scheduled from it.
    now: Duration,
    /// Host time of the previous frame. Only `tick` moves it.
    last_tick: Duration,
    scroll_y: f64,
    pinned: bool,
    last_report: Option<BuildReport>,
}

impl ScrollBinder {
    pub fn new(choreography: &Choreography, config: SequencerConfig) -> SequencerResult<Self> {
        let builder = TimelineBuilder::new(choreography, &config)?;
        Ok(Self {
            scrub: ScrubFilter::new(config.scrub_wide_secs),
            config,
            builder,
            cards: Vec::new(),
            timeline: Timeline::new(),
            binding: None,
            timers: Timers::new(),
            retry_timer: None,
            debounce_timer: None,
            retries: 0,
            listeners: Vec::new(),
            state: BinderState::Uninitialized,
            now: Duration::ZERO,
            last_tick: Duration::ZERO,
            scroll_y: 0.0,
            pinned: false,
            last_report: None,
        })
    }

    pub fn state(&self) -> BinderState {
        self.state
    }

    pub fn binding(&self) -> Option<&ScrollBinding> {
        self.binding.as_ref()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn builder(&self) -> &TimelineBuilder {
        &self.builder
    }

    pub fn last_report(&self) -> Option<&BuildReport> {
        self.last_report.as_ref()
    }

    /// Current (filtered) playback position.
    pub fn position(&self) -> f64 {
        self.scrub.position()
    }

    /// Playback position the filter is converging toward.
    pub fn target(&self) -> f64 {
        self.scrub.target()
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// (Re)compute configs, rebuild the timeline and re-establish the scroll binding.
    ///
    /// Safe to call repeatedly. If layout is not measurable yet the build is retried from
    /// [`ScrollBinder::tick`] until it is, or until the retry budget runs out.
    #[tracing::instrument(skip_all, fields(cards = cards.len()))]
    pub fn build<S: Stage + ?Sized>(&mut self, stage: &mut S, cards: &[Card], now: Duration) {
        if self.state == BinderState::TornDown {
            tracing::debug!("build after teardown ignored");
            return;
        }
        if self.state == BinderState::Uninitialized {
            self.last_tick = self.last_tick.max(now);
        }
        self.now = self.now.max(now);
        self.cards = cards.to_vec();
        self.cancel_retry();
        self.retries = 0;
        if self.listeners.is_empty() {
            self.listeners.push(stage.listen(ListenerKind::Scroll));
            self.listeners.push(stage.listen(ListenerKind::Resize));
        }
        self.transition(BinderState::Measuring);
        self.attempt(stage);
    }

    /// Release the binding, unpin the wrapper, drop the timeline and cancel every timer.
    /// Safe to call at any point, any number of times.
    pub fn teardown<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        if self.state == BinderState::TornDown {
            return;
        }
        self.timers.clear();
        self.retry_timer = None;
        self.debounce_timer = None;
        for id in self.listeners.drain(..) {
            stage.unlisten(id);
        }
        if self.pinned {
            stage.set_pinned(false);
            self.pinned = false;
        }
        self.timeline.clear();
        self.binding = None;
        self.cards.clear();
        self.transition(BinderState::TornDown);
    }

    /// Record a scroll position. The filtered playback position catches up on later ticks; the
    /// pin state changes immediately.
    ///
    /// While re-measuring after a resize the previous binding still decides the pin, so the
    /// wrapper returns to the page flow once the user scrolls out of the old span.
    pub fn on_scroll<S: Stage + ?Sized>(&mut self, stage: &mut S, scroll_y: f64) {
        if !scroll_y.is_finite() || self.state == BinderState::TornDown {
            return;
        }
        self.scroll_y = scroll_y;
        let Some(binding) = self.binding else {
            return;
        };
        match self.state {
            BinderState::Bound => {
                self.scrub.set_target(binding.timeline_position(scroll_y));
                self.sync_pin(stage, binding.pins(scroll_y));
            }
            BinderState::Measuring => {
                self.sync_pin(stage, binding.pins(scroll_y));
            }
            _ => {}
        }
    }

    /// Invalidate measurements after a viewport resize. Bursts are coalesced: only the last
    /// resize within the debounce window triggers a rebuild.
    pub fn on_resize(&mut self, now: Duration) {
        if matches!(
            self.state,
            BinderState::TornDown | BinderState::Uninitialized
        ) {
            return;
        }
        self.now = self.now.max(now);
        if let Some(id) = self.debounce_timer.take() {
            self.timers.cancel(id);
        }
        self.debounce_timer = Some(self.timers.schedule(
            self.now,
            self.config.resize_debounce(),
            TimerKind::ResizeDebounce,
        ));
    }

    /// Run due timers, advance the scrub filter to `now`, and write placements. Returns the
    /// playback position applied, if the binder is bound.
    pub fn tick<S: Stage + ?Sized>(&mut self, stage: &mut S, now: Duration) -> Option<f64> {
        if self.state == BinderState::TornDown {
            return None;
        }
        let dt = now.saturating_sub(self.last_tick);
        self.last_tick = self.last_tick.max(now);
        self.now = self.now.max(now);

        while let Some((id, kind)) = self.timers.pop_due(self.now) {
            match kind {
                TimerKind::MeasureRetry => {
                    if self.retry_timer == Some(id) {
                        self.retry_timer = None;
                    }
                    self.attempt(stage);
                }
                TimerKind::ResizeDebounce => {
                    if self.debounce_timer == Some(id) {
                        self.debounce_timer = None;
                    }
                    tracing::debug!("resize settled, re-measuring");
                    self.cancel_retry();
                    self.retries = 0;
                    self.transition(BinderState::Measuring);
                    self.attempt(stage);
                }
            }
        }

        if self.state != BinderState::Bound {
            return None;
        }
        let position = self.scrub.advance(dt);
        self.apply_placements(stage, position);
        Some(position)
    }

    /// Jump straight to a playback position, bypassing the scrub filter.
    pub fn scrub_to<S: Stage + ?Sized>(&mut self, stage: &mut S, position: f64) {
        if self.state != BinderState::Bound {
            return;
        }
        let position = position.clamp(0.0, self.timeline.duration());
        self.scrub.jump_to(position);
        self.apply_placements(stage, position);
    }

    fn attempt<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        let had_binding = self.binding.is_some();
        if had_binding {
            self.transition(BinderState::Rebuilding);
        }
        match self.builder.build(&mut self.timeline, &*stage, &self.cards) {
            BuildOutcome::Built(report) => self.bind(stage, report),
            BuildOutcome::Deferred(reason) => {
                if had_binding {
                    self.transition(BinderState::Measuring);
                }
                self.defer(stage, reason);
            }
        }
    }

    fn bind<S: Stage + ?Sized>(&mut self, stage: &mut S, report: BuildReport) {
        let card_count = self.cards.len() as f64;
        let binding = ScrollBinding {
            start: stage.wrapper_top(),
            span: card_count * report.measurement.card_height,
            duration: self.builder.table().total_duration(),
            scrub_secs: self.config.scrub_secs(report.measurement.class),
        };
        tracing::info!(
            start = binding.start,
            span = binding.span,
            duration = binding.duration,
            scrub_secs = binding.scrub_secs,
            "scroll binding established"
        );

        self.scrub = ScrubFilter::new(binding.scrub_secs);
        self.scrub.jump_to(binding.timeline_position(self.scroll_y));
        self.binding = Some(binding);
        self.retries = 0;
        self.last_report = Some(report);
        self.transition(BinderState::Bound);

        self.sync_pin(stage, binding.pins(self.scroll_y));
        self.apply_placements(stage, self.scrub.position());
    }

    fn defer<S: Stage + ?Sized>(&mut self, stage: &mut S, reason: NotReady) {
        self.retries = self.retries.saturating_add(1);
        if let Some(max) = self.config.max_measure_retries
            && self.retries > max
        {
            tracing::warn!(
                ?reason,
                retries = max,
                "layout never became measurable, falling back to a static stack"
            );
            self.fall_back_to_static(stage);
            return;
        }
        tracing::debug!(?reason, attempt = self.retries, "scheduling measurement retry");
        self.cancel_retry();
        self.retry_timer = Some(self.timers.schedule(
            self.now,
            self.config.measure_retry(),
            TimerKind::MeasureRetry,
        ));
    }

    fn fall_back_to_static<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        self.cancel_retry();
        self.timeline.clear();
        self.binding = None;
        self.sync_pin(stage, false);
        for card in &self.cards {
            let Some(handle) = card.handle else {
                continue;
            };
            let z = self.builder.table().config_for(card.index).z_index;
            stage.place(handle, CardPlacement::identity(z));
        }
        self.transition(BinderState::Static);
    }

    fn apply_placements<S: Stage + ?Sized>(&self, stage: &mut S, position: f64) {
        for placed in self.timeline.seek(position) {
            if !stage.place(placed.handle, placed.placement) {
                tracing::debug!(index = placed.index, "card unmounted, placement skipped");
            }
        }
    }

    fn sync_pin<S: Stage + ?Sized>(&mut self, stage: &mut S, pinned: bool) {
        if self.pinned != pinned {
            self.pinned = pinned;
            stage.set_pinned(pinned);
        }
    }

    fn cancel_retry(&mut self) {
        if let Some(id) = self.retry_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn transition(&mut self, next: BinderState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "binder state");
            self.state = next;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/binder.rs"]
mod tests;
