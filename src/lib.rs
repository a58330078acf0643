//! scrollstack drives a stacked-card reveal from scroll position.
//!
//! A page holds `N` cards. Card 0 rests at the bottom of the stack; every other card slides into
//! place along one shared timeline, and that timeline's playback position is bound to scroll
//! progress through a pinned region of the page.
//!
//! # Pipeline overview
//!
//! 1. **Choreograph**: [`Choreography`] (declarative per-card records) -> [`AnimationTable`]
//!    (start time, duration and z-order per card, chained into one gapless run)
//! 2. **Build**: [`TimelineBuilder`] measures layout through a [`Stage`] and registers one
//!    [`Motion`] per animated card on a [`Timeline`]
//! 3. **Bind**: [`ScrollBinder`] maps scroll offset to playback position through a
//!    [`ScrubFilter`], pins the wrapper while the span is active, and rebuilds on resize
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: deferred work lives on a virtual-clock [`Timers`] queue driven by the
//!   host's frame tick; nothing is registered as a side effect of loading the crate.
//! - **Degrade, never fail** at runtime: unmeasurable layout, unmounted cards and unknown
//!   indices fall back to a static stack. Errors are reserved for invalid authoring input.
#![forbid(unsafe_code)]

mod animation;
mod choreography;
mod config;
mod foundation;
mod runtime;
mod scroll;
mod stage;
mod timeline;

pub use animation::ease::Ease;
pub use choreography::archetype::{AnimationConfig, Archetype, z_index_for};
pub use choreography::table::{AnimationTable, CardMotion, Choreography, animation_config};
pub use config::SequencerConfig;
pub use foundation::core::{
    Affine, Axis, CardPlacement, TIME_EPSILON, TimeSpan, Vec2, ViewportClass, ViewportMetrics,
};
pub use foundation::error::{SequencerError, SequencerResult};
pub use runtime::timers::{TimerId, Timers};
pub use scroll::binder::{BinderState, ScrollBinder, ScrollBinding};
pub use scroll::scrub::ScrubFilter;
pub use stage::memory::MemoryStage;
pub use stage::surface::{Card, CardHandle, ListenerId, ListenerKind, Stage};
pub use timeline::builder::{BuildOutcome, BuildReport, Measurement, NotReady, TimelineBuilder};
pub use timeline::motion::{
    Motion, MotionMetrics, apply, apply_base, apply_slide_from_below, apply_slide_from_side,
    apply_stacked_slide_from_below,
};
pub use timeline::sequence::{Hold, PlacedCard, Timeline};
