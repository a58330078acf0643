use super::*;
use crate::choreography::archetype::Archetype;
use crate::choreography::table::CardMotion;
use crate::foundation::core::Vec2;
use crate::stage::memory::MemoryStage;

fn scenario() -> Choreography {
    Choreography::new(vec![
        CardMotion::new(Archetype::Base),
        CardMotion::new(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::SlideFromSide).with_mobile_override(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::SlideFromBelow),
    ])
    .unwrap()
}

fn builder() -> TimelineBuilder {
    TimelineBuilder::new(&scenario(), &SequencerConfig::default()).unwrap()
}

fn wide_stage() -> MemoryStage {
    MemoryStage::with_cards(ViewportMetrics::new(1200.0, 800.0), 4, 600.0)
}

fn built(outcome: BuildOutcome) -> BuildReport {
    match outcome {
        BuildOutcome::Built(r) => r,
        BuildOutcome::Deferred(reason) => panic!("deferred: {reason:?}"),
    }
}

#[test]
fn builds_one_motion_per_animated_card() {
    let stage = wide_stage();
    let mut tl = Timeline::new();
    let report = built(builder().build(&mut tl, &stage, &stage.cards()));
    assert_eq!(report.motions, 3);
    assert_eq!(report.total_duration, 1.5);
    assert_eq!(report.measurement.class, ViewportClass::Wide);
    assert_eq!(tl.holds().len(), 1);
}

#[test]
fn rebuild_does_not_accumulate_motions() {
    let stage = wide_stage();
    let b = builder();
    let mut tl = Timeline::new();
    b.build(&mut tl, &stage, &stage.cards());
    let once = tl.clone();
    b.build(&mut tl, &stage, &stage.cards());
    assert_eq!(tl.motion_count(), 3);
    assert_eq!(tl, once);
}

#[test]
fn zero_height_defers_without_touching_the_timeline() {
    let mut stage = wide_stage();
    let b = builder();
    let mut tl = Timeline::new();
    b.build(&mut tl, &stage, &stage.cards());
    let before = tl.clone();

    stage.set_card_heights(0.0);
    let outcome = b.build(&mut tl, &stage, &stage.cards());
    assert_eq!(outcome, BuildOutcome::Deferred(NotReady::FirstCardZeroHeight));
    assert_eq!(tl, before);
}

#[test]
fn other_not_ready_reasons() {
    let b = builder();
    let mut tl = Timeline::new();

    let empty = MemoryStage::new(ViewportMetrics::new(1200.0, 800.0));
    assert_eq!(
        b.build(&mut tl, &empty, &[]),
        BuildOutcome::Deferred(NotReady::NoCards)
    );

    let mut stage = wide_stage();
    stage.set_viewport(ViewportMetrics::new(0.0, 0.0));
    assert_eq!(
        b.build(&mut tl, &stage, &stage.cards()),
        BuildOutcome::Deferred(NotReady::ViewportUnmeasurable)
    );

    let mut stage = wide_stage();
    stage.unmount(crate::stage::surface::CardHandle(0));
    assert_eq!(
        b.build(&mut tl, &stage, &stage.cards()),
        BuildOutcome::Deferred(NotReady::FirstCardUnmounted)
    );
}

#[test]
fn narrow_viewport_resolves_side_slide_to_card_height() {
    let stage = MemoryStage::with_cards(ViewportMetrics::new(390.0, 844.0), 4, 300.0);
    let mut tl = Timeline::new();
    let report = built(builder().build(&mut tl, &stage, &stage.cards()));
    assert_eq!(report.measurement.class, ViewportClass::Narrow);
    let at_start = tl.placement_of(2, 0.0).unwrap();
    assert_eq!(at_start.translate, Vec2::new(0.0, 300.0));
}

#[test]
fn unmounted_later_card_is_skipped() {
    let mut stage = wide_stage();
    stage.unmount(crate::stage::surface::CardHandle(3));
    let mut tl = Timeline::new();
    let report = built(builder().build(&mut tl, &stage, &stage.cards()));
    assert_eq!(report.skipped_cards, 1);
    assert_eq!(report.motions, 2);
    assert_eq!(report.total_duration, 1.5);
    assert_eq!(tl.duration(), 1.5);
    assert_eq!(tl.placement_of(2, 0.75).unwrap().translate, Vec2::new(600.0, 0.0));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = SequencerConfig {
        base_duration: -1.0,
        ..SequencerConfig::default()
    };
    assert!(TimelineBuilder::new(&scenario(), &cfg).is_err());
}
