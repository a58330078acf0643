use super::*;

fn scenario() -> Choreography {
    Choreography::new(vec![
        CardMotion::new(Archetype::Base),
        CardMotion::new(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::SlideFromSide).with_mobile_override(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::SlideFromBelow),
    ])
    .unwrap()
}

#[test]
fn chained_start_times_follow_authored_order() {
    let table = scenario().resolve(0.5).unwrap();
    let starts: Vec<f64> = table.configs().iter().map(|c| c.start_time()).collect();
    assert_eq!(starts, vec![0.0, 0.0, 0.5, 1.0]);
    assert_eq!(table.total_duration(), 1.5);
    assert_eq!(table.chain_order(), &[1, 2, 3]);
}

#[test]
fn base_card_is_lowest_and_z_increases_with_index() {
    let table = scenario().resolve(0.5).unwrap();
    let base = table.config_for(0);
    assert_eq!(base.archetype, Archetype::Base);
    assert_eq!(base.duration(), 0.0);
    let zs: Vec<i32> = table.configs().iter().map(|c| c.z_index).collect();
    assert!(zs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn out_of_range_lookup_degrades_to_base() {
    let table = scenario().resolve(0.5).unwrap();
    let cfg = table.config_for(99);
    assert_eq!(cfg.archetype, Archetype::Base);
    assert_eq!(cfg.index, 99);
}

#[test]
fn authored_order_may_differ_from_index_order() {
    // Card 3 plays first, then 1, then 2.
    let choreo = Choreography::new(vec![
        CardMotion::new(Archetype::Base),
        CardMotion::new(Archetype::SlideFromBelow).after(3),
        CardMotion::new(Archetype::SlideFromSide).after(1),
        CardMotion::new(Archetype::SlideFromBelow).after(0),
    ])
    .unwrap();
    assert_eq!(choreo.chain_order(), &[3, 1, 2]);

    let table = choreo.resolve(1.0).unwrap();
    assert_eq!(table.config_for(3).start_time(), 0.0);
    assert_eq!(table.config_for(1).start_time(), 1.0);
    assert_eq!(table.config_for(2).start_time(), 2.0);
}

#[test]
fn stacked_duration_scales_with_index() {
    let choreo = Choreography::new(vec![
        CardMotion::new(Archetype::Base),
        CardMotion::new(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::StackedSlideFromBelow),
    ])
    .unwrap();
    let table = choreo.resolve(0.5).unwrap();
    assert_eq!(table.config_for(3).duration(), 1.5);
    assert_eq!(table.total_duration(), 2.5);
}

#[test]
fn spans_tile_the_timeline_without_gaps() {
    let table = Choreography::portfolio(10).resolve(0.5).unwrap();
    let mut cursor = 0.0;
    for &i in table.chain_order() {
        let cfg = table.config_for(i);
        assert_eq!(cfg.start_time(), cursor, "card {i}");
        cursor = cfg.span.end();
    }
    assert_eq!(cursor, table.total_duration());
}

#[test]
fn rejects_non_base_first_card() {
    let err = Choreography::new(vec![CardMotion::new(Archetype::SlideFromBelow)]).unwrap_err();
    assert!(err.to_string().contains("card 0"));
}

#[test]
fn rejects_two_cards_following_the_same_card() {
    let err = Choreography::new(vec![
        CardMotion::new(Archetype::Base),
        CardMotion::new(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::SlideFromBelow).after(1),
        CardMotion::new(Archetype::SlideFromBelow).after(1),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("both follow card 1"));
}

#[test]
fn rejects_cycles_detached_from_the_start() {
    let err = Choreography::new(vec![
        CardMotion::new(Archetype::Base),
        CardMotion::new(Archetype::SlideFromBelow),
        CardMotion::new(Archetype::SlideFromBelow).after(3),
        CardMotion::new(Archetype::SlideFromBelow).after(2),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("single chain"));
}

#[test]
fn rejects_dangling_and_self_anchors() {
    assert!(
        Choreography::new(vec![
            CardMotion::new(Archetype::Base),
            CardMotion::new(Archetype::SlideFromBelow).after(7),
        ])
        .is_err()
    );
    assert!(
        Choreography::new(vec![
            CardMotion::new(Archetype::Base),
            CardMotion::new(Archetype::SlideFromBelow).after(1),
        ])
        .is_err()
    );
}

#[test]
fn json_round_trip_validates_chain() {
    let json = r#"{
        "cards": [
            { "archetype": "base" },
            { "archetype": "slide_from_side", "mobile_override": "slide_from_below" },
            { "archetype": "stacked_slide_from_below", "ease": "out_cubic" }
        ]
    }"#;
    let choreo = Choreography::from_json_str(json).unwrap();
    assert_eq!(choreo.len(), 3);
    assert_eq!(choreo.cards()[2].ease, Ease::OutCubic);

    let bad = r#"{ "cards": [ { "archetype": "slide_from_side" } ] }"#;
    let err = Choreography::from_json_str(bad).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn resolve_rejects_bad_base_duration() {
    assert!(scenario().resolve(0.0).is_err());
    assert!(scenario().resolve(f64::INFINITY).is_err());
}

#[test]
fn empty_and_single_card_choreographies_are_static() {
    let empty = Choreography::portfolio(0).resolve(0.5).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.total_duration(), 0.0);

    let one = Choreography::portfolio(1).resolve(0.5).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one.total_duration(), 0.0);
}
