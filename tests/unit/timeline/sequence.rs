use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::{Axis, TimeSpan, Vec2};

fn motion(index: usize, start: f64, duration: f64, from: f64) -> Motion {
    Motion {
        index,
        handle: CardHandle(index as u32),
        z_index: index as i32,
        axis: Axis::Vertical,
        from,
        span: TimeSpan::new(start, duration).unwrap(),
        ease: Ease::Linear,
    }
}

#[test]
fn motions_are_kept_in_start_order() {
    let mut tl = Timeline::new();
    tl.push(motion(3, 1.0, 0.5, 100.0));
    tl.push(motion(1, 0.0, 0.5, 100.0));
    tl.push(motion(2, 0.5, 0.5, 100.0));
    let order: Vec<usize> = tl.motions().iter().map(|m| m.index).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(tl.duration(), 1.5);
}

#[test]
fn seek_clamps_and_orders_by_index() {
    let mut tl = Timeline::new();
    tl.hold(0, CardHandle(0), CardPlacement::identity(0));
    tl.push(motion(1, 0.0, 1.0, 100.0));

    let before = tl.seek(-5.0);
    assert_eq!(before.len(), 2);
    assert_eq!(before[0].index, 0);
    assert_eq!(before[1].placement.translate, Vec2::new(0.0, 100.0));

    let after = tl.seek(99.0);
    assert!(after[1].placement.is_settled());

    let nan = tl.seek(f64::NAN);
    assert_eq!(nan, before);
}

#[test]
fn clear_drops_everything() {
    let mut tl = Timeline::new();
    tl.hold(0, CardHandle(0), CardPlacement::identity(0));
    tl.push(motion(1, 0.0, 1.0, 100.0));
    tl.clear();
    assert!(tl.is_empty());
    assert_eq!(tl.duration(), 0.0);
    assert!(tl.seek(0.0).is_empty());
}

#[test]
fn holding_the_same_card_twice_replaces() {
    let mut tl = Timeline::new();
    tl.hold(0, CardHandle(0), CardPlacement::identity(0));
    tl.hold(0, CardHandle(0), CardPlacement::identity(0));
    assert_eq!(tl.holds().len(), 1);
}

#[test]
fn placement_of_reports_unknown_cards_as_none() {
    let mut tl = Timeline::new();
    tl.push(motion(1, 0.0, 1.0, 100.0));
    assert_eq!(
        tl.placement_of(1, 0.5).map(|p| p.translate),
        Some(Vec2::new(0.0, 50.0))
    );
    assert_eq!(tl.placement_of(7, 0.5), None);
}

#[test]
fn extend_to_only_lengthens() {
    let mut tl = Timeline::new();
    tl.push(motion(1, 0.0, 0.5, 100.0));
    tl.extend_to(1.5);
    assert_eq!(tl.duration(), 1.5);
    tl.extend_to(0.2);
    tl.extend_to(f64::NAN);
    assert_eq!(tl.duration(), 1.5);
    assert!(tl.seek(9.0)[0].placement.is_settled());

    tl.clear();
    assert_eq!(tl.duration(), 0.0);
}
