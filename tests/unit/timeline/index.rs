use super::*;
use crate::scene::overlay::OverlayAction;

fn overlay(id: u64, t: f64, duration: Option<f64>, position: &str) -> Overlay {
    Overlay {
        id: OverlayId(id),
        time_stamp: t,
        kind: OverlayType::Label,
        caption: format!("o{id}"),
        content_ref: None,
        style_ref: None,
        position: position.to_owned(),
        duration,
        icon: None,
        actions: vec![],
    }
}

fn frame_set(id: u64, t: f64, config: u64) -> Overlay {
    Overlay {
        kind: OverlayType::FrameSet,
        actions: vec![OverlayAction::FrameSet {
            config: FrameConfigId(config),
        }],
        ..overlay(id, t, None, "center")
    }
}

fn ids(v: &[&Overlay]) -> Vec<u64> {
    v.iter().map(|o| o.id.0).collect()
}

#[test]
fn duration_window_is_half_open() {
    let idx = OverlayIndex::build(
        &[overlay(1, 5.0, Some(3.0), "a")],
        60.0,
        SupersessionPolicy::Position,
    );
    assert!(idx.active_at(4.999).is_empty());
    assert_eq!(ids(&idx.active_at(5.0)), vec![1]);
    assert_eq!(ids(&idx.active_at(7.999)), vec![1]);
    assert!(idx.active_at(8.0).is_empty());
}

#[test]
fn shared_timestamp_activates_all_in_id_order() {
    let idx = OverlayIndex::build(
        &[
            overlay(9, 8.0, Some(1.0), "a"),
            overlay(3, 8.0, Some(1.0), "b"),
            overlay(5, 8.0, None, "a"),
        ],
        60.0,
        SupersessionPolicy::Position,
    );
    assert_eq!(ids(&idx.active_at(8.0)), vec![3, 5, 9]);
}

#[test]
fn durationless_overlay_is_superseded_by_same_position() {
    let idx = OverlayIndex::build(
        &[
            overlay(1, 2.0, None, "top"),
            overlay(2, 4.0, None, "bottom"),
            overlay(3, 6.0, Some(1.0), "top"),
        ],
        60.0,
        SupersessionPolicy::Position,
    );
    assert_eq!(ids(&idx.active_at(5.0)), vec![1, 2]);
    assert_eq!(ids(&idx.active_at(6.0)), vec![2, 3]);
    assert_eq!(ids(&idx.active_at(7.5)), vec![2]);
    assert_eq!(idx.window(OverlayId(1)).unwrap().end, 6.0);
    assert_eq!(idx.window(OverlayId(2)).unwrap().end, 60.0);
}

#[test]
fn type_policy_groups_by_overlay_type() {
    let mut button = overlay(2, 4.0, None, "bottom");
    button.kind = OverlayType::ButtonLink;
    let idx = OverlayIndex::build(
        &[overlay(1, 2.0, None, "top"), button, overlay(3, 6.0, None, "bottom")],
        60.0,
        SupersessionPolicy::Type,
    );
    // Label 1 is superseded by label 3 even though positions differ.
    assert_eq!(ids(&idx.active_at(6.5)), vec![2, 3]);
}

#[test]
fn frame_sets_do_not_supersede_visual_overlays() {
    let idx = OverlayIndex::build(
        &[overlay(1, 2.0, None, "center"), frame_set(2, 4.0, 10), frame_set(3, 8.0, 11)],
        60.0,
        SupersessionPolicy::Position,
    );
    assert_eq!(ids(&idx.active_at(5.0)), vec![1, 2]);
    assert_eq!(ids(&idx.active_at(9.0)), vec![1, 3]);
}

#[test]
fn no_spurious_activation_between_events() {
    let idx = OverlayIndex::build(
        &[overlay(1, 2.0, Some(10.0), "a"), overlay(2, 20.0, Some(1.0), "b")],
        60.0,
        SupersessionPolicy::Position,
    );
    let reference = ids(&idx.active_at(12.0));
    let mut t = 12.0;
    while t < 20.0 {
        assert_eq!(ids(&idx.active_at(t)), reference);
        t += 0.37;
    }
}

#[test]
fn open_window_ends_with_the_section() {
    let idx = OverlayIndex::build(
        &[overlay(1, 2.0, None, "a"), overlay(2, 25.0, Some(10.0), "b")],
        30.0,
        SupersessionPolicy::Position,
    );
    let w = idx.window(OverlayId(1)).unwrap();
    assert_eq!((w.start, w.end), (2.0, 30.0));
    assert_eq!(idx.window(OverlayId(2)).unwrap().end, 30.0);
    assert_eq!(ids(&idx.active_at(29.999)), vec![1, 2]);
    assert!(idx.active_at(30.0).is_empty());
    assert!(idx.active_at(1000.0).is_empty());
}

#[test]
fn long_window_is_found_behind_short_ones() {
    let idx = OverlayIndex::build(
        &[
            overlay(1, 0.0, Some(100.0), "a"),
            overlay(2, 1.0, Some(0.5), "b"),
            overlay(3, 2.0, Some(0.5), "c"),
        ],
        200.0,
        SupersessionPolicy::Position,
    );
    assert_eq!(ids(&idx.active_at(50.0)), vec![1]);
}

#[test]
fn next_trigger_is_strictly_after_with_id_tiebreak() {
    let idx = OverlayIndex::build(
        &[overlay(7, 5.0, None, "a"), overlay(4, 5.0, None, "b"), overlay(1, 3.0, None, "c")],
        60.0,
        SupersessionPolicy::Position,
    );
    assert_eq!(idx.next_trigger_after(0.0).unwrap().id, OverlayId(1));
    assert_eq!(idx.next_trigger_after(3.0).unwrap().id, OverlayId(4));
    assert!(idx.next_trigger_after(5.0).is_none());
}

#[test]
fn triggers_between_is_open_closed() {
    let idx = OverlayIndex::build(
        &[overlay(1, 1.0, None, "a"), overlay(2, 2.0, None, "b"), overlay(3, 3.0, None, "c")],
        60.0,
        SupersessionPolicy::Position,
    );
    let got: Vec<u64> = idx.triggers_between(1.0, 3.0).map(|o| o.id.0).collect();
    assert_eq!(got, vec![2, 3]);
    assert_eq!(idx.triggers_between(3.0, 1.0).count(), 0);
}

#[test]
fn frame_targets_latest_first() {
    let idx = OverlayIndex::build(
        &[frame_set(1, 2.0, 10), frame_set(3, 5.0, 12), frame_set(2, 5.0, 11)],
        60.0,
        SupersessionPolicy::Position,
    );
    let got: Vec<u64> = idx.frame_targets_until(5.0).map(|c| c.0).collect();
    assert_eq!(got, vec![12, 11, 10]);
    assert_eq!(idx.frame_targets_until(1.0).count(), 0);
}

#[test]
fn lookups_by_id() {
    let idx = OverlayIndex::build(&[overlay(1, 2.0, None, "a")], 60.0, SupersessionPolicy::Position);
    assert_eq!(idx.len(), 1);
    assert!(idx.get(OverlayId(1)).is_some());
    assert!(idx.get(OverlayId(2)).is_none());
    assert!(idx.window(OverlayId(2)).is_none());
}
