use super::*;
use crate::scene::model::ActionValueDef;

fn record(id: u64, t: f64, kind: OverlayType) -> OverlayRecord {
    OverlayRecord::new(OverlayId(id), t, kind)
}

fn with_action(mut rec: OverlayRecord, action: &str, value: Option<ActionValueDef>) -> OverlayRecord {
    rec.action = Some(ActionDef {
        action: action.to_owned(),
        value,
    });
    rec
}

#[test]
fn vocabulary_parses_every_known_string() {
    for (s, k) in [
        ("frame_set", ActionKind::FrameSet),
        ("pause_video", ActionKind::PauseVideo),
        ("resume_video", ActionKind::ResumeVideo),
        ("pause_video_overlay", ActionKind::PauseVideoOverlay),
        ("resume_video_overlay", ActionKind::ResumeVideoOverlay),
        ("show_fullscreen_content", ActionKind::ShowFullscreenContent),
    ] {
        assert_eq!(ActionKind::parse(s), Some(k));
    }
    assert_eq!(ActionKind::parse("explode"), None);
}

#[test]
fn frame_set_type_implies_frame_action() {
    let mut rec = record(1, 10.0, OverlayType::FrameSet);
    rec.frame_config_ref = Some(FrameConfigId(7));
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert_eq!(o.actions, vec![OverlayAction::FrameSet {
        config: FrameConfigId(7)
    }]);
    assert_eq!(o.frame_target(), Some(FrameConfigId(7)));
    assert!(report.is_clean());
}

#[test]
fn explicit_frame_action_replaces_implied_target() {
    let mut rec = with_action(
        record(1, 2.0, OverlayType::FrameSet),
        "frame_set",
        Some(ActionValueDef::Id(8)),
    );
    rec.frame_config_ref = Some(FrameConfigId(7));
    rec.pause_on_show = true;
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert_eq!(o.actions, vec![
        OverlayAction::FrameSet {
            config: FrameConfigId(8)
        },
        OverlayAction::Pause {
            owner: OverlayId(1),
            blocking: false
        },
    ]);
    assert_eq!(o.frame_target(), Some(FrameConfigId(8)));
}

#[test]
fn frame_set_type_without_ref_is_reported() {
    let rec = record(1, 10.0, OverlayType::FrameSet);
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert!(o.actions.is_empty());
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn pause_on_show_and_explicit_pause_collapse() {
    let mut rec = with_action(record(5, 5.0, OverlayType::ButtonMessage), "pause_video", None);
    rec.pause_on_show = true;
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert_eq!(o.actions, vec![OverlayAction::Pause {
        owner: OverlayId(5),
        blocking: false
    }]);
}

#[test]
fn resume_value_targets_other_overlay() {
    let rec = with_action(
        record(2, 6.0, OverlayType::Label),
        "resume_video",
        Some(ActionValueDef::Text("9".to_owned())),
    );
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert_eq!(o.actions, vec![OverlayAction::Resume {
        owner: OverlayId(9),
        dismiss: false
    }]);
}

#[test]
fn resume_without_value_targets_self() {
    let rec = with_action(record(2, 6.0, OverlayType::Label), "resume_video_overlay", None);
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert_eq!(o.actions, vec![OverlayAction::Resume {
        owner: OverlayId(2),
        dismiss: true
    }]);
}

#[test]
fn unknown_action_is_dropped_not_fatal() {
    let rec = with_action(record(3, 1.0, OverlayType::Content), "launch_rocket", None);
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert!(o.actions.is_empty());
    assert_eq!(report.diagnostics, vec![LoadDiagnostic::UnknownAction {
        overlay: OverlayId(3),
        action: "launch_rocket".to_owned()
    }]);
}

#[test]
fn unparsable_value_is_dropped() {
    let rec = with_action(
        record(3, 1.0, OverlayType::Content),
        "show_fullscreen_content",
        Some(ActionValueDef::Text("abc".to_owned())),
    );
    let mut report = LoadReport::default();
    let o = Overlay::from_record(&rec, &mut report).unwrap();
    assert!(o.actions.is_empty());
    assert!(matches!(
        report.diagnostics[0],
        LoadDiagnostic::MissingActionValue { .. }
    ));
}

#[test]
fn invalid_record_is_an_error() {
    let mut rec = record(3, 1.0, OverlayType::Content);
    rec.duration = Some(-2.0);
    let mut report = LoadReport::default();
    assert!(Overlay::from_record(&rec, &mut report).is_err());
}
