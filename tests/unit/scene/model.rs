use super::*;

fn frame_config(id: u64) -> FrameConfig {
    FrameConfig {
        scale: 2.0,
        transition_duration: 1.0,
        ..FrameConfig::identity(FrameConfigId(id))
    }
}

#[test]
fn overlay_record_parses_camel_case_wire_fields() {
    let json = r#"{
        "id": 3,
        "timeStamp": 5.5,
        "type": "button_message",
        "caption": "Hi",
        "frameConfigRef": 9,
        "position": "top-left",
        "duration": 3,
        "pauseOnShow": true,
        "action": { "action": "pause_video", "value": "3" }
    }"#;
    let rec: OverlayRecord = serde_json::from_str(json).unwrap();
    assert_eq!(rec.id, OverlayId(3));
    assert_eq!(rec.time_stamp, 5.5);
    assert_eq!(rec.kind, OverlayType::ButtonMessage);
    assert_eq!(rec.frame_config_ref, Some(FrameConfigId(9)));
    assert_eq!(rec.duration, Some(3.0));
    assert!(rec.pause_on_show);
    assert_eq!(rec.action.unwrap().value.unwrap().as_id(), Some(3));
}

#[test]
fn overlay_record_defaults_optional_fields() {
    let rec: OverlayRecord =
        serde_json::from_str(r#"{ "id": 1, "timeStamp": 0, "type": "label" }"#).unwrap();
    assert_eq!(rec.position, "center");
    assert!(rec.duration.is_none());
    assert!(!rec.pause_on_show);
    assert!(rec.validate().is_ok());
}

#[test]
fn overlay_record_rejects_bad_time_and_duration() {
    let mut rec = OverlayRecord::new(OverlayId(1), -1.0, OverlayType::Label);
    assert!(rec.validate().is_err());
    rec.time_stamp = 1.0;
    rec.duration = Some(0.0);
    assert!(rec.validate().is_err());
    rec.duration = Some(f64::NAN);
    assert!(rec.validate().is_err());
    rec.duration = Some(0.5);
    assert!(rec.validate().is_ok());
}

#[test]
fn frame_config_validation_checks_ranges() {
    assert!(frame_config(1).validate().is_ok());

    let mut c = frame_config(1);
    c.scale = 0.0;
    assert!(c.validate().is_err());

    let mut c = frame_config(1);
    c.object_position_x = 101.0;
    assert!(c.validate().is_err());

    let mut c = frame_config(1);
    c.transition_duration = 0.0;
    assert!(c.validate().is_err());
}

#[test]
fn frame_config_easing_falls_back_for_unknown_names() {
    let mut c = frame_config(1);
    c.transition_easing = "easeInOut".to_owned();
    assert_eq!(c.ease_or(Ease::Linear), Ease::EaseInOut);
    c.transition_easing = "wobble".to_owned();
    assert_eq!(c.ease_or(Ease::Linear), Ease::Linear);
}

#[test]
fn frame_config_wire_defaults() {
    let json = r#"{
        "id": 4,
        "objectPositionX": 10,
        "objectPositionY": 20,
        "scale": 1.5,
        "transformOriginX": 50,
        "transformOriginY": 50,
        "transitionDuration": 0.75
    }"#;
    let c: FrameConfig = serde_json::from_str(json).unwrap();
    assert!(c.is_active);
    assert!(!c.is_default);
    assert_eq!(c.transition_easing, "ease");
    assert!(c.source_global_config_id.is_none());
}

#[test]
fn overlay_type_visuals() {
    assert!(!OverlayType::FrameSet.is_visual());
    assert!(OverlayType::LlmInteraction.is_visual());
    assert_eq!(OverlayType::ButtonLink.name(), "button_link");
}
