use super::*;
use crate::foundation::core::OverlayId;
use crate::scene::model::{OverlayRecord, OverlayType};

fn def() -> SectionDef {
    let mut frame = OverlayRecord::new(OverlayId(2), 10.0, OverlayType::FrameSet);
    frame.frame_config_ref = Some(FrameConfigId(100));
    SectionDef {
        id: SectionId(1),
        duration: 60.0,
        media: Some("videos/intro.mp4".to_owned()),
        overlays: vec![
            OverlayRecord::new(OverlayId(1), 5.0, OverlayType::Label),
            frame,
        ],
        frame_configs: vec![FrameConfig::identity(FrameConfigId(100))],
        global_frame_configs: vec![],
    }
}

#[test]
fn snapshot_of_clean_section_has_no_diagnostics() {
    let snap = Section::from_def(def()).snapshot().unwrap();
    assert_eq!(snap.overlays.len(), 2);
    assert!(snap.report.is_clean());
    assert_eq!(snap.duration, 60.0);
}

#[test]
fn duplicate_overlay_ids_are_rejected() {
    let mut d = def();
    d.overlays
        .push(OverlayRecord::new(OverlayId(1), 8.0, OverlayType::Label));
    assert!(Section::from_def(d).validate().is_err());
}

#[test]
fn zero_duration_section_is_rejected() {
    let mut d = def();
    d.duration = 0.0;
    assert!(Section::from_def(d).validate().is_err());
}

#[test]
fn two_defaults_in_one_scope_are_rejected() {
    let mut d = def();
    let mut a = FrameConfig::identity(FrameConfigId(200));
    a.is_default = true;
    let mut b = FrameConfig::identity(FrameConfigId(201));
    b.is_default = true;
    d.frame_configs.extend([a, b]);
    assert!(Section::from_def(d).validate().is_err());
}

#[test]
fn dangling_frame_ref_is_reported_not_fatal() {
    let mut d = def();
    d.frame_configs.clear();
    let snap = Section::from_def(d).snapshot().unwrap();
    assert_eq!(snap.report.diagnostics, vec![LoadDiagnostic::DanglingFrameConfig {
        overlay: OverlayId(2),
        config: FrameConfigId(100)
    }]);
}

#[test]
fn from_reader_reports_parse_errors() {
    let err = Section::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
