use super::*;
use crate::scene::model::OverlayType;

const S: SectionId = SectionId(1);

fn backend() -> MemoryBackend {
    let mut b = MemoryBackend::new();
    b.insert_section(S, 60.0, Some("videos/a.mp4".to_owned()))
        .unwrap();
    b
}

fn zoom(scale: f64) -> FrameConfig {
    FrameConfig {
        name: "zoom".to_owned(),
        scale,
        ..FrameConfig::identity(FrameConfigId(0))
    }
}

#[test]
fn create_assigns_ids_and_list_orders_them() {
    let mut b = backend();
    let a = b
        .create_overlay(S, OverlayRecord::new(OverlayId(999), 5.0, OverlayType::Label))
        .unwrap();
    let c = b
        .create_overlay(S, OverlayRecord::new(OverlayId(999), 1.0, OverlayType::Label))
        .unwrap();
    assert_ne!(a.id, c.id);
    let listed: Vec<OverlayId> = b.list_overlays(S).unwrap().iter().map(|o| o.id).collect();
    assert_eq!(listed, vec![a.id, c.id]);
}

#[test]
fn update_and_delete_unknown_ids_are_not_found() {
    let mut b = backend();
    let err = b
        .update_overlay(S, OverlayRecord::new(OverlayId(42), 1.0, OverlayType::Label))
        .unwrap_err();
    assert!(matches!(err, CueError::NotFound(_)));
    assert!(matches!(
        b.delete_overlay(S, OverlayId(42)).unwrap_err(),
        CueError::NotFound(_)
    ));
    assert!(matches!(
        b.list_overlays(SectionId(77)).unwrap_err(),
        CueError::NotFound(_)
    ));
}

#[test]
fn invalid_records_are_rejected() {
    let mut b = backend();
    let mut rec = OverlayRecord::new(OverlayId(0), 1.0, OverlayType::Label);
    rec.duration = Some(0.0);
    assert!(b.create_overlay(S, rec).is_err());
    assert!(b.create_frame_config(S, zoom(0.0)).is_err());
}

#[test]
fn copy_global_duplicates_and_tags_provenance() {
    let mut b = backend();
    let global = b.insert_global(zoom(2.0)).unwrap();
    let copy = b.copy_global_to_section(S, global.id).unwrap();
    assert_ne!(copy.id, global.id);
    assert_eq!(copy.source_global_config_id, Some(global.id));
    assert_eq!(copy.scale, 2.0);
    assert_eq!(copy.name, global.name);
}

#[test]
fn editing_section_copy_never_mutates_global() {
    let mut b = backend();
    let global = b.insert_global(zoom(2.0)).unwrap();
    let mut copy = b.copy_global_to_section(S, global.id).unwrap();
    copy.scale = 3.5;
    copy.object_position_x = 10.0;
    b.update_frame_config(S, copy).unwrap();

    let globals = b.list_global_frame_configs().unwrap();
    assert_eq!(globals, vec![global]);
    assert_eq!(b.list_frame_configs(S).unwrap()[0].scale, 3.5);
}

#[test]
fn copy_does_not_create_a_second_default() {
    let mut b = backend();
    let mut existing = zoom(1.0);
    existing.is_default = true;
    b.create_frame_config(S, existing).unwrap();

    let mut template = zoom(2.0);
    template.is_default = true;
    let global = b.insert_global(template).unwrap();
    let copy = b.copy_global_to_section(S, global.id).unwrap();
    assert!(!copy.is_default);

    let mut second = zoom(3.0);
    second.is_default = true;
    assert!(b.create_frame_config(S, second).is_err());
}

#[test]
fn armed_failure_is_transient_and_one_shot() {
    let b = backend();
    b.fail_next("gateway timeout");
    let err = b.fetch_section(S).unwrap_err();
    assert!(err.is_transient());
    assert!(b.fetch_section(S).is_ok());
}

#[test]
fn fetch_section_assembles_full_definition() {
    let mut b = backend();
    b.create_overlay(S, OverlayRecord::new(OverlayId(0), 2.0, OverlayType::Content))
        .unwrap();
    let g = b.insert_global(zoom(2.0)).unwrap();
    b.copy_global_to_section(S, g.id).unwrap();

    let section = b.fetch_section(S).unwrap();
    let def = section.def();
    assert_eq!(def.overlays.len(), 1);
    assert_eq!(def.frame_configs.len(), 1);
    assert_eq!(def.global_frame_configs.len(), 1);
    assert!(section.snapshot().unwrap().report.is_clean());
}

#[test]
fn import_keeps_ids_and_advances_counters() {
    let mut b = MemoryBackend::new();
    let def = SectionDef {
        id: S,
        duration: 30.0,
        media: None,
        overlays: vec![OverlayRecord::new(OverlayId(10), 1.0, OverlayType::Label)],
        frame_configs: vec![],
        global_frame_configs: vec![],
    };
    b.import_section(&def).unwrap();
    let created = b
        .create_overlay(S, OverlayRecord::new(OverlayId(0), 2.0, OverlayType::Label))
        .unwrap();
    assert_eq!(created.id, OverlayId(11));
}

#[test]
fn exhausted_id_space_is_a_validation_error() {
    let mut b = MemoryBackend::new();
    let mut def = SectionDef {
        id: S,
        duration: 30.0,
        media: None,
        overlays: vec![OverlayRecord::new(OverlayId(u64::MAX), 1.0, OverlayType::Label)],
        frame_configs: vec![],
        global_frame_configs: vec![],
    };
    assert!(matches!(
        b.import_section(&def).unwrap_err(),
        CueError::Validation(_)
    ));
    assert!(b.list_overlays(S).is_err());

    def.overlays[0].id = OverlayId(u64::MAX - 1);
    b.import_section(&def).unwrap();
    let err = b
        .create_overlay(S, OverlayRecord::new(OverlayId(0), 2.0, OverlayType::Label))
        .unwrap_err();
    assert!(matches!(err, CueError::Validation(_)));
    assert_eq!(b.list_overlays(S).unwrap().len(), 1);
}
