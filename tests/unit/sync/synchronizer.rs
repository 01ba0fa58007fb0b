use super::*;
use crate::sync::surface::{RecordingSurface, SurfaceCall};

fn pair() -> DualSurfaceSynchronizer<RecordingSurface, RecordingSurface> {
    DualSurfaceSynchronizer::new(RecordingSurface::new(), RecordingSurface::new())
}

#[test]
fn volumes_fixed_at_construction() {
    let sync = pair();
    assert_eq!(sync.source().volume(), 1.0);
    assert_eq!(sync.derived().volume(), 0.0);
    assert_eq!(sync.derived().calls(), &[SurfaceCall::SetVolume(0.0)]);
    assert!(sync.source().calls().is_empty());
}

#[test]
fn source_time_drives_derived_within_one_update() {
    let mut sync = pair();
    for t in [0.0, 0.25, 1.5, 42.0, 3.0] {
        sync.on_source_time_update(t);
        assert_eq!(sync.derived().current_time(), t);
    }
}

#[test]
fn derived_time_never_reaches_source() {
    let mut sync = pair();
    sync.source_mut().seek_to(10.0);
    sync.source_mut().take_calls();
    sync.on_derived_time_update(99.0);
    assert_eq!(sync.source().current_time(), 10.0);
    assert!(sync.source().calls().is_empty());
}

#[test]
fn play_and_pause_are_mirrored() {
    let mut sync = pair();
    sync.play();
    assert!(sync.source().is_playing());
    assert!(sync.derived().is_playing());

    sync.pause();
    assert!(!sync.source().is_playing());
    assert!(!sync.derived().is_playing());

    // A derived surface started on its own is pulled back on the next update.
    sync.derived_mut().play();
    sync.on_source_time_update(1.0);
    assert!(!sync.derived().is_playing());
}

#[test]
fn swap_source_reasserts_volume_and_keeps_position() {
    let mut sync = pair();
    sync.play();
    sync.seek(12.0);
    sync.swap_source("https://cdn.example.com/dub.mp4");

    assert_eq!(sync.source().source(), Some("https://cdn.example.com/dub.mp4"));
    assert_eq!(sync.derived().source(), Some("https://cdn.example.com/dub.mp4"));
    assert_eq!(sync.source().volume(), 1.0);
    assert_eq!(sync.derived().volume(), 0.0);
    assert_eq!(sync.source().current_time(), 12.0);
    assert_eq!(sync.derived().current_time(), 12.0);
    assert!(sync.source().is_playing() && sync.derived().is_playing());

    let calls = sync.derived().calls();
    let set = calls
        .iter()
        .rposition(|c| matches!(c, SurfaceCall::SetSource(_)))
        .unwrap();
    assert_eq!(calls[set + 1], SurfaceCall::SetVolume(0.0));
}
