use std::collections::BTreeSet;

use crate::{foundation::core::OverlayId, frame::transform::FrameTransform};

/// Who is holding playback paused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "by", content = "overlay", rename_all = "snake_case")]
pub enum PausedBy {
    /// Nobody: playback is running.
    #[default]
    None,
    /// The user.
    User,
    /// The overlay with this id.
    Overlay(OverlayId),
}

/// Runtime snapshot of a playback session. Not persisted.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackState {
    /// Playhead position in seconds.
    pub current_time: f64,
    /// Whether playback is advancing.
    pub is_playing: bool,
    /// Owner of the current pause.
    pub paused_by: PausedBy,
    /// Transform currently rendered on the derived surface.
    pub active_transform: FrameTransform,
    /// Overlays whose window contains `current_time`.
    pub active_overlay_ids: BTreeSet<OverlayId>,
}
