use crate::{foundation::core::OverlayId, playback::state::PausedBy};

/// Transport state with pause ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlState {
    /// Playback is advancing.
    Playing,
    /// Held by an explicit user pause (also the initial state of a session).
    PausedByUser,
    /// Held by the overlay that issued the pause.
    PausedByOverlay(OverlayId),
}

/// Play/pause/seek state machine that tracks who paused playback.
///
/// Every transition returns `true` when it changed the state. Requests that do not apply (a
/// resume from an overlay that does not own the pause, a pause while already paused by the user)
/// are ignored without side effects.
#[derive(Clone, Debug)]
pub struct PlaybackController {
    state: ControlState,
    current_time: f64,
    duration: f64,
}

impl PlaybackController {
    /// Create a controller at `t = 0`, paused until the user presses play.
    pub fn new(duration: f64) -> Self {
        Self {
            state: ControlState::PausedByUser,
            current_time: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Current transport state.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Return `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.state == ControlState::Playing
    }

    /// Owner of the current pause.
    pub fn paused_by(&self) -> PausedBy {
        match self.state {
            ControlState::Playing => PausedBy::None,
            ControlState::PausedByUser => PausedBy::User,
            ControlState::PausedByOverlay(id) => PausedBy::Overlay(id),
        }
    }

    /// Playhead position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Section duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Replace the section duration, clamping the playhead into the new range.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
        self.current_time = self.clamp(self.current_time);
    }

    /// Explicit user play. Always wins over any pause owner.
    pub fn play(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        tracing::debug!(time = self.current_time, from = ?self.state, "playback started");
        self.state = ControlState::Playing;
        true
    }

    /// Explicit user pause.
    pub fn pause(&mut self) -> bool {
        if self.state == ControlState::PausedByUser {
            return false;
        }
        tracing::debug!(time = self.current_time, from = ?self.state, "paused by user");
        self.state = ControlState::PausedByUser;
        true
    }

    /// Pause on behalf of overlay `id`.
    ///
    /// Replaces another overlay's ownership (last writer wins). A user pause is kept, so that the
    /// user's next play is not swallowed by an overlay resume.
    pub fn overlay_pause(&mut self, id: OverlayId) -> bool {
        match self.state {
            ControlState::PausedByUser => false,
            ControlState::PausedByOverlay(owner) if owner == id => false,
            prev => {
                if let ControlState::PausedByOverlay(owner) = prev {
                    tracing::debug!(%owner, new_owner = %id, "pause ownership replaced");
                }
                tracing::debug!(time = self.current_time, overlay = %id, "paused by overlay");
                self.state = ControlState::PausedByOverlay(id);
                true
            }
        }
    }

    /// Resume on behalf of overlay `id`. Only the overlay owning the pause can release it.
    pub fn overlay_resume(&mut self, id: OverlayId) -> bool {
        if self.state != ControlState::PausedByOverlay(id) {
            return false;
        }
        tracing::debug!(time = self.current_time, overlay = %id, "resumed by overlay");
        self.state = ControlState::Playing;
        true
    }

    /// Jump to `t`, clamped to `[0, duration]`. The pause state is unchanged.
    pub fn seek(&mut self, t: f64) -> f64 {
        self.current_time = self.clamp(t);
        tracing::debug!(time = self.current_time, "seeked");
        self.current_time
    }

    /// Record a playback tick at `t`, clamped to `[0, duration]`.
    pub fn advance_to(&mut self, t: f64) -> f64 {
        self.current_time = self.clamp(t);
        self.current_time
    }

    fn clamp(&self, t: f64) -> f64 {
        if t.is_nan() {
            return 0.0;
        }
        t.clamp(0.0, self.duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
