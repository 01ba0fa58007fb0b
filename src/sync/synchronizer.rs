use crate::sync::surface::PlaybackSurface;

/// Volume of the audible source surface.
pub const SOURCE_VOLUME: f64 = 1.0;
/// Volume of the muted derived surface.
pub const DERIVED_VOLUME: f64 = 0.0;

/// Keeps a derived surface aligned with the authoritative source surface.
///
/// Time flows one way only: source time updates seek the derived surface, while derived time
/// updates are dropped. The derived surface's play state mirrors the source.
#[derive(Debug)]
pub struct DualSurfaceSynchronizer<S, D> {
    source: S,
    derived: D,
}

impl<S: PlaybackSurface, D: PlaybackSurface> DualSurfaceSynchronizer<S, D> {
    /// Take ownership of both surfaces and fix their volumes.
    pub fn new(source: S, derived: D) -> Self {
        let mut sync = Self { source, derived };
        sync.reassert_volumes();
        sync
    }

    /// Authoritative surface.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Muted surface overlays are composited on.
    pub fn derived(&self) -> &D {
        &self.derived
    }

    /// Mutable access to the source surface, for hosts that drive it directly.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Mutable access to the derived surface.
    pub fn derived_mut(&mut self) -> &mut D {
        &mut self.derived
    }

    /// Give both surfaces back.
    pub fn into_parts(self) -> (S, D) {
        (self.source, self.derived)
    }

    /// Propagate a source time update to the derived surface.
    pub fn on_source_time_update(&mut self, t: f64) {
        self.derived.seek_to(t);
        self.mirror_play_state();
    }

    /// Derived time updates never feed back into the source.
    pub fn on_derived_time_update(&self, t: f64) {
        tracing::trace!(t, "derived time update ignored");
    }

    /// Start the source and mirror it.
    pub fn play(&mut self) {
        if !self.source.is_playing() {
            self.source.play();
        }
        self.mirror_play_state();
    }

    /// Pause the source and mirror it.
    pub fn pause(&mut self) {
        if self.source.is_playing() {
            self.source.pause();
        }
        self.mirror_play_state();
    }

    /// Move both surfaces to `t`.
    pub fn seek(&mut self, t: f64) {
        self.source.seek_to(t);
        self.derived.seek_to(t);
    }

    /// Load `url` into both surfaces, keeping the current time and play state.
    ///
    /// Volumes are re-asserted as soon as the sources are set, since loading media resets them.
    pub fn swap_source(&mut self, url: &str) {
        let t = self.source.current_time();
        let playing = self.source.is_playing();
        tracing::debug!(url, t, "swapping media source");

        self.source.set_source(url);
        self.derived.set_source(url);
        self.reassert_volumes();
        self.seek(t);
        if playing {
            self.play();
        } else {
            self.mirror_play_state();
        }
    }

    /// Force `source = 1`, `derived = 0`.
    pub fn reassert_volumes(&mut self) {
        if self.source.volume() != SOURCE_VOLUME {
            self.source.set_volume(SOURCE_VOLUME);
        }
        if self.derived.volume() != DERIVED_VOLUME {
            self.derived.set_volume(DERIVED_VOLUME);
        }
    }

    /// Drive the derived surface's play state to match the source.
    pub fn mirror_play_state(&mut self) {
        match (self.source.is_playing(), self.derived.is_playing()) {
            (true, false) => self.derived.play(),
            (false, true) => self.derived.pause(),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/synchronizer.rs"]
mod tests;
