/// Minimal media-element interface the engine drives.
///
/// Time updates flow the other way: the host calls the session's `on_*_time_update` hooks with
/// the time reported by each surface.
pub trait PlaybackSurface {
    /// Move the playhead to `t` seconds.
    fn seek_to(&mut self, t: f64);
    /// Set output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
    /// Start playback.
    fn play(&mut self);
    /// Pause playback.
    fn pause(&mut self);
    /// Load a new media URL. Implementations may reset volume and time.
    fn set_source(&mut self, url: &str);
    /// Current playhead position.
    fn current_time(&self) -> f64;
    /// Return `true` while playing.
    fn is_playing(&self) -> bool;
    /// Current output volume.
    fn volume(&self) -> f64;
}

/// One call observed by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "call", content = "arg", rename_all = "snake_case")]
pub enum SurfaceCall {
    /// `seek_to(t)`.
    SeekTo(f64),
    /// `set_volume(v)`.
    SetVolume(f64),
    /// `play()`.
    Play,
    /// `pause()`.
    Pause,
    /// `set_source(url)`.
    SetSource(String),
}

/// In-memory surface that records every call.
///
/// Like a browser media element, loading a new source resets volume to `1.0` and time to `0`.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    time: f64,
    playing: bool,
    volume: f64,
    source: Option<String>,
    calls: Vec<SurfaceCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            time: 0.0,
            playing: false,
            volume: 1.0,
            source: None,
            calls: Vec::new(),
        }
    }
}

impl RecordingSurface {
    /// Create an idle surface with no source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls observed so far, oldest first.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Drain recorded calls.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Currently loaded source URL.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Advance the local clock by `dt` if playing and return the new time.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.playing {
            self.time += dt.max(0.0);
        }
        self.time
    }
}

impl PlaybackSurface for RecordingSurface {
    fn seek_to(&mut self, t: f64) {
        self.time = t;
        self.calls.push(SurfaceCall::SeekTo(t));
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        self.calls.push(SurfaceCall::SetVolume(volume));
    }

    fn play(&mut self) {
        self.playing = true;
        self.calls.push(SurfaceCall::Play);
    }

    fn pause(&mut self) {
        self.playing = false;
        self.calls.push(SurfaceCall::Pause);
    }

    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_owned());
        self.time = 0.0;
        self.playing = false;
        self.volume = 1.0;
        self.calls.push(SurfaceCall::SetSource(url.to_owned()));
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}
