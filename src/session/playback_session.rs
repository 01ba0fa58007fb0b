use crate::{
    dispatch::{
        command::Command,
        dispatcher::{ActionDispatcher, DispatchTarget},
        view::RenderView,
    },
    foundation::{
        core::SectionId,
        error::{CueError, CueResult},
        media::MediaResolver,
        opts::EngineOpts,
    },
    frame::{catalog::FrameCatalog, engine::FrameTransformEngine, transform::FrameTransform},
    playback::{controller::PlaybackController, state::PlaybackState},
    scene::{
        overlay::LoadReport,
        section::{Section, SectionSnapshot},
    },
    sync::{surface::PlaybackSurface, synchronizer::DualSurfaceSynchronizer},
    timeline::index::OverlayIndex,
};

/// Which clock drives playback time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clock {
    /// Time updates reported by the source surface.
    Source,
    /// Time advanced by the host through [`PlaybackSession::advance_simulated`] after a media
    /// failure.
    Simulated,
}

/// Category of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Fetching a section failed; the previous snapshot stays in use.
    LoadFailed,
    /// The media could not be resolved or played.
    MediaError,
}

/// Non-fatal condition surfaced to the UI as a banner.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Notice {
    /// Category.
    pub kind: NoticeKind,
    /// Human-readable description.
    pub message: String,
    /// Whether retrying the operation may succeed.
    pub retryable: bool,
}

/// Handle for one in-flight section fetch.
///
/// Only the ticket from the most recent [`PlaybackSession::begin_load`] is honoured, and none
/// after [`PlaybackSession::teardown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Result of handing a fetched section to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The snapshot replaced the previous one.
    Applied(LoadReport),
    /// The fetch failed; the previous snapshot is kept and a notice was raised.
    Kept,
    /// The ticket was superseded or the session was torn down.
    Stale,
}

/// One playback view: binds the overlay index, frame catalog, controller, frame engine,
/// dispatcher and surface synchronizer.
///
/// All methods are synchronous. After [`teardown`](Self::teardown) every callback is a no-op.
#[derive(Debug)]
pub struct PlaybackSession<S, D> {
    opts: EngineOpts,
    resolver: MediaResolver,
    section: Option<SectionId>,
    media: Option<String>,
    report: LoadReport,
    index: OverlayIndex,
    catalog: FrameCatalog,
    controller: PlaybackController,
    frame: FrameTransformEngine,
    dispatcher: ActionDispatcher,
    sync: DualSurfaceSynchronizer<S, D>,
    clock: Clock,
    generation: u64,
    pending: Option<u64>,
    torn_down: bool,
    notices: Vec<Notice>,
}

impl<S: PlaybackSurface, D: PlaybackSurface> PlaybackSession<S, D> {
    /// Create an empty session over two surfaces.
    pub fn new(opts: EngineOpts, source: S, derived: D) -> CueResult<Self> {
        opts.validate()?;
        Ok(Self {
            resolver: opts.media_resolver(),
            section: None,
            media: None,
            report: LoadReport::default(),
            index: OverlayIndex::default(),
            catalog: FrameCatalog::new(&[], &[], opts.default_easing),
            controller: PlaybackController::new(0.0),
            frame: FrameTransformEngine::default(),
            dispatcher: ActionDispatcher::new(opts.fire_crossed_triggers),
            sync: DualSurfaceSynchronizer::new(source, derived),
            clock: Clock::Source,
            generation: 0,
            pending: None,
            torn_down: false,
            notices: Vec::new(),
            opts,
        })
    }

    /// Options the session was created with.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Loaded section, if any.
    pub fn section_id(&self) -> Option<SectionId> {
        self.section
    }

    /// Diagnostics of the current snapshot.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Overlay index of the current snapshot.
    pub fn index(&self) -> &OverlayIndex {
        &self.index
    }

    /// Frame configurations of the current snapshot.
    pub fn catalog(&self) -> &FrameCatalog {
        &self.catalog
    }

    /// Transport state machine.
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Surface pair.
    pub fn sync(&self) -> &DualSurfaceSynchronizer<S, D> {
        &self.sync
    }

    /// Clock currently driving time.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Return `true` after [`teardown`](Self::teardown).
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Notices raised so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain raised notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Start a fetch. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.pending = (!self.torn_down).then_some(self.generation);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Hand the result of a fetch to the session.
    #[tracing::instrument(skip(self, result), fields(generation = ticket.generation))]
    pub fn complete_load(&mut self, ticket: LoadTicket, result: CueResult<Section>) -> LoadOutcome {
        if self.torn_down || self.pending != Some(ticket.generation) {
            tracing::debug!("stale load ignored");
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result.and_then(|s| s.snapshot()) {
            Ok(snap) => LoadOutcome::Applied(self.apply(snap)),
            Err(e) => {
                tracing::warn!(error = %e, "section load failed; keeping last snapshot");
                self.notices.push(Notice {
                    kind: NoticeKind::LoadFailed,
                    message: e.to_string(),
                    retryable: e.is_transient(),
                });
                LoadOutcome::Kept
            }
        }
    }

    /// Load an already available section.
    pub fn load(&mut self, section: Section) -> LoadOutcome {
        let ticket = self.begin_load();
        self.complete_load(ticket, Ok(section))
    }

    fn apply(&mut self, snap: SectionSnapshot) -> LoadReport {
        let fresh = self.section != Some(snap.id);
        self.index = OverlayIndex::build(&snap.overlays, snap.duration, self.opts.supersession);
        self.catalog = FrameCatalog::new(
            &snap.frame_configs,
            &snap.global_frame_configs,
            self.opts.default_easing,
        );
        self.section = Some(snap.id);
        self.report = snap.report;

        if fresh {
            self.controller = PlaybackController::new(snap.duration);
            self.dispatcher.reset();
            let initial = self.catalog.default_config();
            self.frame = FrameTransformEngine::new(
                initial.map_or(FrameTransform::IDENTITY, FrameTransform::from),
                initial.map(|c| c.id),
            );
        } else {
            self.controller.set_duration(snap.duration);
            let t = self.controller.current_time();
            self.jump(t);
        }

        if snap.media != self.media {
            self.media = snap.media;
            if let Some(reference) = self.media.clone() {
                self.load_media(&reference);
            }
        }
        if fresh {
            self.sync.seek(0.0);
        }
        tracing::debug!(
            section = %snap.id,
            overlays = self.index.len(),
            fresh,
            "section snapshot applied"
        );
        self.report.clone()
    }

    /// Cancel pending fetches and in-flight transitions, and pause the surfaces.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.generation += 1;
        self.pending = None;
        self.frame.cancel();
        self.sync.pause();
        tracing::debug!("playback session torn down");
    }

    /// Explicit user play.
    pub fn play(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let changed = self.controller.play();
        self.sync.play();
        changed
    }

    /// Explicit user pause.
    pub fn pause(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let changed = self.controller.pause();
        self.sync.pause();
        changed
    }

    /// Jump to `t` without firing any skipped trigger. Returns the `Show`/`Hide` commands.
    pub fn seek(&mut self, t: f64) -> Vec<Command> {
        if self.torn_down {
            return Vec::new();
        }
        if !t.is_finite() {
            tracing::warn!(t, "ignoring non-finite seek");
            return Vec::new();
        }
        let t = self.controller.seek(t);
        self.sync.seek(t);
        self.jump(t)
    }

    /// Source surface time update.
    pub fn on_source_time_update(&mut self, t: f64) -> Vec<Command> {
        if self.torn_down || self.clock != Clock::Source {
            return Vec::new();
        }
        if !t.is_finite() {
            tracing::warn!(t, "ignoring non-finite source time update");
            return Vec::new();
        }
        self.sync.on_source_time_update(t);
        self.tick(t)
    }

    /// Derived surface time update; never propagated.
    pub fn on_derived_time_update(&self, t: f64) {
        self.sync.on_derived_time_update(t);
    }

    /// Source surface failed. The timeline keeps running on a simulated clock.
    pub fn on_source_error(&mut self, message: &str) {
        if self.torn_down {
            return;
        }
        tracing::warn!(message, "source media error; switching to simulated clock");
        self.media_failed(CueError::media(message));
    }

    /// Advance the simulated clock by `dt` seconds while playing.
    pub fn advance_simulated(&mut self, dt: f64) -> Vec<Command> {
        if self.torn_down || self.clock != Clock::Simulated || !self.controller.is_playing() {
            return Vec::new();
        }
        if !dt.is_finite() {
            tracing::warn!(dt, "ignoring non-finite simulated step");
            return Vec::new();
        }
        let t = self.controller.current_time() + dt.max(0.0);
        self.sync.on_source_time_update(t);
        self.tick(t)
    }

    /// Replace the media reference of the current section, keeping position and play state.
    pub fn swap_media(&mut self, reference: &str) -> CueResult<()> {
        if self.torn_down {
            return Ok(());
        }
        let url = self.resolver.resolve(reference)?;
        self.sync.swap_source(&url);
        self.sync.seek(self.controller.current_time());
        self.media = Some(reference.to_owned());
        self.clock = Clock::Source;
        self.sync_transport();
        Ok(())
    }

    /// Runtime state snapshot.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_time: self.controller.current_time(),
            is_playing: self.controller.is_playing(),
            paused_by: self.controller.paused_by(),
            active_transform: self.frame.rendered(),
            active_overlay_ids: self.dispatcher.active().clone(),
        }
    }

    /// Transform and visible overlays for the rendering layer.
    pub fn render_view(&self) -> RenderView {
        RenderView::build(
            &self.dispatcher,
            &self.index,
            &self.controller,
            self.frame.rendered(),
        )
    }

    fn load_media(&mut self, reference: &str) {
        match self.resolver.resolve(reference) {
            Ok(url) => {
                self.sync.swap_source(&url);
                self.clock = Clock::Source;
            }
            Err(e) => {
                tracing::warn!(error = %e, reference, "media reference unresolvable");
                self.media_failed(CueError::media(format!("cannot play '{reference}': {e}")));
            }
        }
    }

    fn media_failed(&mut self, err: CueError) {
        self.notices.push(Notice {
            kind: NoticeKind::MediaError,
            message: err.to_string(),
            retryable: err.is_transient(),
        });
        self.clock = Clock::Simulated;
    }

    fn tick(&mut self, t: f64) -> Vec<Command> {
        let t = t.clamp(0.0, self.controller.duration());
        if self.dispatcher.last_time().is_some_and(|prev| t < prev) {
            tracing::debug!(t, "time moved backward without a seek");
            self.controller.seek(t);
            return self.jump(t);
        }

        self.controller.advance_to(t);
        let cmds = self.dispatcher.tick(t, &self.index);
        let mut target = DispatchTarget {
            controller: &mut self.controller,
            frame: &mut self.frame,
            catalog: &self.catalog,
            now: t,
        };
        self.dispatcher.execute_all(&cmds, &mut target);
        self.frame.update(t);
        self.sync_transport();
        cmds
    }

    /// Recompute active overlays and snap the frame for `t`.
    fn jump(&mut self, t: f64) -> Vec<Command> {
        let cmds = self.dispatcher.seek(t, &self.index);
        match self.catalog.config_at(t, &self.index) {
            Some(c) => self.frame.snap(FrameTransform::from(c), Some(c.id)),
            None => self.frame.snap(FrameTransform::IDENTITY, None),
        }
        cmds
    }

    fn sync_transport(&mut self) {
        match (self.controller.is_playing(), self.sync.source().is_playing()) {
            (true, false) => self.sync.play(),
            (false, true) => self.sync.pause(),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/playback_session.rs"]
mod tests;
