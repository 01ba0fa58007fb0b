//! cueplay is an overlay-driven playback engine for interactive video trainings.
//!
//! A section is a video timeline with time-triggered overlays (messages, links, content panels,
//! frame changes). The engine decides what is visible at any instant, who holds playback
//! paused, how the crop/zoom/pan frame is interpolated, and keeps an audible source surface and
//! a muted derived surface time-aligned.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `Section` JSON is validated into a `SectionSnapshot`, resolving action strings
//!    into typed [`OverlayAction`]s. Unknown data is dropped and recorded in a [`LoadReport`].
//! 2. **Index**: [`OverlayIndex`] sorts overlays by trigger time and answers active-window queries.
//! 3. **Dispatch**: on every time update, [`ActionDispatcher`] diffs the active set and emits
//!    [`Command`]s for [`PlaybackController`] and [`FrameTransformEngine`].
//! 4. **Render**: [`PlaybackSession::render_view`] hands the current transform and visible
//!    overlays to the host.
//!
//! Everything is synchronous and single-threaded. Surfaces are abstracted behind
//! [`PlaybackSurface`], with [`RecordingSurface`] as an in-memory implementation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod dispatch;
mod foundation;
mod frame;
mod playback;
mod scene;
mod session;
mod store;
mod sync;
mod timeline;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use dispatch::command::Command;
pub use dispatch::dispatcher::{ActionDispatcher, DispatchTarget};
pub use dispatch::view::{FULLSCREEN_POSITION, Presentation, RenderView, RenderedOverlay};
pub use foundation::core::{FrameConfigId, OverlayId, SectionId, TimeRange};
pub use foundation::error::{CueError, CueResult};
pub use foundation::media::MediaResolver;
pub use foundation::opts::{EngineOpts, SupersessionPolicy};
pub use frame::catalog::FrameCatalog;
pub use frame::engine::{FramePhase, FrameTransformEngine};
pub use frame::transform::FrameTransform;
pub use playback::controller::{ControlState, PlaybackController};
pub use playback::state::{PausedBy, PlaybackState};
pub use scene::model::{
    ActionDef, ActionValueDef, FrameConfig, OverlayRecord, OverlayType, SectionDef,
};
pub use scene::overlay::{ActionKind, LoadDiagnostic, LoadReport, Overlay, OverlayAction};
pub use scene::section::{Section, SectionSnapshot};
pub use session::playback_session::{
    Clock, LoadOutcome, LoadTicket, Notice, NoticeKind, PlaybackSession,
};
pub use store::memory::MemoryBackend;
pub use store::{FrameConfigRepository, OverlayRepository, SectionSource};
pub use sync::surface::{PlaybackSurface, RecordingSurface, SurfaceCall};
pub use sync::synchronizer::{DERIVED_VOLUME, DualSurfaceSynchronizer, SOURCE_VOLUME};
pub use timeline::authoring::{Timeline, TimelineEditor, TimelineMarker};
pub use timeline::index::OverlayIndex;
