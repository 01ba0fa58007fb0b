use crate::{
    dispatch::dispatcher::ActionDispatcher,
    foundation::core::OverlayId,
    frame::transform::FrameTransform,
    playback::{controller::PlaybackController, state::PausedBy},
    scene::{model::OverlayType, overlay::Overlay},
    timeline::index::OverlayIndex,
};

/// Layout slot that always renders as a modal.
pub const FULLSCREEN_POSITION: &str = "fullscreen";

/// How the rendering layer should present a visible overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    /// In its layout slot, over the video.
    Inline,
    /// As a modal, independent of the pause state.
    Fullscreen,
    /// As a modal holding the pause it issued.
    Blocking,
}

/// One overlay as handed to the rendering layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderedOverlay {
    /// Overlay identity.
    pub id: OverlayId,
    /// Authoring category.
    pub kind: OverlayType,
    /// Display caption.
    pub caption: String,
    /// Content reference.
    pub content_ref: Option<String>,
    /// Style reference.
    pub style_ref: Option<String>,
    /// Layout slot.
    pub position: String,
    /// Icon name.
    pub icon: Option<String>,
    /// Presentation mode.
    pub presentation: Presentation,
}

/// Everything the rendering layer needs for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderView {
    /// Playhead position in seconds.
    pub time: f64,
    /// Transform for the derived surface.
    pub transform: FrameTransform,
    /// Visible overlays in `(time_stamp, id)` order.
    pub overlays: Vec<RenderedOverlay>,
}

impl RenderView {
    /// Assemble the view from the dispatcher's active set.
    ///
    /// `frame_set` overlays drive the transform only and are never listed.
    pub fn build(
        dispatcher: &ActionDispatcher,
        index: &OverlayIndex,
        controller: &PlaybackController,
        transform: FrameTransform,
    ) -> Self {
        let mut visible: Vec<&Overlay> = dispatcher
            .active()
            .iter()
            .filter_map(|&id| index.get(id))
            .filter(|o| o.kind.is_visual())
            .collect();
        visible.sort_by(|a, b| {
            a.time_stamp
                .total_cmp(&b.time_stamp)
                .then_with(|| a.id.cmp(&b.id))
        });

        let overlays = visible
            .into_iter()
            .map(|o| RenderedOverlay {
                id: o.id,
                kind: o.kind,
                caption: o.caption.clone(),
                content_ref: o.content_ref.clone(),
                style_ref: o.style_ref.clone(),
                position: o.position.clone(),
                icon: o.icon.clone(),
                presentation: presentation_of(o, dispatcher, controller),
            })
            .collect();

        Self {
            time: controller.current_time(),
            transform,
            overlays,
        }
    }
}

fn presentation_of(
    o: &Overlay,
    dispatcher: &ActionDispatcher,
    controller: &PlaybackController,
) -> Presentation {
    if dispatcher.is_blocking(o.id) && controller.paused_by() == PausedBy::Overlay(o.id) {
        Presentation::Blocking
    } else if dispatcher.modals().contains(&o.id) || o.position == FULLSCREEN_POSITION {
        Presentation::Fullscreen
    } else {
        Presentation::Inline
    }
}
