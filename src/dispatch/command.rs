use crate::{
    foundation::core::{FrameConfigId, OverlayId},
    scene::overlay::OverlayAction,
};

/// Command emitted by the dispatcher for the controller, the frame engine or the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Stop rendering an overlay whose window ended.
    Hide {
        /// Overlay leaving the active set.
        overlay: OverlayId,
    },
    /// Start rendering an overlay whose window began.
    Show {
        /// Overlay entering the active set.
        overlay: OverlayId,
    },
    /// Transition the frame toward a configuration.
    SetFrame {
        /// Target configuration.
        config: FrameConfigId,
    },
    /// Pause on behalf of `owner`.
    OverlayPause {
        /// Overlay owning the pause.
        owner: OverlayId,
        /// Present the owner as blocking while it holds the pause.
        blocking: bool,
    },
    /// Resume if `owner` holds the pause.
    OverlayResume {
        /// Overlay releasing the pause.
        owner: OverlayId,
        /// Dismiss the owner's blocking presentation.
        dismiss: bool,
    },
    /// Present `target` as a modal.
    ShowFullscreen {
        /// Overlay presented as modal.
        target: OverlayId,
    },
}

impl From<OverlayAction> for Command {
    fn from(a: OverlayAction) -> Self {
        match a {
            OverlayAction::FrameSet { config } => Self::SetFrame { config },
            OverlayAction::Pause { owner, blocking } => Self::OverlayPause { owner, blocking },
            OverlayAction::Resume { owner, dismiss } => Self::OverlayResume { owner, dismiss },
            OverlayAction::ShowFullscreen { target } => Self::ShowFullscreen { target },
        }
    }
}
