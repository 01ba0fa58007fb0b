use crate::{
    foundation::core::{FrameConfigId, OverlayId},
    foundation::error::CueResult,
    scene::model::{ActionDef, OverlayRecord, OverlayType},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Closed action vocabulary exchanged between overlay records and the dispatcher.
pub enum ActionKind {
    /// Apply a frame configuration.
    FrameSet,
    /// Pause playback on behalf of an overlay.
    PauseVideo,
    /// Resume playback paused by an overlay.
    ResumeVideo,
    /// Pause playback and present the overlay as blocking.
    PauseVideoOverlay,
    /// Resume playback and dismiss the blocking overlay.
    ResumeVideoOverlay,
    /// Present an overlay as a modal, independent of the pause state.
    ShowFullscreenContent,
}

impl ActionKind {
    /// Parse a vocabulary string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "frame_set" => Some(Self::FrameSet),
            "pause_video" => Some(Self::PauseVideo),
            "resume_video" => Some(Self::ResumeVideo),
            "pause_video_overlay" => Some(Self::PauseVideoOverlay),
            "resume_video_overlay" => Some(Self::ResumeVideoOverlay),
            "show_fullscreen_content" => Some(Self::ShowFullscreenContent),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
/// Typed action carried by an overlay, resolved at load time.
pub enum OverlayAction {
    /// Transition the frame to the referenced configuration.
    FrameSet {
        /// Target frame configuration.
        config: FrameConfigId,
    },
    /// Pause playback, owned by `owner`.
    Pause {
        /// Overlay that owns the pause.
        owner: OverlayId,
        /// Present the owner as blocking while paused.
        blocking: bool,
    },
    /// Resume playback if it is paused by `owner`.
    Resume {
        /// Overlay whose pause is released.
        owner: OverlayId,
        /// Also dismiss the owner's blocking presentation.
        dismiss: bool,
    },
    /// Present `target` as a fullscreen modal.
    ShowFullscreen {
        /// Overlay presented as modal.
        target: OverlayId,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Non-fatal problem found while loading a section.
pub enum LoadDiagnostic {
    /// Action string outside the vocabulary; the action was dropped.
    UnknownAction {
        /// Overlay carrying the action.
        overlay: OverlayId,
        /// Offending string.
        action: String,
    },
    /// Action that needs a value but has none (or an unparsable one); dropped.
    MissingActionValue {
        /// Overlay carrying the action.
        overlay: OverlayId,
        /// Action kind.
        action: ActionKind,
    },
    /// `frame_set` pointing at a configuration that does not exist; ignored at dispatch.
    DanglingFrameConfig {
        /// Overlay carrying the reference.
        overlay: OverlayId,
        /// Missing configuration id.
        config: FrameConfigId,
    },
}

/// Diagnostics collected while parsing a section.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    /// Diagnostics in record order.
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    /// Return `true` when nothing was dropped or flagged.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub(crate) fn push(&mut self, d: LoadDiagnostic) {
        tracing::warn!(diagnostic = ?d, "section load diagnostic");
        self.diagnostics.push(d);
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Read-only overlay used during playback.
pub struct Overlay {
    /// Stable identity.
    pub id: OverlayId,
    /// Trigger time in seconds.
    pub time_stamp: f64,
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
    /// Visible window length; `None` means until superseded.
    pub duration: Option<f64>,
    /// Icon name.
    pub icon: Option<String>,
    /// Effective actions in dispatch order.
    pub actions: Vec<OverlayAction>,
}

impl Overlay {
    /// Validate a wire record and resolve its effective actions.
    ///
    /// Dispatch order is: the frame change implied by a `frame_set` type, the implicit pause of
    /// `pauseOnShow`, then the explicit action. Unknown action strings are dropped and reported.
    pub fn from_record(rec: &OverlayRecord, report: &mut LoadReport) -> CueResult<Self> {
        rec.validate()?;

        let mut actions = Vec::with_capacity(2);
        if rec.kind == OverlayType::FrameSet {
            match rec.frame_config_ref {
                Some(config) => actions.push(OverlayAction::FrameSet { config }),
                None => report.push(LoadDiagnostic::MissingActionValue {
                    overlay: rec.id,
                    action: ActionKind::FrameSet,
                }),
            }
        }
        if rec.pause_on_show {
            actions.push(OverlayAction::Pause {
                owner: rec.id,
                blocking: false,
            });
        }
        if let Some(def) = &rec.action
            && let Some(action) = resolve_action(rec, def, report)
        {
            if let OverlayAction::FrameSet { .. } = action {
                // An explicit frame target replaces the one implied by `frameConfigRef`.
                actions.retain(|a| !matches!(a, OverlayAction::FrameSet { .. }));
                actions.insert(0, action);
            } else if !actions.contains(&action) {
                actions.push(action);
            }
        }

        Ok(Self {
            id: rec.id,
            time_stamp: rec.time_stamp,
            kind: rec.kind,
            caption: rec.caption.clone(),
            content_ref: rec.content_ref.clone(),
            style_ref: rec.style_ref.clone(),
            position: rec.position.clone(),
            duration: rec.duration,
            icon: rec.icon.clone(),
            actions,
        })
    }

    /// Frame configuration this overlay applies, if any.
    pub fn frame_target(&self) -> Option<FrameConfigId> {
        self.actions.iter().find_map(|a| match a {
            OverlayAction::FrameSet { config } => Some(*config),
            _ => None,
        })
    }
}

fn resolve_action(
    rec: &OverlayRecord,
    def: &ActionDef,
    report: &mut LoadReport,
) -> Option<OverlayAction> {
    let Some(kind) = ActionKind::parse(&def.action) else {
        report.push(LoadDiagnostic::UnknownAction {
            overlay: rec.id,
            action: def.action.clone(),
        });
        return None;
    };
    let value = def.value.as_ref().and_then(|v| v.as_id());
    if def.value.is_some() && value.is_none() {
        report.push(LoadDiagnostic::MissingActionValue {
            overlay: rec.id,
            action: kind,
        });
        return None;
    }
    let owner = OverlayId(value.unwrap_or(rec.id.0));

    match kind {
        ActionKind::FrameSet => {
            let Some(config) = value.map(FrameConfigId).or(rec.frame_config_ref) else {
                report.push(LoadDiagnostic::MissingActionValue {
                    overlay: rec.id,
                    action: kind,
                });
                return None;
            };
            Some(OverlayAction::FrameSet { config })
        }
        ActionKind::PauseVideo => Some(OverlayAction::Pause {
            owner,
            blocking: false,
        }),
        ActionKind::PauseVideoOverlay => Some(OverlayAction::Pause {
            owner,
            blocking: true,
        }),
        ActionKind::ResumeVideo => Some(OverlayAction::Resume {
            owner,
            dismiss: false,
        }),
        ActionKind::ResumeVideoOverlay => Some(OverlayAction::Resume {
            owner,
            dismiss: true,
        }),
        ActionKind::ShowFullscreenContent => Some(OverlayAction::ShowFullscreen { target: owner }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/overlay.rs"]
mod tests;
