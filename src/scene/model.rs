use crate::{
    animation::ease::Ease,
    foundation::core::{FrameConfigId, OverlayId, SectionId, validate_percent, validate_secs},
    foundation::error::{CueError, CueResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Authoring category of an overlay record.
pub enum OverlayType {
    /// Changes the visual frame (crop/zoom/pan) of the video surface.
    FrameSet,
    /// Button opening an external link.
    ButtonLink,
    /// Button showing a message.
    ButtonMessage,
    /// Button revealing a content panel.
    ButtonContent,
    /// Passive text label.
    Label,
    /// Content panel.
    Content,
    /// AI-chat prompt.
    LlmInteraction,
}

impl OverlayType {
    /// Wire name of this type.
    pub fn name(self) -> &'static str {
        match self {
            Self::FrameSet => "frame_set",
            Self::ButtonLink => "button_link",
            Self::ButtonMessage => "button_message",
            Self::ButtonContent => "button_content",
            Self::Label => "label",
            Self::Content => "content",
            Self::LlmInteraction => "llm_interaction",
        }
    }

    /// Return `true` for types that draw something on the derived surface.
    pub fn is_visual(self) -> bool {
        !matches!(self, Self::FrameSet)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Action payload as it appears on the wire: a number or a numeric string.
pub enum ActionValueDef {
    /// Numeric id.
    Id(u64),
    /// Stringly-typed id, parsed at load time.
    Text(String),
}

impl ActionValueDef {
    /// Parse the payload as a numeric record id.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            Self::Id(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Untyped action attached to an overlay record.
pub struct ActionDef {
    /// Action vocabulary string (`pause_video`, `frame_set`, ...).
    pub action: String,
    /// Optional frame-config id or overlay id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ActionValueDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single overlay trigger record, as stored by the data service.
pub struct OverlayRecord {
    /// Stable identity, unique within the section.
    pub id: OverlayId,
    /// Trigger time in seconds.
    pub time_stamp: f64,
    /// Authoring category.
    #[serde(rename = "type")]
    pub kind: OverlayType,
    /// Display caption.
    #[serde(default)]
    pub caption: String,
    /// Reference to content shown by the overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ref: Option<String>,
    /// Reference to a style preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_ref: Option<String>,
    /// Frame configuration applied by `frame_set` overlays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_config_ref: Option<FrameConfigId>,
    /// Layout slot (named screen region or `fullscreen`).
    #[serde(default = "default_position")]
    pub position: String,
    /// Seconds the overlay stays visible; absent means until superseded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Pause playback when the overlay appears.
    #[serde(default)]
    pub pause_on_show: bool,
    /// Icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Explicit action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDef>,
}

fn default_position() -> String {
    "center".to_owned()
}

impl OverlayRecord {
    /// Minimal record of the given type at `time_stamp`.
    pub fn new(id: OverlayId, time_stamp: f64, kind: OverlayType) -> Self {
        Self {
            id,
            time_stamp,
            kind,
            caption: String::new(),
            content_ref: None,
            style_ref: None,
            frame_config_ref: None,
            position: default_position(),
            duration: None,
            pause_on_show: false,
            icon: None,
            action: None,
        }
    }

    /// Validate field invariants that do not depend on other records.
    pub fn validate(&self) -> CueResult<()> {
        validate_secs(self.time_stamp, &format!("overlay {} timeStamp", self.id))?;
        if let Some(d) = self.duration
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(CueError::validation(format!(
                "overlay {} duration must be finite and > 0",
                self.id
            )));
        }
        if self.position.trim().is_empty() {
            return Err(CueError::validation(format!(
                "overlay {} position must be non-empty",
                self.id
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A named visual transform (crop/zoom/pan) applied to the derived surface.
pub struct FrameConfig {
    /// Record id.
    pub id: FrameConfigId,
    /// Logical name; a section config overrides a global one with the same name.
    #[serde(default)]
    pub name: String,
    /// Horizontal object position in percent.
    pub object_position_x: f64,
    /// Vertical object position in percent.
    pub object_position_y: f64,
    /// Zoom factor, `> 0`.
    pub scale: f64,
    /// Horizontal transform origin in percent.
    pub transform_origin_x: f64,
    /// Vertical transform origin in percent.
    pub transform_origin_y: f64,
    /// Transition length in seconds, `> 0`.
    pub transition_duration: f64,
    /// Named easing curve.
    #[serde(default = "default_easing_name")]
    pub transition_easing: String,
    /// Used when no `frame_set` overlay applies.
    #[serde(default)]
    pub is_default: bool,
    /// Inactive configs are ignored by `frame_set`.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Global template this config was copied from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_global_config_id: Option<FrameConfigId>,
}

fn default_easing_name() -> String {
    Ease::Ease.name().to_owned()
}

fn default_true() -> bool {
    true
}

impl FrameConfig {
    /// Identity framing: centered, unscaled.
    pub fn identity(id: FrameConfigId) -> Self {
        Self {
            id,
            name: "identity".to_owned(),
            object_position_x: 50.0,
            object_position_y: 50.0,
            scale: 1.0,
            transform_origin_x: 50.0,
            transform_origin_y: 50.0,
            transition_duration: 0.5,
            transition_easing: default_easing_name(),
            is_default: false,
            is_active: true,
            source_global_config_id: None,
        }
    }

    /// Validate numeric ranges.
    pub fn validate(&self) -> CueResult<()> {
        let id = self.id;
        validate_percent(self.object_position_x, &format!("frame config {id} objectPositionX"))?;
        validate_percent(self.object_position_y, &format!("frame config {id} objectPositionY"))?;
        validate_percent(
            self.transform_origin_x,
            &format!("frame config {id} transformOriginX"),
        )?;
        validate_percent(
            self.transform_origin_y,
            &format!("frame config {id} transformOriginY"),
        )?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(CueError::validation(format!(
                "frame config {id} scale must be finite and > 0"
            )));
        }
        if !self.transition_duration.is_finite() || self.transition_duration <= 0.0 {
            return Err(CueError::validation(format!(
                "frame config {id} transitionDuration must be finite and > 0"
            )));
        }
        Ok(())
    }

    /// Resolve the named easing curve, falling back to `fallback` for unknown names.
    pub fn ease_or(&self, fallback: Ease) -> Ease {
        match Ease::from_name(&self.transition_easing) {
            Some(e) => e,
            None => {
                tracing::warn!(
                    config = %self.id,
                    easing = %self.transition_easing,
                    "unknown transition easing, using fallback"
                );
                fallback
            }
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One training section as delivered by the data service: media, overlays and frame configs.
pub struct SectionDef {
    /// Section id.
    pub id: SectionId,
    /// Total section length in seconds.
    pub duration: f64,
    /// Video reference (absolute URL or storage key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Overlay records in arbitrary order.
    #[serde(default)]
    pub overlays: Vec<OverlayRecord>,
    /// Section-scoped frame configurations.
    #[serde(default)]
    pub frame_configs: Vec<FrameConfig>,
    /// Global frame-config templates visible to this section.
    #[serde(default)]
    pub global_frame_configs: Vec<FrameConfig>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
