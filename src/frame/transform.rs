use crate::{animation::lerp::Lerp, scene::model::FrameConfig};

/// Rendered crop/zoom/pan values applied to the derived surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameTransform {
    /// Horizontal object position in percent.
    pub object_position_x: f64,
    /// Vertical object position in percent.
    pub object_position_y: f64,
    /// Zoom factor.
    pub scale: f64,
    /// Horizontal transform origin in percent.
    pub transform_origin_x: f64,
    /// Vertical transform origin in percent.
    pub transform_origin_y: f64,
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FrameTransform {
    /// Centered, unscaled framing.
    pub const IDENTITY: Self = Self {
        object_position_x: 50.0,
        object_position_y: 50.0,
        scale: 1.0,
        transform_origin_x: 50.0,
        transform_origin_y: 50.0,
    };
}

impl From<&FrameConfig> for FrameTransform {
    fn from(c: &FrameConfig) -> Self {
        Self {
            object_position_x: c.object_position_x,
            object_position_y: c.object_position_y,
            scale: c.scale,
            transform_origin_x: c.transform_origin_x,
            transform_origin_y: c.transform_origin_y,
        }
    }
}

impl Lerp for FrameTransform {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            object_position_x: f64::lerp(&a.object_position_x, &b.object_position_x, t),
            object_position_y: f64::lerp(&a.object_position_y, &b.object_position_y, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            transform_origin_x: f64::lerp(&a.transform_origin_x, &b.transform_origin_x, t),
            transform_origin_y: f64::lerp(&a.transform_origin_y, &b.transform_origin_y, t),
        }
    }
}
