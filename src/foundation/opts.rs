use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::error::{CueError, CueResult};
use crate::foundation::media::MediaResolver;

/// Grouping rule deciding when a duration-less overlay stops being active.
///
/// An overlay without `duration` stays active until the next overlay of the same group starts (or
/// the section ends).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupersessionPolicy {
    /// Overlays sharing the same layout `position` supersede each other.
    #[default]
    Position,
    /// Overlays sharing the same overlay `type` supersede each other.
    Type,
}

/// Engine-wide options.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOpts {
    /// Supersession rule for duration-less overlays.
    pub supersession: SupersessionPolicy,
    /// Content-delivery base URL used to resolve storage keys.
    pub media_base_url: Option<String>,
    /// Fire actions of overlays whose whole window falls between two playback ticks.
    pub fire_crossed_triggers: bool,
    /// Easing used when a frame configuration names an unknown curve.
    pub default_easing: Ease,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            supersession: SupersessionPolicy::Position,
            media_base_url: None,
            fire_crossed_triggers: true,
            default_easing: Ease::Ease,
        }
    }
}

impl EngineOpts {
    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CueResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| CueError::config(format!("parse engine options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CueResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CueError::config(format!("open engine options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate option values.
    pub fn validate(&self) -> CueResult<()> {
        if let Some(base) = &self.media_base_url
            && !MediaResolver::is_absolute(base)
        {
            return Err(CueError::config("media_base_url must be an absolute http(s) URL"));
        }
        Ok(())
    }

    /// Build the media resolver configured by these options.
    pub fn media_resolver(&self) -> MediaResolver {
        MediaResolver::new(self.media_base_url.clone())
    }
}
