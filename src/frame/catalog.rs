use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::core::FrameConfigId,
    frame::transform::FrameTransform,
    scene::model::FrameConfig,
    timeline::index::OverlayIndex,
};

/// Frame configurations visible to one section: its own records layered over global templates.
///
/// A section record overrides a global one with the same logical `name`.
#[derive(Clone, Debug, Default)]
pub struct FrameCatalog {
    section: BTreeMap<FrameConfigId, FrameConfig>,
    global: BTreeMap<FrameConfigId, FrameConfig>,
    default_ease: Ease,
}

impl FrameCatalog {
    /// Build from section-scoped and global records.
    pub fn new(section: &[FrameConfig], global: &[FrameConfig], default_ease: Ease) -> Self {
        Self {
            section: section.iter().map(|c| (c.id, c.clone())).collect(),
            global: global.iter().map(|c| (c.id, c.clone())).collect(),
            default_ease,
        }
    }

    /// Look up any configuration by id, section scope first.
    pub fn get(&self, id: FrameConfigId) -> Option<&FrameConfig> {
        self.section.get(&id).or_else(|| self.global.get(&id))
    }

    /// Look up by logical name; the section scope shadows the global scope.
    pub fn by_name(&self, name: &str) -> Option<&FrameConfig> {
        self.section
            .values()
            .find(|c| c.name == name)
            .or_else(|| self.global.values().find(|c| c.name == name))
    }

    /// Configuration a `frame_set` referencing `id` should apply.
    ///
    /// Inactive configs resolve to `None`. A reference to a global template resolves to the
    /// section override of the same name when one exists.
    pub fn resolve_target(&self, id: FrameConfigId) -> Option<&FrameConfig> {
        let found = if let Some(c) = self.section.get(&id) {
            c
        } else {
            let g = self.global.get(&id)?;
            if g.name.is_empty() {
                g
            } else {
                self.section
                    .values()
                    .find(|c| c.name == g.name)
                    .unwrap_or(g)
            }
        };
        found.is_active.then_some(found)
    }

    /// Active default configuration (section default first, then global default).
    pub fn default_config(&self) -> Option<&FrameConfig> {
        self.section
            .values()
            .find(|c| c.is_default && c.is_active)
            .or_else(|| self.global.values().find(|c| c.is_default && c.is_active))
    }

    /// Transform rendered when no `frame_set` applies.
    pub fn default_transform(&self) -> FrameTransform {
        self.default_config()
            .map(FrameTransform::from)
            .unwrap_or(FrameTransform::IDENTITY)
    }

    /// Configuration that is in force at `t`: the latest resolvable `frame_set` at or before `t`,
    /// else the default.
    pub fn config_at(&self, t: f64, index: &OverlayIndex) -> Option<&FrameConfig> {
        index
            .frame_targets_until(t)
            .find_map(|id| self.resolve_target(id))
            .or_else(|| self.default_config())
    }

    /// Easing for transitions into `config`.
    pub fn ease_for(&self, config: &FrameConfig) -> Ease {
        config.ease_or(self.default_ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/catalog.rs"]
mod tests;
