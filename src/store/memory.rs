use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::{
    foundation::core::{FrameConfigId, OverlayId, SectionId, validate_secs},
    foundation::error::{CueError, CueResult},
    scene::model::{FrameConfig, OverlayRecord, SectionDef},
    scene::section::Section,
    store::{FrameConfigRepository, OverlayRepository, SectionSource},
};

#[derive(Clone, Debug, Default)]
struct SectionRecords {
    duration: f64,
    media: Option<String>,
    overlays: BTreeMap<OverlayId, OverlayRecord>,
    frame_configs: BTreeMap<FrameConfigId, FrameConfig>,
}

/// In-process implementation of every repository trait.
///
/// Ids are assigned from monotonically increasing counters shared by all sections. A one-shot
/// failure can be armed with [`MemoryBackend::fail_next`] to exercise transient-error paths.
#[derive(Debug)]
pub struct MemoryBackend {
    sections: BTreeMap<SectionId, SectionRecords>,
    globals: BTreeMap<FrameConfigId, FrameConfig>,
    next_overlay_id: u64,
    next_config_id: u64,
    pending_failure: RefCell<Option<String>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self {
            sections: BTreeMap::new(),
            globals: BTreeMap::new(),
            next_overlay_id: 1,
            next_config_id: 1,
            pending_failure: RefCell::new(None),
        }
    }

    /// Create (or replace) an empty section.
    pub fn insert_section(
        &mut self,
        section: SectionId,
        duration: f64,
        media: Option<String>,
    ) -> CueResult<()> {
        validate_secs(duration, "section duration")?;
        self.sections.insert(
            section,
            SectionRecords {
                duration,
                media,
                ..SectionRecords::default()
            },
        );
        Ok(())
    }

    /// Seed the backend from a full section definition, keeping its ids.
    pub fn import_section(&mut self, def: &SectionDef) -> CueResult<()> {
        Section::from_def(def.clone()).validate()?;
        let mut records = SectionRecords {
            duration: def.duration,
            media: def.media.clone(),
            ..SectionRecords::default()
        };
        let mut next_overlay_id = self.next_overlay_id;
        for o in &def.overlays {
            next_overlay_id = next_overlay_id.max(successor(o.id.0, "overlay")?);
            records.overlays.insert(o.id, o.clone());
        }
        let mut next_config_id = self.next_config_id;
        for c in def.frame_configs.iter().chain(&def.global_frame_configs) {
            next_config_id = next_config_id.max(successor(c.id.0, "frame config")?);
        }
        for c in &def.frame_configs {
            records.frame_configs.insert(c.id, c.clone());
        }
        for g in &def.global_frame_configs {
            self.globals.insert(g.id, g.clone());
        }
        self.next_overlay_id = next_overlay_id;
        self.next_config_id = next_config_id;
        self.sections.insert(def.id, records);
        Ok(())
    }

    /// Add a global template. The backend assigns the id.
    pub fn insert_global(&mut self, mut config: FrameConfig) -> CueResult<FrameConfig> {
        config.validate()?;
        config.id = self.alloc_config_id()?;
        config.source_global_config_id = None;
        self.globals.insert(config.id, config.clone());
        Ok(config)
    }

    /// Make the next repository call fail with a transient [`CueError::Load`].
    pub fn fail_next(&self, msg: impl Into<String>) {
        *self.pending_failure.borrow_mut() = Some(msg.into());
    }

    fn check_failure(&self) -> CueResult<()> {
        match self.pending_failure.borrow_mut().take() {
            Some(msg) => Err(CueError::load(msg)),
            None => Ok(()),
        }
    }

    fn alloc_config_id(&mut self) -> CueResult<FrameConfigId> {
        let id = self.next_config_id;
        self.next_config_id = successor(id, "frame config")?;
        Ok(FrameConfigId(id))
    }

    fn section(&self, section: SectionId) -> CueResult<&SectionRecords> {
        self.sections
            .get(&section)
            .ok_or_else(|| CueError::not_found(format!("section {section}")))
    }

    fn section_mut(&mut self, section: SectionId) -> CueResult<&mut SectionRecords> {
        self.sections
            .get_mut(&section)
            .ok_or_else(|| CueError::not_found(format!("section {section}")))
    }
}

impl OverlayRepository for MemoryBackend {
    fn list_overlays(&self, section: SectionId) -> CueResult<Vec<OverlayRecord>> {
        self.check_failure()?;
        Ok(self.section(section)?.overlays.values().cloned().collect())
    }

    fn create_overlay(
        &mut self,
        section: SectionId,
        mut record: OverlayRecord,
    ) -> CueResult<OverlayRecord> {
        self.check_failure()?;
        record.id = OverlayId(self.next_overlay_id);
        record.validate()?;
        let next = successor(record.id.0, "overlay")?;
        let s = self.section_mut(section)?;
        s.overlays.insert(record.id, record.clone());
        self.next_overlay_id = next;
        tracing::debug!(%section, overlay = %record.id, "overlay created");
        Ok(record)
    }

    fn update_overlay(
        &mut self,
        section: SectionId,
        record: OverlayRecord,
    ) -> CueResult<OverlayRecord> {
        self.check_failure()?;
        record.validate()?;
        let s = self.section_mut(section)?;
        let slot = s
            .overlays
            .get_mut(&record.id)
            .ok_or_else(|| CueError::not_found(format!("overlay {}", record.id)))?;
        *slot = record.clone();
        Ok(record)
    }

    fn delete_overlay(&mut self, section: SectionId, id: OverlayId) -> CueResult<()> {
        self.check_failure()?;
        let s = self.section_mut(section)?;
        s.overlays
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CueError::not_found(format!("overlay {id}")))
    }
}

impl FrameConfigRepository for MemoryBackend {
    fn list_frame_configs(&self, section: SectionId) -> CueResult<Vec<FrameConfig>> {
        self.check_failure()?;
        Ok(self.section(section)?.frame_configs.values().cloned().collect())
    }

    fn create_frame_config(
        &mut self,
        section: SectionId,
        mut config: FrameConfig,
    ) -> CueResult<FrameConfig> {
        self.check_failure()?;
        config.validate()?;
        self.section(section)?;
        config.id = self.alloc_config_id()?;
        let s = self.section_mut(section)?;
        ensure_single_default(s, &config)?;
        s.frame_configs.insert(config.id, config.clone());
        Ok(config)
    }

    fn update_frame_config(
        &mut self,
        section: SectionId,
        config: FrameConfig,
    ) -> CueResult<FrameConfig> {
        self.check_failure()?;
        config.validate()?;
        let s = self.section_mut(section)?;
        if !s.frame_configs.contains_key(&config.id) {
            return Err(CueError::not_found(format!("frame config {}", config.id)));
        }
        ensure_single_default(s, &config)?;
        s.frame_configs.insert(config.id, config.clone());
        Ok(config)
    }

    fn delete_frame_config(&mut self, section: SectionId, id: FrameConfigId) -> CueResult<()> {
        self.check_failure()?;
        let s = self.section_mut(section)?;
        s.frame_configs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CueError::not_found(format!("frame config {id}")))
    }

    fn list_global_frame_configs(&self) -> CueResult<Vec<FrameConfig>> {
        self.check_failure()?;
        Ok(self.globals.values().cloned().collect())
    }

    fn copy_global_to_section(
        &mut self,
        section: SectionId,
        global: FrameConfigId,
    ) -> CueResult<FrameConfig> {
        self.check_failure()?;
        let template = self
            .globals
            .get(&global)
            .cloned()
            .ok_or_else(|| CueError::not_found(format!("global frame config {global}")))?;
        self.section(section)?;

        let mut copy = template;
        copy.id = self.alloc_config_id()?;
        copy.source_global_config_id = Some(global);

        let s = self.section_mut(section)?;
        if copy.is_default && s.frame_configs.values().any(|c| c.is_default) {
            tracing::debug!(%section, %global, "section already has a default, copy is not default");
            copy.is_default = false;
        }
        s.frame_configs.insert(copy.id, copy.clone());
        Ok(copy)
    }
}

impl SectionSource for MemoryBackend {
    fn fetch_section(&self, section: SectionId) -> CueResult<Section> {
        self.check_failure()?;
        let s = self.section(section)?;
        Ok(Section::from_def(SectionDef {
            id: section,
            duration: s.duration,
            media: s.media.clone(),
            overlays: s.overlays.values().cloned().collect(),
            frame_configs: s.frame_configs.values().cloned().collect(),
            global_frame_configs: self.globals.values().cloned().collect(),
        }))
    }
}

fn ensure_single_default(s: &SectionRecords, config: &FrameConfig) -> CueResult<()> {
    if config.is_default
        && s
            .frame_configs
            .values()
            .any(|c| c.is_default && c.id != config.id)
    {
        return Err(CueError::validation("section already has a default frame config"));
    }
    Ok(())
}

/// Next id after `id`, or a validation error when the id space is exhausted.
fn successor(id: u64, what: &str) -> CueResult<u64> {
    id.checked_add(1)
        .ok_or_else(|| CueError::validation(format!("{what} id {id} leaves no room for new ids")))
}

#[cfg(test)]
#[path = "../../tests/unit/store/memory.rs"]
mod tests;
