//! Persistence seams for overlay and frame-configuration records.
//!
//! The data service is an external collaborator; these traits describe the request/response
//! surface the engine needs, and [`memory::MemoryBackend`] implements it in-process.

pub(crate) mod memory;

use crate::{
    foundation::core::{FrameConfigId, OverlayId, SectionId},
    foundation::error::CueResult,
    scene::model::{FrameConfig, OverlayRecord},
    scene::section::Section,
};

/// Overlay records of a section: list / create / update / delete.
pub trait OverlayRepository {
    /// All overlay records of a section, ordered by id.
    fn list_overlays(&self, section: SectionId) -> CueResult<Vec<OverlayRecord>>;

    /// Store a new record. The repository assigns the id; `record.id` is ignored.
    fn create_overlay(
        &mut self,
        section: SectionId,
        record: OverlayRecord,
    ) -> CueResult<OverlayRecord>;

    /// Replace an existing record (matched by `record.id`).
    fn update_overlay(
        &mut self,
        section: SectionId,
        record: OverlayRecord,
    ) -> CueResult<OverlayRecord>;

    /// Delete a record.
    fn delete_overlay(&mut self, section: SectionId, id: OverlayId) -> CueResult<()>;
}

/// Section-scoped frame configurations plus the global template catalog.
pub trait FrameConfigRepository {
    /// Section-scoped configurations, ordered by id.
    fn list_frame_configs(&self, section: SectionId) -> CueResult<Vec<FrameConfig>>;

    /// Store a new section-scoped configuration. The repository assigns the id.
    fn create_frame_config(
        &mut self,
        section: SectionId,
        config: FrameConfig,
    ) -> CueResult<FrameConfig>;

    /// Replace an existing section-scoped configuration.
    fn update_frame_config(
        &mut self,
        section: SectionId,
        config: FrameConfig,
    ) -> CueResult<FrameConfig>;

    /// Delete a section-scoped configuration.
    fn delete_frame_config(&mut self, section: SectionId, id: FrameConfigId) -> CueResult<()>;

    /// Global templates, ordered by id.
    fn list_global_frame_configs(&self) -> CueResult<Vec<FrameConfig>>;

    /// Duplicate a global template into a new section-scoped record tagged with its provenance.
    fn copy_global_to_section(
        &mut self,
        section: SectionId,
        global: FrameConfigId,
    ) -> CueResult<FrameConfig>;
}

/// Source of complete section snapshots for playback.
pub trait SectionSource {
    /// Fetch the section with all overlays and frame configurations.
    fn fetch_section(&self, section: SectionId) -> CueResult<Section>;
}
