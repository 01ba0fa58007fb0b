use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{FrameConfigId, SectionId, validate_secs};
use crate::foundation::error::{CueError, CueResult};
use crate::scene::model::{FrameConfig, SectionDef};
use crate::scene::overlay::{LoadDiagnostic, LoadReport, Overlay};

/// Section boundary object.
///
/// This is the JSON-facing representation delivered by the data service. It is validated and
/// converted into an immutable [`SectionSnapshot`] before a playback session uses it.
#[derive(Debug, Clone)]
pub struct Section {
    def: SectionDef,
}

impl Section {
    /// Wrap an already-deserialized definition.
    pub fn from_def(def: SectionDef) -> Self {
        Self { def }
    }

    /// Parse a section from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CueResult<Self> {
        let def: SectionDef = serde_json::from_reader(r)
            .map_err(|e| CueError::serde(format!("parse section JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a section from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CueResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CueError::load(format!("open section JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Underlying wire definition.
    pub fn def(&self) -> &SectionDef {
        &self.def
    }

    /// Validate record-level invariants and cross-record uniqueness.
    pub fn validate(&self) -> CueResult<()> {
        validate_secs(self.def.duration, "section duration")?;
        if self.def.duration == 0.0 {
            return Err(CueError::validation("section duration must be > 0"));
        }

        let mut seen = BTreeSet::new();
        for rec in &self.def.overlays {
            rec.validate()?;
            if !seen.insert(rec.id) {
                return Err(CueError::validation(format!(
                    "duplicate overlay id {} in section {}",
                    rec.id, self.def.id
                )));
            }
        }

        for (scope, configs) in [
            ("section", &self.def.frame_configs),
            ("global", &self.def.global_frame_configs),
        ] {
            let mut ids = BTreeSet::new();
            for c in configs {
                c.validate()?;
                if !ids.insert(c.id) {
                    return Err(CueError::validation(format!(
                        "duplicate {scope} frame config id {}",
                        c.id
                    )));
                }
            }
            let defaults = configs.iter().filter(|c| c.is_default).count();
            if defaults > 1 {
                return Err(CueError::validation(format!(
                    "at most one {scope} frame config may be the default (found {defaults})"
                )));
            }
        }
        Ok(())
    }

    /// Validate and resolve into an immutable playback snapshot.
    #[tracing::instrument(skip(self), fields(section = %self.def.id))]
    pub fn snapshot(&self) -> CueResult<SectionSnapshot> {
        self.validate()?;

        let mut report = LoadReport::default();
        let overlays = self
            .def
            .overlays
            .iter()
            .map(|rec| Overlay::from_record(rec, &mut report))
            .collect::<CueResult<Vec<_>>>()?;

        let known: BTreeSet<FrameConfigId> = self
            .def
            .frame_configs
            .iter()
            .chain(self.def.global_frame_configs.iter())
            .map(|c| c.id)
            .collect();
        for o in &overlays {
            if let Some(config) = o.frame_target()
                && !known.contains(&config)
            {
                report.push(LoadDiagnostic::DanglingFrameConfig {
                    overlay: o.id,
                    config,
                });
            }
        }

        tracing::debug!(
            overlays = overlays.len(),
            diagnostics = report.diagnostics.len(),
            "section snapshot built"
        );
        Ok(SectionSnapshot {
            id: self.def.id,
            duration: self.def.duration,
            media: self.def.media.clone(),
            overlays,
            frame_configs: self.def.frame_configs.clone(),
            global_frame_configs: self.def.global_frame_configs.clone(),
            report,
        })
    }
}

/// Validated, read-only view of one section used for the duration of a playback session.
#[derive(Clone, Debug)]
pub struct SectionSnapshot {
    /// Section id.
    pub id: SectionId,
    /// Total length in seconds.
    pub duration: f64,
    /// Unresolved media reference.
    pub media: Option<String>,
    /// Typed overlays in record order.
    pub overlays: Vec<Overlay>,
    /// Section-scoped frame configurations.
    pub frame_configs: Vec<FrameConfig>,
    /// Global templates.
    pub global_frame_configs: Vec<FrameConfig>,
    /// Non-fatal load diagnostics.
    pub report: LoadReport,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/section.rs"]
mod tests;
