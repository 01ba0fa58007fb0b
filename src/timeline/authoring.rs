use crate::{
    foundation::core::{OverlayId, SectionId},
    foundation::error::{CueError, CueResult},
    foundation::opts::SupersessionPolicy,
    scene::model::OverlayRecord,
    scene::overlay::{LoadReport, Overlay},
    store::OverlayRepository,
    timeline::index::OverlayIndex,
};

/// Ordered view of one section's overlay records plus the section duration.
///
/// Derived from the repository and rebuilt after every authoring change.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Timeline {
    /// Section the records belong to.
    pub section: SectionId,
    /// Section length in seconds.
    pub duration: f64,
    /// Records ordered by `(time_stamp, id)`.
    pub overlays: Vec<OverlayRecord>,
}

/// Marker drawn on the authoring timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimelineMarker {
    /// Overlay id.
    pub id: OverlayId,
    /// Trigger time in seconds.
    pub time_stamp: f64,
    /// Trigger position as a percentage of the section duration.
    pub percent: f64,
}

impl Timeline {
    fn from_records(section: SectionId, duration: f64, mut overlays: Vec<OverlayRecord>) -> Self {
        overlays.sort_by(|a, b| {
            a.time_stamp
                .total_cmp(&b.time_stamp)
                .then_with(|| a.id.cmp(&b.id))
        });
        Self {
            section,
            duration,
            overlays,
        }
    }

    /// Marker positions for every record.
    pub fn markers(&self) -> Vec<TimelineMarker> {
        self.overlays
            .iter()
            .map(|o| TimelineMarker {
                id: o.id,
                time_stamp: o.time_stamp,
                percent: if self.duration > 0.0 {
                    (o.time_stamp / self.duration * 100.0).clamp(0.0, 100.0)
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// Build a playback index from the current records.
    pub fn index(&self, policy: SupersessionPolicy) -> CueResult<(OverlayIndex, LoadReport)> {
        let mut report = LoadReport::default();
        let overlays = self
            .overlays
            .iter()
            .map(|r| Overlay::from_record(r, &mut report))
            .collect::<CueResult<Vec<_>>>()?;
        Ok((OverlayIndex::build(&overlays, self.duration, policy), report))
    }
}

/// Visual editor state for placing, moving and deleting overlay trigger points.
///
/// The editor never patches its view in place: every mutation goes through the repository and
/// is followed by a full reload.
pub struct TimelineEditor<'r, R: OverlayRepository> {
    repo: &'r mut R,
    section: SectionId,
    duration: f64,
    snap_step: Option<f64>,
    timeline: Timeline,
}

impl<'r, R: OverlayRepository> TimelineEditor<'r, R> {
    /// Open the editor for a section of the given duration.
    pub fn open(repo: &'r mut R, section: SectionId, duration: f64) -> CueResult<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CueError::validation("timeline duration must be > 0"));
        }
        let records = repo.list_overlays(section)?;
        Ok(Self {
            repo,
            section,
            duration,
            snap_step: None,
            timeline: Timeline::from_records(section, duration, records),
        })
    }

    /// Current derived timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Snap authored times to multiples of `step` seconds (`None` disables snapping).
    pub fn set_snap(&mut self, step: Option<f64>) -> CueResult<()> {
        if let Some(s) = step
            && (!s.is_finite() || s <= 0.0)
        {
            return Err(CueError::validation("snap step must be > 0"));
        }
        self.snap_step = step;
        Ok(())
    }

    /// Place a new overlay at `record.time_stamp` (clamped and snapped). Returns the stored record.
    pub fn place(&mut self, mut record: OverlayRecord) -> CueResult<OverlayRecord> {
        record.time_stamp = self.author_time(record.time_stamp);
        let stored = self.repo.create_overlay(self.section, record)?;
        self.reload()?;
        Ok(stored)
    }

    /// Move an overlay's trigger point to `t` (clamped and snapped).
    pub fn move_to(&mut self, id: OverlayId, t: f64) -> CueResult<OverlayRecord> {
        let mut record = self.record(id)?.clone();
        record.time_stamp = self.author_time(t);
        let stored = self.repo.update_overlay(self.section, record)?;
        self.reload()?;
        Ok(stored)
    }

    /// Change (or clear) an overlay's visible duration.
    pub fn retime_duration(
        &mut self,
        id: OverlayId,
        duration: Option<f64>,
    ) -> CueResult<OverlayRecord> {
        let mut record = self.record(id)?.clone();
        record.duration = duration;
        let stored = self.repo.update_overlay(self.section, record)?;
        self.reload()?;
        Ok(stored)
    }

    /// Delete an overlay.
    pub fn delete(&mut self, id: OverlayId) -> CueResult<()> {
        self.repo.delete_overlay(self.section, id)?;
        self.reload()
    }

    /// Re-read every record from the repository.
    pub fn reload(&mut self) -> CueResult<()> {
        let records = self.repo.list_overlays(self.section)?;
        self.timeline = Timeline::from_records(self.section, self.duration, records);
        Ok(())
    }

    fn record(&self, id: OverlayId) -> CueResult<&OverlayRecord> {
        self.timeline
            .overlays
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| CueError::not_found(format!("overlay {id}")))
    }

    fn author_time(&self, t: f64) -> f64 {
        let t = if t.is_finite() { t } else { 0.0 };
        let t = match self.snap_step {
            Some(step) => (t / step).round() * step,
            None => t,
        };
        t.clamp(0.0, self.duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/authoring.rs"]
mod tests;
