use std::collections::HashMap;

use crate::{
    foundation::core::{FrameConfigId, OverlayId, TimeRange},
    foundation::opts::SupersessionPolicy,
    scene::model::OverlayType,
    scene::overlay::Overlay,
};

#[derive(Clone, Debug)]
struct IndexEntry {
    overlay: Overlay,
    /// Exclusive end of the active window, never past the section end.
    end: f64,
}

/// Time-sorted index over one section's overlays.
///
/// Entries are ordered by `(time_stamp, id)`. Every query binary-searches the start times and
/// then walks backward only while the running maximum of window ends can still cover `t`.
#[derive(Clone, Debug, Default)]
pub struct OverlayIndex {
    entries: Vec<IndexEntry>,
    /// `max_end[i]` is the largest `end` among `entries[..=i]`.
    max_end: Vec<f64>,
    by_id: HashMap<OverlayId, usize>,
    /// Positions of entries carrying a frame change, in index order.
    frame_sets: Vec<usize>,
    duration: f64,
    policy: SupersessionPolicy,
}

impl OverlayIndex {
    /// Build the index from an unordered overlay list. `O(n log n)`.
    #[tracing::instrument(skip(overlays), fields(n = overlays.len()))]
    pub fn build(overlays: &[Overlay], duration: f64, policy: SupersessionPolicy) -> Self {
        let mut sorted: Vec<Overlay> = overlays.to_vec();
        sorted.sort_by(|a, b| {
            a.time_stamp
                .total_cmp(&b.time_stamp)
                .then_with(|| a.id.cmp(&b.id))
        });

        let ends = supersession_ends(&sorted, duration, policy);
        let entries: Vec<IndexEntry> = sorted
            .into_iter()
            .zip(ends)
            .map(|(overlay, end)| IndexEntry { overlay, end })
            .collect();

        let mut max_end = Vec::with_capacity(entries.len());
        let mut running = f64::NEG_INFINITY;
        for e in &entries {
            running = running.max(e.end);
            max_end.push(running);
        }

        let by_id = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.overlay.id, i))
            .collect();
        let frame_sets = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.overlay.frame_target().is_some())
            .map(|(i, _)| i)
            .collect();

        Self {
            entries,
            max_end,
            by_id,
            frame_sets,
            duration,
            policy,
        }
    }

    /// Number of indexed overlays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the index holds no overlays.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Section duration the index was built for.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Supersession rule used for duration-less overlays.
    pub fn policy(&self) -> SupersessionPolicy {
        self.policy
    }

    /// Overlays in `(time_stamp, id)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.entries.iter().map(|e| &e.overlay)
    }

    /// Look up an overlay by id.
    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.by_id.get(&id).map(|&i| &self.entries[i].overlay)
    }

    /// Active window of an overlay. Windows end at the section duration at the latest.
    pub fn window(&self, id: OverlayId) -> Option<TimeRange> {
        let e = &self.entries[*self.by_id.get(&id)?];
        Some(TimeRange {
            start: e.overlay.time_stamp,
            end: e.end,
        })
    }

    /// All overlays whose window contains `t`, ordered by `(time_stamp, id)`.
    pub fn active_at(&self, t: f64) -> Vec<&Overlay> {
        let upper = self.upper_bound(t);
        let mut out = Vec::new();
        for i in (0..upper).rev() {
            if self.max_end[i] <= t {
                break;
            }
            let e = &self.entries[i];
            if t < e.end {
                out.push(&e.overlay);
            }
        }
        out.reverse();
        out
    }

    /// Overlay with the smallest `time_stamp` strictly greater than `t` (ties: lowest id).
    pub fn next_trigger_after(&self, t: f64) -> Option<&Overlay> {
        self.entries.get(self.upper_bound(t)).map(|e| &e.overlay)
    }

    /// Overlays triggering in the half-open interval `(after, upto]`, in index order.
    pub fn triggers_between(&self, after: f64, upto: f64) -> impl Iterator<Item = &Overlay> {
        let lo = self.upper_bound(after);
        let hi = self.upper_bound(upto).max(lo);
        self.entries[lo..hi].iter().map(|e| &e.overlay)
    }

    /// Frame configurations applied at or before `t`, latest first.
    ///
    /// Overlays sharing a trigger time yield the highest id first, so the frame change that
    /// dispatch would have applied last comes first.
    pub fn frame_targets_until(&self, t: f64) -> impl Iterator<Item = FrameConfigId> + '_ {
        let upper = self.frame_sets.partition_point(|&i| self.entries[i].overlay.time_stamp <= t);
        self.frame_sets[..upper]
            .iter()
            .rev()
            .filter_map(|&i| self.entries[i].overlay.frame_target())
    }

    fn upper_bound(&self, t: f64) -> usize {
        self.entries.partition_point(|e| e.overlay.time_stamp <= t)
    }
}

/// Compute window ends for overlays already sorted by `(time_stamp, id)`, clipped to
/// `[time_stamp, duration]`.
fn supersession_ends(sorted: &[Overlay], duration: f64, policy: SupersessionPolicy) -> Vec<f64> {
    let mut ends = vec![duration; sorted.len()];
    let mut next_start: HashMap<GroupKey<'_>, f64> = HashMap::new();

    // Walk runs of equal trigger time from the back so overlays sharing a start never supersede
    // each other.
    let mut hi = sorted.len();
    while hi > 0 {
        let t = sorted[hi - 1].time_stamp;
        let mut lo = hi - 1;
        while lo > 0 && sorted[lo - 1].time_stamp == t {
            lo -= 1;
        }
        for (o, end) in sorted[lo..hi].iter().zip(&mut ends[lo..hi]) {
            let raw = match o.duration {
                Some(d) => o.time_stamp + d,
                None => next_start
                    .get(&GroupKey::of(o, policy))
                    .copied()
                    .unwrap_or(duration),
            };
            *end = raw.min(duration).max(o.time_stamp);
        }
        for o in &sorted[lo..hi] {
            next_start.insert(GroupKey::of(o, policy), t);
        }
        hi = lo;
    }
    ends
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum GroupKey<'a> {
    Position(&'a str),
    Type(OverlayType),
}

impl<'a> GroupKey<'a> {
    /// Frame changes are not laid out on screen, so they only ever supersede each other.
    fn of(o: &'a Overlay, policy: SupersessionPolicy) -> Self {
        match policy {
            SupersessionPolicy::Position if o.kind.is_visual() => {
                Self::Position(o.position.as_str())
            }
            SupersessionPolicy::Position | SupersessionPolicy::Type => Self::Type(o.kind),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/index.rs"]
mod tests;
