use std::fmt;

use crate::foundation::error::{CueError, CueResult};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Stable identity of an overlay record, unique within its section.
    OverlayId
);
record_id!(
    /// Stable identity of a frame configuration (section-scoped or global).
    FrameConfigId
);
record_id!(
    /// Identity of a training section (one video timeline).
    SectionId
);

/// Half-open time interval `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Inclusive start in seconds.
    pub start: f64,
    /// Exclusive end in seconds.
    pub end: f64,
}

impl TimeRange {
    /// Create a validated range with finite bounds and `start <= end`.
    pub fn new(start: f64, end: f64) -> CueResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(CueError::validation("TimeRange bounds must be finite"));
        }
        if start > end {
            return Err(CueError::validation("TimeRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Length of the range in seconds.
    pub fn len_secs(self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Return `true` when the range is empty.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Return `true` when `t` is inside `[start, end)`.
    pub fn contains(self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

/// Validate that `t` is a finite, non-negative number of seconds.
pub(crate) fn validate_secs(t: f64, field: &str) -> CueResult<()> {
    if !t.is_finite() || t < 0.0 {
        return Err(CueError::validation(format!("{field} must be finite and >= 0")));
    }
    Ok(())
}

/// Validate a percentage in `[0, 100]`.
pub(crate) fn validate_percent(v: f64, field: &str) -> CueResult<()> {
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(CueError::validation(format!("{field} must be within [0, 100]")));
    }
    Ok(())
}
