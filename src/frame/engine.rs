use crate::{
    animation::{ease::Ease, lerp::Lerp},
    foundation::core::FrameConfigId,
    frame::transform::FrameTransform,
    scene::model::FrameConfig,
};

/// Observable phase of the frame engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePhase {
    /// Rendering a fixed configuration.
    Settled,
    /// Interpolating toward a target configuration.
    Transitioning,
}

#[derive(Clone, Debug)]
enum State {
    Settled {
        config: Option<FrameConfigId>,
    },
    Transitioning {
        from: FrameTransform,
        to: FrameTransform,
        target: FrameConfigId,
        started_at: f64,
        duration: f64,
        ease: Ease,
    },
}

/// Two-state machine computing the rendered frame transform over time.
///
/// A new target always starts from the transform rendered at the moment it arrives, so chained
/// transitions never jump. Seeks bypass interpolation through [`FrameTransformEngine::snap`].
#[derive(Clone, Debug)]
pub struct FrameTransformEngine {
    state: State,
    rendered: FrameTransform,
}

impl Default for FrameTransformEngine {
    fn default() -> Self {
        Self::new(FrameTransform::IDENTITY, None)
    }
}

impl FrameTransformEngine {
    /// Start settled at `initial`.
    pub fn new(initial: FrameTransform, config: Option<FrameConfigId>) -> Self {
        Self {
            state: State::Settled { config },
            rendered: initial,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FramePhase {
        match self.state {
            State::Settled { .. } => FramePhase::Settled,
            State::Transitioning { .. } => FramePhase::Transitioning,
        }
    }

    /// Configuration being rendered (settled) or approached (transitioning).
    pub fn config(&self) -> Option<FrameConfigId> {
        match self.state {
            State::Settled { config } => config,
            State::Transitioning { target, .. } => Some(target),
        }
    }

    /// Transform produced by the last [`update`](Self::update), [`set_target`](Self::set_target)
    /// or [`snap`](Self::snap).
    pub fn rendered(&self) -> FrameTransform {
        self.rendered
    }

    /// Begin a transition toward `config` at time `now`.
    ///
    /// Retargeting to the configuration already rendered or approached is a no-op.
    pub fn set_target(&mut self, config: &FrameConfig, ease: Ease, now: f64) {
        if self.config() == Some(config.id) {
            return;
        }
        let from = self.update(now);
        tracing::debug!(config = %config.id, now, "frame transition started");
        self.state = State::Transitioning {
            from,
            to: FrameTransform::from(config),
            target: config.id,
            started_at: now,
            duration: config.transition_duration,
            ease,
        };
    }

    /// Advance to `now` and return the rendered transform.
    pub fn update(&mut self, now: f64) -> FrameTransform {
        let State::Transitioning {
            from,
            to,
            target,
            started_at,
            duration,
            ease,
        } = self.state
        else {
            return self.rendered;
        };

        let progress = if duration > 0.0 {
            ((now - started_at) / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if progress >= 1.0 {
            self.rendered = to;
            self.state = State::Settled {
                config: Some(target),
            };
            tracing::debug!(config = %target, now, "frame transition settled");
        } else {
            self.rendered = FrameTransform::lerp(&from, &to, ease.apply(progress));
        }
        self.rendered
    }

    /// Jump straight to a settled transform, dropping any in-flight transition.
    pub fn snap(&mut self, transform: FrameTransform, config: Option<FrameConfigId>) {
        self.state = State::Settled { config };
        self.rendered = transform;
    }

    /// Freeze at the last rendered transform (used on teardown).
    pub fn cancel(&mut self) {
        if let State::Transitioning { target, .. } = self.state {
            tracing::debug!(config = %target, "frame transition cancelled");
            self.state = State::Settled { config: None };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/engine.rs"]
mod tests;
