use std::collections::BTreeSet;

use crate::{
    dispatch::command::Command,
    foundation::core::OverlayId,
    frame::{catalog::FrameCatalog, engine::FrameTransformEngine},
    playback::{controller::PlaybackController, state::PausedBy},
    scene::overlay::Overlay,
    timeline::index::OverlayIndex,
};

/// Mutable state that dispatched commands act on.
pub struct DispatchTarget<'a> {
    /// Transport state machine.
    pub controller: &'a mut PlaybackController,
    /// Frame transform state machine.
    pub frame: &'a mut FrameTransformEngine,
    /// Frame configurations resolvable by `SetFrame`.
    pub catalog: &'a FrameCatalog,
    /// Playback time the commands are executed at.
    pub now: f64,
}

/// Turns playback ticks into commands and applies them.
///
/// Ticks are expected to be monotonic. A tick that moves backward is handled as a seek: the
/// active set is recomputed and no actions fire.
#[derive(Clone, Debug, Default)]
pub struct ActionDispatcher {
    active: BTreeSet<OverlayId>,
    last_time: Option<f64>,
    fire_crossed: bool,
    modals: BTreeSet<OverlayId>,
    blocking: BTreeSet<OverlayId>,
}

impl ActionDispatcher {
    /// Create a dispatcher that has not seen any tick yet.
    pub fn new(fire_crossed_triggers: bool) -> Self {
        Self {
            fire_crossed: fire_crossed_triggers,
            ..Self::default()
        }
    }

    /// Overlays currently shown.
    pub fn active(&self) -> &BTreeSet<OverlayId> {
        &self.active
    }

    /// Time of the last tick or seek.
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// Overlays currently presented as modals.
    pub fn modals(&self) -> &BTreeSet<OverlayId> {
        &self.modals
    }

    /// Return `true` when `id` asked for a blocking presentation that has not been dismissed.
    pub fn is_blocking(&self, id: OverlayId) -> bool {
        self.blocking.contains(&id)
    }

    /// Forget everything, as if no tick had been seen.
    pub fn reset(&mut self) {
        self.active.clear();
        self.modals.clear();
        self.blocking.clear();
        self.last_time = None;
    }

    /// Process a playback tick at `t`.
    ///
    /// Hides come first, then every overlay triggered since the previous tick in `(time, id)`
    /// order: a `Show` when it is active at `t`, followed by its actions. Overlays whose whole
    /// window was crossed between two ticks fire their actions without a `Show` when crossed
    /// triggers are enabled. The first tick after construction or [`reset`](Self::reset) only
    /// activates what is active at `t`.
    pub fn tick(&mut self, t: f64, index: &OverlayIndex) -> Vec<Command> {
        if !t.is_finite() {
            tracing::warn!(t, "ignoring non-finite tick");
            return Vec::new();
        }
        let prev = match self.last_time {
            Some(prev) if t < prev => {
                tracing::debug!(prev, t, "backward tick treated as seek");
                return self.seek(t, index);
            }
            Some(prev) => prev,
            None => t,
        };

        let now_active: BTreeSet<OverlayId> = index.active_at(t).iter().map(|o| o.id).collect();
        let mut out: Vec<Command> = self
            .active
            .difference(&now_active)
            .map(|&overlay| Command::Hide { overlay })
            .collect();

        let mut fired: Vec<&Overlay> = now_active
            .difference(&self.active)
            .filter_map(|&id| index.get(id))
            .collect();
        if self.fire_crossed {
            fired.extend(
                index
                    .triggers_between(prev, t)
                    .filter(|o| !now_active.contains(&o.id) && !self.active.contains(&o.id)),
            );
        }
        fired.sort_by(|a, b| {
            a.time_stamp
                .total_cmp(&b.time_stamp)
                .then_with(|| a.id.cmp(&b.id))
        });

        for o in fired {
            if now_active.contains(&o.id) {
                out.push(Command::Show { overlay: o.id });
            } else {
                tracing::debug!(overlay = %o.id, "crossed trigger");
            }
            out.extend(o.actions.iter().copied().map(Command::from));
        }

        self.active = now_active;
        self.last_time = Some(t);
        out
    }

    /// Jump to `t`: recompute the active set and emit only `Show`/`Hide`.
    ///
    /// Skipped triggers never fire, and modals of overlays no longer active are dropped.
    pub fn seek(&mut self, t: f64, index: &OverlayIndex) -> Vec<Command> {
        if !t.is_finite() {
            tracing::warn!(t, "ignoring non-finite seek");
            return Vec::new();
        }
        let now_active: BTreeSet<OverlayId> = index.active_at(t).iter().map(|o| o.id).collect();
        let mut out: Vec<Command> = self
            .active
            .difference(&now_active)
            .map(|&overlay| Command::Hide { overlay })
            .collect();
        out.extend(
            now_active
                .difference(&self.active)
                .map(|&overlay| Command::Show { overlay }),
        );
        tracing::debug!(t, shown = now_active.len(), "active set recomputed");
        self.active = now_active;
        self.last_time = Some(t);
        self.modals.retain(|id| self.active.contains(id));
        self.blocking.retain(|id| self.active.contains(id));
        out
    }

    /// Apply one command. Returns `true` when it changed any state.
    pub fn execute(&mut self, cmd: Command, target: &mut DispatchTarget<'_>) -> bool {
        match cmd {
            Command::Hide { overlay } => {
                let modal = self.modals.remove(&overlay);
                let blocking = self.blocking.remove(&overlay);
                modal || blocking
            }
            Command::Show { .. } => false,
            Command::SetFrame { config } => match target.catalog.resolve_target(config) {
                Some(c) => {
                    let before = target.frame.config();
                    target
                        .frame
                        .set_target(c, target.catalog.ease_for(c), target.now);
                    before != target.frame.config()
                }
                None => {
                    tracing::warn!(%config, "frame_set target missing or inactive; ignored");
                    false
                }
            },
            Command::OverlayPause { owner, blocking } => {
                let changed = target.controller.overlay_pause(owner);
                if blocking && target.controller.paused_by() == PausedBy::Overlay(owner) {
                    self.blocking.insert(owner);
                }
                changed
            }
            Command::OverlayResume { owner, dismiss } => {
                let changed = target.controller.overlay_resume(owner);
                if changed && dismiss {
                    self.blocking.remove(&owner);
                }
                changed
            }
            Command::ShowFullscreen { target: id } => self.modals.insert(id),
        }
    }

    /// Apply commands in order. Returns `true` when any of them changed state.
    pub fn execute_all(&mut self, cmds: &[Command], target: &mut DispatchTarget<'_>) -> bool {
        cmds.iter()
            .fold(false, |changed, &cmd| self.execute(cmd, target) || changed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/dispatcher.rs"]
mod tests;
