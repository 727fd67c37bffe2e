use tracing::{debug, info, trace, warn};

use super::command::MoveCommand;
use super::outcome::PlanOutcome;
use super::request::MoveRequest;
use crate::engine::extent::NamedExtents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Direct,
    Indirect,
}

/// Hooks the scheduler calls as it plans. All methods default to no-ops.
pub trait PlanObserver {
    fn on_round(&mut self, _round: usize, _queued: usize) {}

    fn on_command(
        &mut self,
        _phase: Phase,
        _command: &MoveCommand,
        _free: &NamedExtents,
        _used: &NamedExtents,
    ) {
    }

    fn on_deferred(&mut self, _phase: Phase, _request: &MoveRequest) {}

    fn on_finished(&mut self, _outcome: &PlanOutcome) {}
}

/// Emits planner progress as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PlanObserver for TracingObserver {
    fn on_round(&mut self, round: usize, queued: usize) {
        debug!(target: "planner::schedule", round, queued, "Starting round");
    }

    fn on_command(
        &mut self,
        phase: Phase,
        command: &MoveCommand,
        free: &NamedExtents,
        used: &NamedExtents,
    ) {
        info!(target: "planner::schedule", phase = ?phase, "Moved {}", command);
        for set in free.iter() {
            trace!(target: "planner::schedule", device = set.device(), extents = ?set.intervals(), "Free");
        }
        for set in used.iter() {
            trace!(target: "planner::schedule", device = set.device(), extents = ?set.intervals(), "Used");
        }
    }

    fn on_deferred(&mut self, phase: Phase, request: &MoveRequest) {
        trace!(
            target: "planner::schedule",
            phase = ?phase,
            name = %request.name,
            size = request.size,
            "Deferred request"
        );
    }

    fn on_finished(&mut self, outcome: &PlanOutcome) {
        for req in &outcome.failed_moves {
            warn!(
                target: "planner::schedule",
                "Could not move {}[{}, {}) -> {}[{}, {})",
                req.from_set,
                req.from_start,
                req.from_end(),
                req.to_set,
                req.to_start,
                req.to_end()
            );
        }
        info!(
            target: "planner::schedule",
            moves = outcome.moves.len(),
            failed = outcome.failed_moves.len(),
            rounds = outcome.rounds,
            "Planning finished"
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEvent {
    Round { round: usize, queued: usize },
    Command { phase: Phase, command: MoveCommand },
    Deferred { phase: Phase, name: String },
    Finished { moves: usize, failed: usize },
}

/// Collects every callback, in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<PlanEvent>,
}

impl RecordingObserver {
    pub fn commands(&self) -> impl Iterator<Item = (Phase, &MoveCommand)> {
        self.events.iter().filter_map(|e| match e {
            PlanEvent::Command { phase, command } => Some((*phase, command)),
            _ => None,
        })
    }
}

impl PlanObserver for RecordingObserver {
    fn on_round(&mut self, round: usize, queued: usize) {
        self.events.push(PlanEvent::Round { round, queued });
    }

    fn on_command(
        &mut self,
        phase: Phase,
        command: &MoveCommand,
        _free: &NamedExtents,
        _used: &NamedExtents,
    ) {
        self.events.push(PlanEvent::Command {
            phase,
            command: command.clone(),
        });
    }

    fn on_deferred(&mut self, phase: Phase, request: &MoveRequest) {
        self.events.push(PlanEvent::Deferred {
            phase,
            name: request.name.clone(),
        });
    }

    fn on_finished(&mut self, outcome: &PlanOutcome) {
        self.events.push(PlanEvent::Finished {
            moves: outcome.moves.len(),
            failed: outcome.failed_moves.len(),
        });
    }
}
