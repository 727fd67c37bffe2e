use std::cmp::Reverse;
use std::collections::VecDeque;

use tracing::{debug, info};

use super::command::MoveOutcome;
use super::config::PlannerConfig;
use super::direct::{direct_move, overlap_score};
use super::indirect::indirect_move;
use super::observer::{Phase, PlanObserver, TracingObserver};
use super::outcome::PlanOutcome;
use super::request::MoveRequest;
use super::scheduler::SchedulerState;
use super::subdivide::subdivide_destinations;
use crate::engine::errors::PlanError;
use crate::engine::extent::NamedExtents;
use crate::shared::config::CONFIG;

/// Turns desired relocations into an ordered list of performable moves,
/// using only the free space described by the free collection.
#[derive(Debug, Clone)]
pub struct MovePlanner {
    config: PlannerConfig,
}

impl Default for MovePlanner {
    fn default() -> Self {
        Self::new(CONFIG.planner.clone())
    }
}

impl MovePlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(
        &self,
        requests: Vec<MoveRequest>,
        free: &mut NamedExtents,
        used: &mut NamedExtents,
    ) -> Result<PlanOutcome, PlanError> {
        self.plan_with_observer(requests, free, used, &mut TracingObserver)
    }

    /// Plans `requests` against `free`, seeding `used` with every request's
    /// current placement. Both collections are updated as moves are
    /// committed and describe the planned end state on return.
    pub fn plan_with_observer(
        &self,
        requests: Vec<MoveRequest>,
        free: &mut NamedExtents,
        used: &mut NamedExtents,
        observer: &mut dyn PlanObserver,
    ) -> Result<PlanOutcome, PlanError> {
        validate_sources(&requests, free)?;
        for req in &requests {
            used.add(&req.from_set, req.from_start, req.size);
        }

        let (unchanged, pending): (Vec<_>, Vec<_>) = requests
            .into_iter()
            .partition(|req| req.size == 0 || req.is_noop());

        let pending = if self.config.subdivide_destinations {
            subdivide_destinations(pending)
        } else {
            pending
        };

        info!(
            target: "planner::plan",
            requests = pending.len(),
            unchanged = unchanged.len(),
            "Planning moves"
        );

        let mut run = PlanRun {
            config: &self.config,
            free,
            used,
            observer,
            state: SchedulerState::new(self.config.max_idle_rounds),
            next_seq: 0,
            primary: Vec::new(),
            indirect: Vec::new(),
            missed: Vec::new(),
            outcome: PlanOutcome {
                unchanged,
                ..PlanOutcome::default()
            },
        };
        let primary: Vec<MoveRequest> = pending.into_iter().map(|req| run.stamp(req)).collect();
        run.primary = primary;
        run.execute()
    }
}

/// Plans with default settings.
pub fn plan_moves(
    requests: Vec<MoveRequest>,
    free: &mut NamedExtents,
    used: &mut NamedExtents,
) -> Result<PlanOutcome, PlanError> {
    MovePlanner::new(PlannerConfig::default()).plan(requests, free, used)
}

fn validate_sources(requests: &[MoveRequest], free: &NamedExtents) -> Result<(), PlanError> {
    let mut by_source: Vec<&MoveRequest> = requests.iter().filter(|r| r.size > 0).collect();
    by_source.sort_by(|a, b| (&a.from_set, a.from_start).cmp(&(&b.from_set, b.from_start)));

    for pair in by_source.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.from_set == b.from_set && b.from_start < a.from_end() {
            return Err(PlanError::OverlappingSources {
                first: a.name.clone(),
                second: b.name.clone(),
            });
        }
    }

    if let Some(req) = by_source
        .iter()
        .find(|r| free.is_used(&r.from_set, r.from_start, r.size))
    {
        return Err(PlanError::SourceMarkedFree {
            name: req.name.clone(),
        });
    }
    Ok(())
}

/// Mutable state of a single planning run.
struct PlanRun<'a> {
    config: &'a PlannerConfig,
    free: &'a mut NamedExtents,
    used: &'a mut NamedExtents,
    observer: &'a mut dyn PlanObserver,
    state: SchedulerState,
    next_seq: usize,
    primary: Vec<MoveRequest>,
    indirect: Vec<MoveRequest>,
    missed: Vec<MoveRequest>,
    outcome: PlanOutcome,
}

impl PlanRun<'_> {
    fn stamp(&mut self, mut req: MoveRequest) -> MoveRequest {
        req.seq = self.next_seq;
        self.next_seq += 1;
        req
    }

    fn execute(mut self) -> Result<PlanOutcome, PlanError> {
        while !self.primary.is_empty() {
            let round = self.state.begin_round();
            self.observer.on_round(round, self.primary.len());

            let mut progressed = self.direct_phase()?;
            if !progressed {
                progressed = self.indirect_phase()?;
            }

            if self.state.may_retry(progressed) {
                let mut requeue = std::mem::take(&mut self.indirect);
                requeue.append(&mut self.missed);
                self.primary = requeue;
                self.state.record_retry();
            } else {
                debug!(
                    target: "planner::plan",
                    round,
                    progressed,
                    rounds_without_direct = self.state.rounds_without_direct,
                    "Stopping: no further progress possible"
                );
            }
        }

        let mut failed = std::mem::take(&mut self.indirect);
        failed.append(&mut self.missed);
        self.outcome.failed_moves = failed;
        self.outcome.rounds = self.state.rounds;

        self.observer.on_finished(&self.outcome);
        Ok(self.outcome)
    }

    /// Drains the primary queue through the direct mechanism, best
    /// destination overlap first. Returns whether anything was committed.
    fn direct_phase(&mut self) -> Result<bool, PlanError> {
        let free = &*self.free;
        let mut scored: Vec<(u64, MoveRequest)> = std::mem::take(&mut self.primary)
            .into_iter()
            .map(|req| (overlap_score(&req, free), req))
            .collect();
        scored.sort_by_key(|(score, req)| (Reverse(*score), req.seq));

        let mut progressed = false;
        for (_, req) in scored {
            let outcome = direct_move(req, self.free, self.used)?;
            progressed |= self.absorb(Phase::Direct, outcome);
        }
        Ok(progressed)
    }

    /// Tries staging candidates smallest first and stops at the first
    /// success so the direct pass can react to the space it released.
    fn indirect_phase(&mut self) -> Result<bool, PlanError> {
        let mut candidates = std::mem::take(&mut self.indirect);
        candidates.sort_by_key(|req| (req.size, req.seq));
        let mut candidates = VecDeque::from(candidates);

        while let Some(req) = candidates.pop_front() {
            let outcome = indirect_move(req, self.free, self.used, self.config.min_fragment_size)?;
            if self.absorb(Phase::Indirect, outcome) {
                self.indirect.extend(candidates);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Routes a mechanism's outcome into the queues. Returns true when a
    /// command was committed.
    fn absorb(&mut self, phase: Phase, outcome: MoveOutcome) -> bool {
        match outcome {
            MoveOutcome::Direct { command, fragments } => {
                self.observer
                    .on_command(phase, &command, &*self.free, &*self.used);
                self.outcome.moves.push(command);
                self.state.record_direct();
                for fragment in fragments {
                    let fragment = self.stamp(fragment);
                    self.indirect.push(fragment);
                }
                true
            }
            MoveOutcome::Indirect {
                command,
                staged,
                fragments,
            } => {
                self.observer
                    .on_command(phase, &command, &*self.free, &*self.used);
                self.outcome.moves.push(command);
                self.indirect.push(staged);
                for fragment in fragments {
                    let fragment = self.stamp(fragment);
                    self.indirect.push(fragment);
                }
                true
            }
            MoveOutcome::Deferred(req) | MoveOutcome::Failed(req) => {
                self.observer.on_deferred(phase, &req);
                match phase {
                    Phase::Direct => self.indirect.push(req),
                    Phase::Indirect => self.missed.push(req),
                }
                false
            }
        }
    }
}
