/// Termination bookkeeping for the planning loop.
///
/// A round that commits anything counts as progress. Rounds that commit
/// only staging moves are idle; once more than `max_idle_rounds` of them
/// follow each other the loop stops and reports what is left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerState {
    pub rounds: usize,
    pub rounds_without_direct: usize,
    pub max_idle_rounds: usize,
}

impl SchedulerState {
    pub fn new(max_idle_rounds: usize) -> Self {
        Self {
            rounds: 0,
            rounds_without_direct: 0,
            max_idle_rounds,
        }
    }

    pub fn begin_round(&mut self) -> usize {
        self.rounds += 1;
        self.rounds
    }

    pub fn record_direct(&mut self) {
        self.rounds_without_direct = 0;
    }

    /// Whether deferred requests go back to the primary queue for another round.
    pub fn may_retry(&self, progressed: bool) -> bool {
        progressed && self.rounds_without_direct <= self.max_idle_rounds
    }

    pub fn record_retry(&mut self) {
        self.rounds_without_direct += 1;
    }
}
