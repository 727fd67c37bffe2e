use serde::Serialize;

use super::command::MoveCommand;
use super::request::MoveRequest;

/// Result of one planning run.
///
/// Every request handed to the planner ends up satisfied by `moves`, in
/// `unchanged` (nothing to do), or in `failed_moves`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanOutcome {
    pub moves: Vec<MoveCommand>,
    pub failed_moves: Vec<MoveRequest>,
    #[serde(skip)]
    pub unchanged: Vec<MoveRequest>,
    #[serde(skip)]
    pub rounds: usize,
}

impl PlanOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_moves.is_empty()
    }

    /// Units that could not be brought to their destination.
    pub fn remaining_size(&self) -> u64 {
        self.failed_moves.iter().map(|r| r.size).sum()
    }

    pub fn commands_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MoveCommand> + 'a {
        self.moves.iter().filter(move |m| m.name == name)
    }
}
