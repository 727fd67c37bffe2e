use serde::{Deserialize, Serialize};
use std::fmt;

use super::request::MoveRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// The whole remaining request landed at its destination.
    Full,
    /// Only part of the request landed; fragments cover the rest.
    Partial,
    /// The request was parked in staging space.
    Indirect,
}

impl MoveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::Full => "full",
            MoveKind::Partial => "partial",
            MoveKind::Indirect => "indirect",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomically performable relocation emitted by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub from_set: String,
    pub from_start: u64,
    pub to_set: String,
    pub to_start: u64,
    pub size: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MoveKind,
}

impl MoveCommand {
    pub fn from_end(&self) -> u64 {
        self.from_start + self.size
    }

    pub fn to_end(&self) -> u64 {
        self.to_start + self.size
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' {}[{}, {}) -> {}[{}, {})",
            self.kind,
            self.name,
            self.from_set,
            self.from_start,
            self.from_end(),
            self.to_set,
            self.to_start,
            self.to_end()
        )
    }
}

/// Result of trying one move mechanism on one request.
///
/// The request is consumed; every variant hands back whatever is left of it
/// so nothing is lost between queues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Landed (fully or partly) at the destination. `fragments` are the
    /// uncovered pieces still to be placed.
    Direct {
        command: MoveCommand,
        fragments: Vec<MoveRequest>,
    },
    /// Parked in staging space. `staged` is the request at its new
    /// position; `fragments` is any remainder that did not fit.
    Indirect {
        command: MoveCommand,
        staged: MoveRequest,
        fragments: Vec<MoveRequest>,
    },
    /// The mechanism does not apply right now; request unchanged.
    Deferred(MoveRequest),
    /// No placement exists for the request; request unchanged.
    Failed(MoveRequest),
}

impl MoveOutcome {
    pub fn command(&self) -> Option<&MoveCommand> {
        match self {
            MoveOutcome::Direct { command, .. } | MoveOutcome::Indirect { command, .. } => {
                Some(command)
            }
            MoveOutcome::Deferred(_) | MoveOutcome::Failed(_) => None,
        }
    }
}
