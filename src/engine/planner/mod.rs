pub mod command;
pub mod commit;
pub mod config;
pub mod direct;
pub mod indirect;
pub mod observer;
pub mod outcome;
#[allow(clippy::module_inception)]
pub mod planner;
pub mod request;
pub mod scheduler;
pub mod subdivide;

pub use command::{MoveCommand, MoveKind, MoveOutcome};
pub use config::PlannerConfig;
pub use observer::{Phase, PlanEvent, PlanObserver, RecordingObserver, TracingObserver};
pub use outcome::PlanOutcome;
pub use planner::{MovePlanner, plan_moves};
pub use request::MoveRequest;
pub use scheduler::SchedulerState;
