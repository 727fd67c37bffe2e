pub mod errors;
pub mod extent;
pub mod layout;
pub mod planner;
pub mod report;

pub use errors::*;
