#[allow(clippy::module_inception)]
pub mod layout;
pub mod snapshot;

pub use layout::Layout;
pub use snapshot::PlanSnapshot;
