pub mod extent_set;
pub mod interval;
pub mod named_extents;
pub mod policy;

pub use extent_set::ExtentSet;
pub use interval::{Interval, Overlap, PlacedExtent};
pub use named_extents::NamedExtents;
pub use policy::DevicePolicy;
