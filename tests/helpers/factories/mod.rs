pub mod free_space_factory;
pub mod move_request_factory;
pub mod segment_factory;

pub use free_space_factory::FreeSpaceFactory;
pub use move_request_factory::MoveRequestFactory;
pub use segment_factory::SegmentFactory;

#[cfg(test)]
mod free_space_factory_test;
#[cfg(test)]
mod move_request_factory_test;
#[cfg(test)]
mod segment_factory_test;
