pub use super::factories::{FreeSpaceFactory, MoveRequestFactory, SegmentFactory};

pub struct Factory;

impl Factory {
    pub fn move_request() -> MoveRequestFactory {
        MoveRequestFactory::new()
    }

    pub fn free_space() -> FreeSpaceFactory {
        FreeSpaceFactory::new()
    }

    pub fn segment() -> SegmentFactory {
        SegmentFactory::new()
    }

    pub fn free_segment() -> SegmentFactory {
        SegmentFactory::free()
    }
}
