use serde::{Deserialize, Serialize};

/// Half-open range `[start, start + size)` on a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: u64,
    pub size: u64,
}

impl Interval {
    pub fn new(start: u64, size: u64) -> Self {
        Self { start, size }
    }

    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    /// True when both ranges share at least one unit.
    pub fn overlaps(&self, start: u64, size: u64) -> bool {
        start < self.end() && start + size > self.start
    }

    pub fn contains_range(&self, start: u64, size: u64) -> bool {
        start >= self.start && start + size <= self.end()
    }
}

/// An interval tagged with the device it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedExtent {
    pub device: String,
    pub start: u64,
    pub size: u64,
}

impl PlacedExtent {
    pub fn new(device: impl Into<String>, start: u64, size: u64) -> Self {
        Self {
            device: device.into(),
            start,
            size,
        }
    }

    pub fn end(&self) -> u64 {
        self.start + self.size
    }
}

/// Intersection of a query range with the first interval it touches.
///
/// `is_start` / `is_end` tell whether the overlap reaches the query's
/// start or end; the planner uses them to decide which sides of a request
/// need to be split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub start: u64,
    pub end: u64,
    pub size: u64,
    /// The interval the query overlapped.
    pub interval: Interval,
    /// Offset of `start` from the beginning of `interval`.
    pub offset_in_interval: u64,
    pub is_start: bool,
    pub is_end: bool,
}

impl Overlap {
    /// Overlap touches neither edge of the query, so both sides need trimming.
    pub fn is_interior(&self) -> bool {
        !self.is_start && !self.is_end
    }

    /// Number of units of the query range that precede the overlap.
    pub fn leading(&self, query_start: u64) -> u64 {
        self.start - query_start
    }

    /// Number of units of the query range that follow the overlap.
    pub fn trailing(&self, query_start: u64, query_size: u64) -> u64 {
        query_start + query_size - self.end
    }
}
