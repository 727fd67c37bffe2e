use tracing::trace;

use super::interval::{Interval, Overlap, PlacedExtent};
use super::policy::DevicePolicy;
use crate::engine::errors::ExtentError;

/// Sorted, merged collection of non-overlapping intervals for one device.
///
/// Intervals are kept ascending by `start`; two intervals never overlap or
/// touch (adjacent ranges are merged on insert) and none is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtentSet {
    device: String,
    intervals: Vec<Interval>,
    policy: DevicePolicy,
}

impl ExtentSet {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            intervals: Vec::new(),
            policy: DevicePolicy::default(),
        }
    }

    pub fn with_policy(device: impl Into<String>, policy: DevicePolicy) -> Self {
        Self {
            policy,
            ..Self::new(device)
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn policy(&self) -> DevicePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DevicePolicy) {
        self.policy = policy;
    }

    pub fn indirect_allowed(&self) -> bool {
        self.policy.indirect_allowed
    }

    pub fn local_allowed(&self) -> bool {
        self.policy.local_allowed
    }

    pub fn split_allowed(&self) -> bool {
        self.policy.split_allowed
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Inserts `[start, start + size)`, merging with every interval it
    /// overlaps or touches. Empty ranges are ignored.
    pub fn add(&mut self, start: u64, size: u64) {
        if size == 0 {
            return;
        }
        let end = start + size;

        // Everything in lo..hi overlaps or is adjacent to the new range.
        let lo = self.intervals.partition_point(|iv| iv.end() < start);
        let hi = self.intervals.partition_point(|iv| iv.start <= end);

        let (merged_start, merged_end) = if lo < hi {
            (
                start.min(self.intervals[lo].start),
                end.max(self.intervals[hi - 1].end()),
            )
        } else {
            (start, end)
        };

        self.intervals.splice(
            lo..hi,
            std::iter::once(Interval::new(merged_start, merged_end - merged_start)),
        );
    }

    pub fn add_extents<'a, I>(&mut self, extents: I)
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        for iv in extents {
            self.add(iv.start, iv.size);
        }
    }

    /// Removes an exact subrange that must lie wholly inside one interval.
    ///
    /// The owning interval is shrunk, split in two, or dropped. Any other
    /// shape means the extent model is corrupt and is reported as
    /// [`ExtentError::NotContained`].
    pub fn remove(&mut self, start: u64, size: u64) -> Result<PlacedExtent, ExtentError> {
        if size == 0 {
            return Ok(PlacedExtent::new(self.device.clone(), start, 0));
        }
        let end = start + size;

        let idx = self.intervals.partition_point(|iv| iv.end() <= start);
        let owner = match self.intervals.get(idx) {
            Some(iv) if iv.contains_range(start, size) => *iv,
            _ => {
                return Err(ExtentError::NotContained {
                    device: self.device.clone(),
                    start,
                    size,
                });
            }
        };

        let head = (start > owner.start).then(|| Interval::new(owner.start, start - owner.start));
        let tail = (end < owner.end()).then(|| Interval::new(end, owner.end() - end));
        self.intervals
            .splice(idx..idx + 1, head.into_iter().chain(tail));

        trace!(
            target: "extent::remove",
            device = %self.device,
            start,
            size,
            "Removed range"
        );

        Ok(PlacedExtent::new(self.device.clone(), start, size))
    }

    /// True when `[start, start + size)` overlaps any interval.
    pub fn is_used(&self, start: u64, size: u64) -> bool {
        if size == 0 {
            return false;
        }
        let idx = self.intervals.partition_point(|iv| iv.end() <= start);
        self.intervals
            .get(idx)
            .is_some_and(|iv| iv.overlaps(start, size))
    }

    /// Overlap between the query and the first interval it intersects.
    pub fn find_overlap(&self, start: u64, size: u64) -> Option<Overlap> {
        if size == 0 {
            return None;
        }
        let end = start + size;
        let idx = self.intervals.partition_point(|iv| iv.end() <= start);
        let iv = *self.intervals.get(idx)?;
        if !iv.overlaps(start, size) {
            return None;
        }

        let overlap_start = iv.start.max(start);
        let overlap_end = iv.end().min(end);
        Some(Overlap {
            start: overlap_start,
            end: overlap_end,
            size: overlap_end - overlap_start,
            interval: iv,
            offset_in_interval: overlap_start - iv.start,
            is_start: overlap_start == start,
            is_end: overlap_end == end,
        })
    }

    /// First-fit: the first interval in address order at least `size` long.
    pub fn find(&self, size: u64) -> Option<PlacedExtent> {
        self.intervals
            .iter()
            .find(|iv| iv.size >= size)
            .map(|iv| PlacedExtent::new(self.device.clone(), iv.start, iv.size))
    }

    pub fn total_size(&self) -> u64 {
        self.intervals.iter().map(|iv| iv.size).sum()
    }

    pub fn largest(&self) -> Option<Interval> {
        self.intervals.iter().copied().max_by_key(|iv| iv.size)
    }
}
