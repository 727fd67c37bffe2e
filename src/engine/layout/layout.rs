use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::engine::errors::LayoutError;
use crate::engine::report::Segment;

/// Editable model of how segments are laid out on each device.
///
/// Every device holds an explicit ordered list of entries. Positions are not
/// stored independently; [`Layout::relayout`] derives them from the order
/// and sizes after each edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    devices: IndexMap<String, Vec<Segment>>,
}

impl Layout {
    /// Builds the layout from a segment list in dump shape. Occupied
    /// segments are placed on their edited position when one is recorded.
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut layout = Layout::default();
        for segment in segments {
            let device = if segment.is_free() {
                segment.pv_name.clone()
            } else {
                segment.placed_pv_name().to_string()
            };
            let start = segment.placed_pv_start();
            let entries = layout.devices.entry(device).or_default();
            let at = entries
                .iter()
                .position(|e| e.placed_pv_start() > start)
                .unwrap_or(entries.len());
            entries.insert(at, segment.clone());
        }
        layout.relayout();
        layout
    }

    pub fn device_names(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    pub fn entries(&self, device: &str) -> Option<&[Segment]> {
        self.devices.get(device).map(Vec::as_slice)
    }

    /// Flattens the layout back into the dump shape, device by device.
    pub fn to_segments(&self) -> Vec<Segment> {
        self.devices.values().flatten().cloned().collect()
    }

    /// Recomputes placements from entry order. Adjacent free entries merge,
    /// empty free entries disappear, and occupied entries are flagged as
    /// moved when their placement differs from where they started.
    pub fn relayout(&mut self) {
        for (device, entries) in self.devices.iter_mut() {
            let mut laid_out: Vec<Segment> = Vec::with_capacity(entries.len());
            let mut pos = 0;
            for mut entry in entries.drain(..) {
                let size = entry.pv_size;
                if entry.is_free() {
                    match laid_out.last_mut() {
                        Some(prev) if prev.is_free() => prev.pv_size += size,
                        _ if size == 0 => {}
                        _ => {
                            entry.pv_name = device.clone();
                            entry.pv_start = pos;
                            entry.moved = false;
                            entry.moved_pv_name = None;
                            entry.moved_pv_start = None;
                            laid_out.push(entry);
                        }
                    }
                } else {
                    let moved = entry.pv_name != *device || entry.pv_start != pos;
                    entry.moved = moved;
                    entry.moved_pv_name = moved.then(|| device.clone());
                    entry.moved_pv_start = moved.then_some(pos);
                    laid_out.push(entry);
                }
                pos += size;
            }
            *entries = laid_out;
        }
    }

    /// Moves the occupied entry at `from_index` on `from_device` so it sits
    /// at `to_index` on `to_device`.
    ///
    /// The move needs as much free space as the entry's size, counted from
    /// the entry just before the insertion point to the end of the target
    /// device. That space is consumed front to back and a free entry of the
    /// same size is left where the moved entry used to be. A reorder within
    /// one device is always accepted, even without free space.
    pub fn move_entry(
        &mut self,
        from_device: &str,
        from_index: usize,
        to_device: &str,
        to_index: usize,
    ) -> Result<(), LayoutError> {
        let source = self
            .devices
            .get(from_device)
            .ok_or_else(|| LayoutError::UnknownDevice(from_device.to_string()))?;
        let entry = source
            .get(from_index)
            .ok_or_else(|| LayoutError::IndexOutOfRange {
                device: from_device.to_string(),
                index: from_index,
            })?;
        if entry.is_free() {
            return Err(LayoutError::NotMovable {
                device: from_device.to_string(),
                index: from_index,
            });
        }
        let target_len = self
            .devices
            .get(to_device)
            .map(Vec::len)
            .ok_or_else(|| LayoutError::UnknownDevice(to_device.to_string()))?;
        let same_device = from_device == to_device;
        let max_index = if same_device { target_len - 1 } else { target_len };
        if to_index > max_index {
            return Err(LayoutError::IndexOutOfRange {
                device: to_device.to_string(),
                index: to_index,
            });
        }

        let old_start = entry.placed_pv_start();
        let item = self.entries_mut(from_device).remove(from_index);
        let size = item.pv_size;
        let target = self.entries_mut(to_device);
        target.insert(to_index, item);

        // First entry considered for free space: the previous sibling, or
        // the next one when the item landed at the front.
        let scan_from = if to_index > 0 { to_index - 1 } else { to_index + 1 };
        let available: u64 = target
            .iter()
            .skip(scan_from)
            .filter(|e| e.is_free())
            .map(|e| e.pv_size)
            .sum();

        if size > available {
            if same_device {
                debug!(
                    target: "layout::move",
                    device = from_device,
                    from_index,
                    to_index,
                    "Reordered within device"
                );
                self.relayout();
                return Ok(());
            }
            let item = self.entries_mut(to_device).remove(to_index);
            self.entries_mut(from_device).insert(from_index, item);
            warn!(
                target: "layout::move",
                needed = size,
                available,
                device = to_device,
                "Not enough free space"
            );
            return Err(LayoutError::InsufficientFreeSpace {
                needed: size,
                available,
            });
        }

        let mut left = size;
        for free in target.iter_mut().skip(scan_from).filter(|e| e.is_free()) {
            if left == 0 {
                break;
            }
            let take = left.min(free.pv_size);
            free.pv_size -= take;
            left -= take;
        }

        let source = self.entries_mut(from_device);
        let at = source
            .iter()
            .position(|e| e.placed_pv_start() > old_start)
            .unwrap_or(source.len());
        source.insert(at, Segment::free(from_device, old_start, size));

        debug!(
            target: "layout::move",
            from_device,
            from_index,
            to_device,
            to_index,
            size,
            "Moved entry"
        );
        self.relayout();
        Ok(())
    }

    /// Regroups `device` so segments of the same logical volume follow each
    /// other in logical order. Each entry is moved in front of the first
    /// earlier entry of its volume with a higher logical start, or in front
    /// of the first entry following a run of its own volume.
    pub fn sort_device(&mut self, device: &str) -> Result<(), LayoutError> {
        let entries = self
            .devices
            .get_mut(device)
            .ok_or_else(|| LayoutError::UnknownDevice(device.to_string()))?;

        for i in 1..entries.len() {
            let mut same_prev = false;
            for j in 0..i {
                let (el, prev) = (&entries[i], &entries[j]);
                let same = el.lv_name == prev.lv_name;
                let before = if same {
                    matches!((el.lv_start, prev.lv_start), (Some(a), Some(b)) if a < b)
                } else {
                    same_prev
                };
                if before {
                    let el = entries.remove(i);
                    entries.insert(j, el);
                    break;
                }
                same_prev = same;
            }
        }

        self.relayout();
        Ok(())
    }

    // Callers have already checked the device exists.
    fn entries_mut(&mut self, device: &str) -> &mut Vec<Segment> {
        self.devices.entry(device.to_string()).or_default()
    }
}
