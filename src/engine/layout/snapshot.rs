use indexmap::IndexMap;
use tracing::info;

use crate::engine::errors::ExtentError;
use crate::engine::extent::NamedExtents;
use crate::engine::planner::MoveRequest;
use crate::engine::report::Segment;
use crate::shared::config::DeviceSettings;

/// Planner input derived from an edited segment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSnapshot {
    pub requests: Vec<MoveRequest>,
    pub free: NamedExtents,
}

impl PlanSnapshot {
    /// One request per relocated occupied segment. Free space per device is
    /// its capacity (the sizes of all entries listed on it) minus the
    /// original placements of the occupied segments that started there.
    pub fn from_segments(segments: &[Segment]) -> Result<Self, ExtentError> {
        let mut capacity: IndexMap<&str, u64> = IndexMap::new();
        for segment in segments {
            let device = if segment.is_free() {
                segment.pv_name.as_str()
            } else {
                segment.placed_pv_name()
            };
            *capacity.entry(device).or_default() += segment.pv_size;
        }

        let mut free = NamedExtents::new();
        for (device, size) in &capacity {
            free.add(device, 0, *size);
        }
        for segment in segments.iter().filter(|s| !s.is_free()) {
            free.remove(&segment.pv_name, segment.pv_start, segment.pv_size)?;
        }

        let requests: Vec<MoveRequest> = segments
            .iter()
            .filter(|s| s.is_relocated())
            .map(|s| {
                MoveRequest::new(
                    s.label(),
                    &s.pv_name,
                    s.pv_start,
                    s.placed_pv_name(),
                    s.placed_pv_start(),
                    s.pv_size,
                )
            })
            .collect();

        info!(
            target: "layout::snapshot",
            devices = capacity.len(),
            requests = requests.len(),
            "Built plan snapshot"
        );
        Ok(Self { requests, free })
    }

    /// Applies configured per-device policies to every known device.
    pub fn apply_policies(&mut self, settings: &DeviceSettings) {
        let devices: Vec<String> = self.free.devices().map(str::to_string).collect();
        for device in devices {
            self.free.set_policy(&device, settings.policy_for(&device));
        }
    }
}
