use serde::{Deserialize, Serialize};

/// Per-device rules the planner consults before using a device's free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePolicy {
    /// Free space may stage data belonging to moves between other devices.
    pub indirect_allowed: bool,
    /// Moves may start and end on this same device.
    pub local_allowed: bool,
    /// A move into this device may be cut on both sides when its target is fragmented.
    pub split_allowed: bool,
}

impl Default for DevicePolicy {
    fn default() -> Self {
        Self {
            indirect_allowed: true,
            local_allowed: true,
            split_allowed: true,
        }
    }
}

impl DevicePolicy {
    /// Conservative defaults used for devices a user has not configured:
    /// staging on, local moves and double-sided splits off.
    pub fn conservative() -> Self {
        Self {
            indirect_allowed: true,
            local_allowed: false,
            split_allowed: false,
        }
    }
}
