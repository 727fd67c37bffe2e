use crate::engine::extent::{DevicePolicy, NamedExtents};

pub struct FreeSpaceFactory {
    policies: Vec<(String, DevicePolicy)>,
    extents: Vec<(String, u64, u64)>,
}

impl FreeSpaceFactory {
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
            extents: Vec::new(),
        }
    }

    /// Registers the device's policy. Devices are registered in call order,
    /// policies before extents.
    pub fn policy(mut self, device: &str, policy: DevicePolicy) -> Self {
        self.policies.push((device.to_string(), policy));
        self
    }

    pub fn extent(mut self, device: &str, start: u64, size: u64) -> Self {
        self.extents.push((device.to_string(), start, size));
        self
    }

    pub fn create(self) -> NamedExtents {
        let mut named = NamedExtents::new();
        for (device, policy) in &self.policies {
            named.set_policy(device, *policy);
        }
        for (device, start, size) in &self.extents {
            named.add(device, *start, *size);
        }
        named
    }
}
