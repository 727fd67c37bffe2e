use indexmap::IndexMap;

use super::extent_set::ExtentSet;
use super::interval::{Overlap, PlacedExtent};
use super::policy::DevicePolicy;
use crate::engine::errors::ExtentError;

/// Registry of [`ExtentSet`]s keyed by device name.
///
/// Devices are kept in first-reference order; cross-device searches walk
/// them in that order so results are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedExtents {
    sets: IndexMap<String, ExtentSet>,
}

impl NamedExtents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set for `name`, creating an empty one on first use.
    pub fn set(&mut self, name: &str) -> &mut ExtentSet {
        self.sets
            .entry(name.to_string())
            .or_insert_with(|| ExtentSet::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&ExtentSet> {
        self.sets.get(name)
    }

    /// Policy of `name`; unknown devices report the permissive default a
    /// freshly created set would carry.
    pub fn policy(&self, name: &str) -> DevicePolicy {
        self.sets
            .get(name)
            .map(ExtentSet::policy)
            .unwrap_or_default()
    }

    pub fn set_policy(&mut self, name: &str, policy: DevicePolicy) {
        self.set(name).set_policy(policy);
    }

    pub fn devices(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtentSet> {
        self.sets.values()
    }

    pub fn add(&mut self, name: &str, start: u64, size: u64) {
        self.set(name).add(start, size);
    }

    pub fn add_extents<'a, I>(&mut self, extents: I)
    where
        I: IntoIterator<Item = &'a PlacedExtent>,
    {
        for ext in extents {
            self.add(&ext.device, ext.start, ext.size);
        }
    }

    pub fn remove(&mut self, name: &str, start: u64, size: u64) -> Result<PlacedExtent, ExtentError> {
        self.set(name).remove(start, size)
    }

    pub fn is_used(&self, name: &str, start: u64, size: u64) -> bool {
        self.sets
            .get(name)
            .is_some_and(|set| set.is_used(start, size))
    }

    pub fn find_overlap(&self, name: &str, start: u64, size: u64) -> Option<Overlap> {
        self.sets.get(name)?.find_overlap(start, size)
    }

    /// Cross-device first-fit for `size` units.
    ///
    /// Every device other than `name` is tried first, in registry order,
    /// restricted to `selected` when given. `name` itself is only tried
    /// last, and only when no filter was given or the filter names it.
    pub fn find(&self, name: &str, size: u64, selected: Option<&[String]>) -> Option<PlacedExtent> {
        let is_selected = |device: &str| selected.is_none_or(|s| s.iter().any(|d| d == device));

        let found = self
            .sets
            .iter()
            .filter(|(device, _)| device.as_str() != name && is_selected(device))
            .find_map(|(_, set)| set.find(size));
        if found.is_some() {
            return found;
        }

        if !is_selected(name) {
            return None;
        }
        self.sets.get(name)?.find(size)
    }

    pub fn total_size(&self, name: &str) -> u64 {
        self.sets.get(name).map_or(0, ExtentSet::total_size)
    }

    /// Per-device totals in registry order.
    pub fn totals(&self) -> IndexMap<String, u64> {
        self.sets
            .iter()
            .map(|(name, set)| (name.clone(), set.total_size()))
            .collect()
    }
}
