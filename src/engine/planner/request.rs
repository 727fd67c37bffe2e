use serde::{Deserialize, Serialize};

/// Desired relocation of one logical unit from its current placement to a
/// target placement.
///
/// The planner rewrites the `from_*` fields when it stages a request
/// through scratch space, shrinks `size` when it splits a request, and
/// spawns new requests for the split-off remainders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from_set: String,
    pub from_start: u64,
    pub to_set: String,
    pub to_start: u64,
    pub size: u64,
    pub name: String,
    /// Already staged once; never staged again.
    #[serde(default)]
    pub moved: bool,
    /// Ordinal assigned by the planner; breaks sort ties so runs are
    /// reproducible.
    #[serde(default, skip_serializing)]
    pub seq: usize,
}

impl MoveRequest {
    pub fn new(
        name: impl Into<String>,
        from_set: impl Into<String>,
        from_start: u64,
        to_set: impl Into<String>,
        to_start: u64,
        size: u64,
    ) -> Self {
        Self {
            from_set: from_set.into(),
            from_start,
            to_set: to_set.into(),
            to_start,
            size,
            name: name.into(),
            moved: false,
            seq: 0,
        }
    }

    pub fn from_end(&self) -> u64 {
        self.from_start + self.size
    }

    pub fn to_end(&self) -> u64 {
        self.to_start + self.size
    }

    /// Source and destination are the same range: nothing to do.
    pub fn is_noop(&self) -> bool {
        self.from_set == self.to_set && self.from_start == self.to_start
    }

    pub fn is_local(&self) -> bool {
        self.from_set == self.to_set
    }

    /// The sub-request covering `[offset, offset + size)` of this request,
    /// shifted on both source and destination.
    pub fn slice(&self, offset: u64, size: u64) -> MoveRequest {
        MoveRequest {
            from_start: self.from_start + offset,
            to_start: self.to_start + offset,
            size,
            ..self.clone()
        }
    }
}
