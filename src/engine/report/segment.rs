use serde::{Deserialize, Serialize};

pub const FREE_SEGTYPE: &str = "free";

/// One physical-volume segment in the normalized shape shared by the report
/// parser, the layout editor and the planner input.
///
/// Occupied segments carry the logical-volume identity; an occupied segment
/// the user relocated also carries its target placement in `moved_*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub segtype: String,
    pub pv_name: String,
    pub pv_start: u64,
    pub pv_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lv_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lv_start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lv_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lv_index: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub moved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved_pv_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved_pv_start: Option<u64>,
}

impl Segment {
    pub fn free(pv_name: impl Into<String>, pv_start: u64, pv_size: u64) -> Self {
        Self {
            segtype: FREE_SEGTYPE.to_string(),
            pv_name: pv_name.into(),
            pv_start,
            pv_size,
            lv_name: None,
            lv_start: None,
            lv_size: None,
            lv_index: None,
            moved: false,
            moved_pv_name: None,
            moved_pv_start: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.lv_name.is_none()
    }

    /// Device the segment is placed on in the edited layout.
    pub fn placed_pv_name(&self) -> &str {
        self.moved_pv_name.as_deref().unwrap_or(&self.pv_name)
    }

    /// Start of the segment in the edited layout.
    pub fn placed_pv_start(&self) -> u64 {
        self.moved_pv_start.unwrap_or(self.pv_start)
    }

    pub fn is_relocated(&self) -> bool {
        !self.is_free()
            && (self.placed_pv_name() != self.pv_name || self.placed_pv_start() != self.pv_start)
    }

    /// `"<lv> #<index> (<lv_start>-<lv_end>)"`, or `"free"`.
    pub fn label(&self) -> String {
        match &self.lv_name {
            Some(lv) => {
                let lv_start = self.lv_start.unwrap_or(0);
                let lv_end = lv_start + self.lv_size.unwrap_or(self.pv_size);
                format!(
                    "{} #{} ({}-{})",
                    lv,
                    self.lv_index.unwrap_or(0),
                    lv_start,
                    lv_end
                )
            }
            None => FREE_SEGTYPE.to_string(),
        }
    }
}
