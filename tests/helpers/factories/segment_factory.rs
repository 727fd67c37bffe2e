use crate::engine::report::Segment;
use crate::engine::report::segment::FREE_SEGTYPE;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct SegmentFactory {
    params: HashMap<String, Value>,
}

impl SegmentFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("segtype".into(), json!("linear"));
        params.insert("pv_name".into(), json!("/dev/sda"));
        params.insert("pv_start".into(), json!(0));
        params.insert("pv_size".into(), json!(10));
        params.insert("lv_name".into(), json!("lv0"));
        params.insert("lv_start".into(), json!(0));
        params.insert("lv_index".into(), json!(1));
        Self { params }
    }

    /// A free segment; clears the logical-volume identity.
    pub fn free() -> Self {
        let mut factory = Self::new().with("segtype", FREE_SEGTYPE);
        for key in ["lv_name", "lv_start", "lv_index"] {
            factory.params.remove(key);
        }
        factory
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Places the segment at `[pv_start, pv_start + pv_size)` on `pv_name`.
    pub fn at(self, pv_name: &str, pv_start: u64, pv_size: u64) -> Self {
        self.with("pv_name", pv_name)
            .with("pv_start", pv_start)
            .with("pv_size", pv_size)
    }

    /// Records an edited placement for the segment.
    pub fn moved_to(self, pv_name: &str, pv_start: u64) -> Self {
        self.with("moved", true)
            .with("moved_pv_name", pv_name)
            .with("moved_pv_start", pv_start)
    }

    pub fn create(self) -> Segment {
        let u64_of = |key: &str| self.params.get(key).and_then(Value::as_u64);
        let str_of = |key: &str| {
            self.params
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let pv_size = u64_of("pv_size").unwrap();
        let lv_name = str_of("lv_name");
        let occupied = lv_name.is_some();

        Segment {
            segtype: str_of("segtype").unwrap(),
            pv_name: str_of("pv_name").unwrap(),
            pv_start: u64_of("pv_start").unwrap(),
            pv_size,
            lv_start: u64_of("lv_start").filter(|_| occupied),
            lv_size: u64_of("lv_size").or(Some(pv_size)).filter(|_| occupied),
            lv_index: u64_of("lv_index").map(|i| i as u32).filter(|_| occupied),
            lv_name,
            moved: self
                .params
                .get("moved")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            moved_pv_name: str_of("moved_pv_name"),
            moved_pv_start: u64_of("moved_pv_start"),
        }
    }
}
