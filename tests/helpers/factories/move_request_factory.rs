use crate::engine::planner::MoveRequest;
use serde_json::{Value, json};
use std::collections::HashMap;

pub struct MoveRequestFactory {
    params: HashMap<String, Value>,
}

impl MoveRequestFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("name".into(), json!("lv #1 (0-10)"));
        params.insert("from_set".into(), json!("/dev/a"));
        params.insert("from_start".into(), json!(0));
        params.insert("to_set".into(), json!("/dev/a"));
        params.insert("to_start".into(), json!(10));
        params.insert("size".into(), json!(10));
        params.insert("moved".into(), json!(false));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Shorthand for `[from_set, from_start) -> [to_set, to_start)` of `size` units.
    pub fn route(self, from_set: &str, from_start: u64, to_set: &str, to_start: u64, size: u64) -> Self {
        self.with("from_set", from_set)
            .with("from_start", from_start)
            .with("to_set", to_set)
            .with("to_start", to_start)
            .with("size", size)
    }

    pub fn create(self) -> MoveRequest {
        MoveRequest {
            from_set: self.params["from_set"].as_str().unwrap().to_string(),
            from_start: self.params["from_start"].as_u64().unwrap(),
            to_set: self.params["to_set"].as_str().unwrap().to_string(),
            to_start: self.params["to_start"].as_u64().unwrap(),
            size: self.params["size"].as_u64().unwrap(),
            name: self.params["name"].as_str().unwrap().to_string(),
            moved: self.params["moved"].as_bool().unwrap(),
            seq: self
                .params
                .get("seq")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as usize,
        }
    }

    /// `count` consecutive requests of `size` units starting at `from_start`
    /// on the source, each shifted by `to_start - from_start` on the target.
    pub fn create_list(self, count: usize) -> Vec<MoveRequest> {
        let template = self.create();
        (0..count as u64)
            .map(|i| {
                let mut req = template.slice(0, template.size);
                req.from_start += i * template.size;
                req.to_start += i * template.size;
                req.name = format!("{} #{}", template.name, i + 1);
                req.seq = i as usize;
                req
            })
            .collect()
    }
}
