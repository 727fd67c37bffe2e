use pvshuffle::engine::extent::{DevicePolicy, PlacedExtent};
use pvshuffle::engine::planner::{MoveKind, MoveRequest};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct TestScenario {
    pub name: String,
    pub requests: Vec<MoveRequest>,
    pub free: Vec<PlacedExtent>,
    #[serde(default)]
    pub policies: HashMap<String, DevicePolicy>,
    /// Only set for scenarios whose plan was worked out by hand.
    pub expect: Option<Expectation>,
}

#[derive(Debug, Deserialize)]
pub struct Expectation {
    pub complete: bool,
    pub kinds: Option<Vec<MoveKind>>,
    #[serde(default)]
    pub failed: Vec<String>,
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TestScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}
