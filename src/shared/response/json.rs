use crate::engine::planner::PlanOutcome;
use crate::shared::response::render::PlanRenderer;

/// `{"moves": [...], "failed_moves": [...]}` followed by a newline.
pub struct JsonRenderer;

impl PlanRenderer for JsonRenderer {
    fn render(&self, outcome: &PlanOutcome) -> Vec<u8> {
        let mut output = serde_json::to_vec_pretty(outcome).unwrap_or_else(|e| {
            format!("{{\"error\":\"failed to serialize plan: {e}\"}}").into_bytes()
        });
        output.push(b'\n');
        output
    }
}
