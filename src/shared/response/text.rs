use crate::engine::planner::PlanOutcome;
use crate::shared::response::render::PlanRenderer;

/// Human-readable plan: one command per line, then any requests left behind.
pub struct TextRenderer;

impl PlanRenderer for TextRenderer {
    fn render(&self, outcome: &PlanOutcome) -> Vec<u8> {
        let mut output = String::new();

        if outcome.moves.is_empty() {
            output.push_str("No moves planned\n");
        }
        for command in &outcome.moves {
            output.push_str(&format!("{command}\n"));
        }

        if !outcome.failed_moves.is_empty() {
            output.push_str(&format!(
                "Failed: {} request(s), {} units not moved\n",
                outcome.failed_moves.len(),
                outcome.remaining_size()
            ));
            for req in &outcome.failed_moves {
                output.push_str(&format!(
                    "  '{}' {}[{}, {}) -> {}[{}, {})\n",
                    req.name,
                    req.from_set,
                    req.from_start,
                    req.from_end(),
                    req.to_set,
                    req.to_start,
                    req.to_end()
                ));
            }
        }

        output.into_bytes()
    }
}
