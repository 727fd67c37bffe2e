use crate::engine::planner::{MoveCommand, PlanOutcome};
use crate::shared::response::render::PlanRenderer;

/// Shell script of `pvmove` invocations, one per command, in plan order.
/// LVM extent ranges are inclusive.
pub struct PvmoveRenderer;

fn pvmove_line(command: &MoveCommand) -> String {
    format!(
        "pvmove --alloc anywhere {}:{}-{} {}:{}-{}",
        command.from_set,
        command.from_start,
        command.from_end() - 1,
        command.to_set,
        command.to_start,
        command.to_end() - 1
    )
}

impl PlanRenderer for PvmoveRenderer {
    fn render(&self, outcome: &PlanOutcome) -> Vec<u8> {
        let mut output = String::new();
        for command in outcome.moves.iter().filter(|c| c.size > 0) {
            output.push_str(&format!("# {} {}\n", command.kind, command.name));
            output.push_str(&pvmove_line(command));
            output.push('\n');
        }
        for req in &outcome.failed_moves {
            output.push_str(&format!(
                "# not moved: '{}' {}:{}-{}\n",
                req.name,
                req.from_set,
                req.from_start,
                req.from_end().saturating_sub(1)
            ));
        }
        output.into_bytes()
    }
}
