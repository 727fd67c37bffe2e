use std::fmt;
use std::str::FromStr;

use crate::engine::planner::PlanOutcome;
use crate::shared::response::json::JsonRenderer;
use crate::shared::response::pvmove::PvmoveRenderer;
use crate::shared::response::text::TextRenderer;

/// Serializes a finished plan for a given consumer.
pub trait PlanRenderer: Send + Sync {
    fn render(&self, outcome: &PlanOutcome) -> Vec<u8>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Pvmove,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn PlanRenderer> {
        match self {
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
            OutputFormat::Pvmove => Box::new(PvmoveRenderer),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "pvmove" => Ok(OutputFormat::Pvmove),
            other => Err(format!(
                "unknown output format '{other}' (expected text, json or pvmove)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Pvmove => "pvmove",
        })
    }
}
