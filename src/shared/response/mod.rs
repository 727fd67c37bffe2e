pub mod json;
pub mod pvmove;
pub mod render;
pub mod text;

pub use json::JsonRenderer;
pub use pvmove::PvmoveRenderer;
pub use render::{OutputFormat, PlanRenderer};
pub use text::TextRenderer;
