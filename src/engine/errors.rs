use thiserror::Error;
use tracing::{debug, error};

/// Structural failures of the extent model. Any of these means the
/// free/used bookkeeping no longer describes the devices and planning
/// cannot continue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtentError {
    #[error("range [{start}, {end}) on {device} is not inside a single extent", end = .start + .size)]
    NotContained {
        device: String,
        start: u64,
        size: u64,
    },
}

/// Errors that abort a planning run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Extent model corrupted: {0}")]
    Extent(#[from] ExtentError),

    #[error("Requests '{first}' and '{second}' claim overlapping source ranges")]
    OverlappingSources { first: String, second: String },

    #[error("Source of request '{name}' is marked as free space")]
    SourceMarkedFree { name: String },
}

impl PlanError {
    pub fn log_error(&self) {
        match self {
            PlanError::Extent(e) => {
                error!("Extent model corrupted: {}", e);
                debug!("Extent error details: {:?}", e);
            }
            PlanError::OverlappingSources { first, second } => {
                error!("Overlapping move sources: '{}' and '{}'", first, second);
                debug!("Two requests describe the same source units; input is inconsistent");
            }
            PlanError::SourceMarkedFree { name } => {
                error!("Source of '{}' is marked as free", name);
                debug!("Free snapshot and move requests disagree about '{}'", name);
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report contains no physical volume section")]
    MissingSection,

    #[error("Field '{field}' has non-numeric value '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("No entry {index} on device {device}")]
    IndexOutOfRange { device: String, index: usize },

    #[error("Entry {index} on device {device} is free space and cannot be moved")]
    NotMovable { device: String, index: usize },

    #[error("Not enough free space: need {needed}, {available} available")]
    InsufficientFreeSpace { needed: u64, available: u64 },
}
