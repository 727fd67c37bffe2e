pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{DeviceSettings, LoggingConfig, OutputConfig, Settings, load_settings};
