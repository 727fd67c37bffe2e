use serde::Deserialize;
use std::collections::HashMap;
use std::env;

use crate::engine::extent::DevicePolicy;
use crate::engine::planner::PlannerConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub planner: PlannerConfig,
    pub devices: DeviceSettings,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// Policies applied to devices when building a plan snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "DeviceSection")]
pub struct DeviceSettings {
    /// Policy for devices without an override.
    pub default: DevicePolicy,
    pub overrides: HashMap<String, DevicePolicy>,
}

/// Policy flags as written in a config file; omitted flags inherit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyPatch {
    pub indirect_allowed: Option<bool>,
    pub local_allowed: Option<bool>,
    pub split_allowed: Option<bool>,
}

impl PolicyPatch {
    pub fn apply_to(self, base: DevicePolicy) -> DevicePolicy {
        DevicePolicy {
            indirect_allowed: self.indirect_allowed.unwrap_or(base.indirect_allowed),
            local_allowed: self.local_allowed.unwrap_or(base.local_allowed),
            split_allowed: self.split_allowed.unwrap_or(base.split_allowed),
        }
    }
}

/// The `[devices]` section before inheritance: the default patches the
/// conservative policy and each override patches the resulting default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeviceSection {
    default: PolicyPatch,
    overrides: HashMap<String, PolicyPatch>,
}

impl From<DeviceSection> for DeviceSettings {
    fn from(section: DeviceSection) -> Self {
        let default = section.default.apply_to(DevicePolicy::conservative());
        let overrides = section
            .overrides
            .into_iter()
            .map(|(device, patch)| (device, patch.apply_to(default)))
            .collect();
        Self { default, overrides }
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            default: DevicePolicy::conservative(),
            overrides: HashMap::new(),
        }
    }
}

impl DeviceSettings {
    pub fn policy_for(&self, device: &str) -> DevicePolicy {
        self.overrides
            .get(device)
            .copied()
            .unwrap_or(self.default)
    }

    /// Returns the override for `device`, seeding it from the default.
    pub fn override_mut(&mut self, device: &str) -> &mut DevicePolicy {
        let default = self.default;
        self.overrides
            .entry(device.to_string())
            .or_insert(default)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Daily-rolling log files go here when set.
    pub log_dir: Option<String>,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            stdout_level: "warn".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("PVSHUFFLE_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Reads `config_path` (any format the `config` crate recognizes, optional)
/// and overlays `PVSHUFFLE__SECTION__KEY` environment variables.
pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("PVSHUFFLE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
