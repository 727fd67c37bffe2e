use serde::Deserialize;

/// Consecutive rounds without a direct move the scheduler tolerates before
/// giving up on the remaining requests.
pub const DEFAULT_MAX_IDLE_ROUNDS: usize = 2;

/// Smallest staging region the indirect mechanism settles for when no
/// region can hold a whole request.
pub const DEFAULT_MIN_FRAGMENT_SIZE: u64 = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_idle_rounds: usize,
    pub min_fragment_size: u64,
    /// Pre-split requests at other requests' source boundaries inside their destination.
    pub subdivide_destinations: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_idle_rounds: DEFAULT_MAX_IDLE_ROUNDS,
            min_fragment_size: DEFAULT_MIN_FRAGMENT_SIZE,
            subdivide_destinations: true,
        }
    }
}
