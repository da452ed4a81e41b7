// Application state module
// Holds the immutable per-process state shared by every connection task

use super::types::Config;

/// Application state
///
/// Request handling is stateless: the only thing connections share is the
/// configuration loaded at startup. Nothing here is mutated after
/// construction.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}
