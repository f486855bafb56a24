use std::sync::Arc;

use super::Config;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
