//! Freight print proxy
//!
//! Browsers cannot open raw sockets, so the web client posts encoded
//! receipts here and the proxy writes them to the printer's raw TCP port.
//!
//! ```text
//! freight-proxy/src/
//! ├── core/    # config, state, server
//! ├── api/     # HTTP routes and handlers
//! └── utils/   # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod utils;

pub use api::build_app;
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::init_logger_with_file;

/// Initialize logging from the loaded configuration
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
}
