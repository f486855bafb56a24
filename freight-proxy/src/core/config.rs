use std::time::Duration;

/// Print proxy configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3100 | HTTP listen port |
/// | LOG_LEVEL | info | Log level or `EnvFilter` directive |
/// | LOG_JSON | false | Emit JSON log lines |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
/// | PRINTER_CONNECT_TIMEOUT_MS | 5000 | TCP connect/write timeout for jobs and status checks |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 LOG_LEVEL=debug freight-proxy
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub log_json: bool,
    /// Log to files under this directory instead of stdout
    pub log_dir: Option<String>,
    pub printer_connect_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3100,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            printer_connect_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: lookup("LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
                .unwrap_or(defaults.log_json),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
            printer_connect_timeout_ms: lookup("PRINTER_CONNECT_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.printer_connect_timeout_ms),
        }
    }

    pub fn printer_timeout(&self) -> Duration {
        Duration::from_millis(self.printer_connect_timeout_ms)
    }
}
