//! Error types for the printer library

use shared::error::PrintErrorCode;
use shared::print::PrintOutcome;
use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Printer refused the TCP connection
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// Timeout connecting to or writing to the printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// No route to the printer
    #[error("Host unreachable: {0}")]
    HostUnreachable(String),

    /// The print proxy could not be reached or answered garbage
    #[error("Print server unreachable: {0}")]
    BackendUnreachable(String),

    /// Print plugin missing or not running
    #[error("Print plugin not available: {0}")]
    PluginNotInstalled(String),

    /// No printer with that name
    #[error("Printer not found: {0}")]
    PrinterNotFound(String),

    /// No Bluetooth device has been paired
    #[error("Bluetooth printer not paired")]
    NotPaired,

    /// GATT write failure
    #[error("Bluetooth error: {0}")]
    Bluetooth(String),

    /// Backend rejected the session
    #[error("Session expired")]
    SessionExpired,

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by a remote party without a finer classification
    #[error("Print failed: {0}")]
    Failed(String),
}

impl PrintError {
    /// Classify a socket error against a printer address
    pub fn from_io(addr: impl std::fmt::Display, e: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match e.kind() {
            ErrorKind::ConnectionRefused => Self::ConnectionRefused(format!("{}: {}", addr, e)),
            ErrorKind::TimedOut => Self::Timeout(format!("{}: {}", addr, e)),
            ErrorKind::HostUnreachable | ErrorKind::NetworkUnreachable => {
                Self::HostUnreachable(format!("{}: {}", addr, e))
            }
            _ => Self::Io(e),
        }
    }

    /// Rebuild an error from a code reported by the print proxy
    pub fn from_code(code: PrintErrorCode, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match code {
            PrintErrorCode::ConnectionRefused => Self::ConnectionRefused(detail),
            PrintErrorCode::Timeout => Self::Timeout(detail),
            PrintErrorCode::HostUnreachable => Self::HostUnreachable(detail),
            PrintErrorCode::BackendUnreachable => Self::BackendUnreachable(detail),
            PrintErrorCode::PluginNotInstalled => Self::PluginNotInstalled(detail),
            PrintErrorCode::PrinterNotFound => Self::PrinterNotFound(detail),
            PrintErrorCode::NotPaired => Self::NotPaired,
            PrintErrorCode::Bluetooth => Self::Bluetooth(detail),
            PrintErrorCode::SessionExpired => Self::SessionExpired,
            PrintErrorCode::InvalidConfig => Self::InvalidConfig(detail),
            PrintErrorCode::Io => Self::Io(std::io::Error::other(detail)),
            PrintErrorCode::Unknown => Self::Failed(detail),
        }
    }

    /// Classified code for UI messages
    pub fn code(&self) -> PrintErrorCode {
        match self {
            Self::ConnectionRefused(_) => PrintErrorCode::ConnectionRefused,
            Self::Timeout(_) => PrintErrorCode::Timeout,
            Self::HostUnreachable(_) => PrintErrorCode::HostUnreachable,
            Self::BackendUnreachable(_) => PrintErrorCode::BackendUnreachable,
            Self::PluginNotInstalled(_) => PrintErrorCode::PluginNotInstalled,
            Self::PrinterNotFound(_) => PrintErrorCode::PrinterNotFound,
            Self::NotPaired => PrintErrorCode::NotPaired,
            Self::Bluetooth(_) => PrintErrorCode::Bluetooth,
            Self::SessionExpired => PrintErrorCode::SessionExpired,
            Self::InvalidConfig(_) => PrintErrorCode::InvalidConfig,
            Self::Io(_) => PrintErrorCode::Io,
            Self::Failed(_) => PrintErrorCode::Unknown,
        }
    }
}

impl From<PrintError> for PrintOutcome {
    fn from(e: PrintError) -> Self {
        PrintOutcome::failure(e.code(), e.to_string())
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;

/// Fold a print result into the non-throwing outcome shown by the UI
pub fn into_outcome(result: PrintResult<()>, success_message: &str) -> PrintOutcome {
    match result {
        Ok(()) => PrintOutcome::ok(success_message),
        Err(e) => e.into(),
    }
}
