//! Print error codes
//!
//! Codes are serialized as `u16` so the print proxy can hand them back to
//! the client inside a [`crate::print::PrintOutcome`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ErrorCategory;

/// Classified print failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum PrintErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Transport misconfigured (bad address, empty printer name)
    InvalidConfig = 2,
    /// Local I/O failure while writing the job
    Io = 3,

    // ==================== 1xxx: Plugin ====================
    /// The print plugin is not installed or not running
    PluginNotInstalled = 1001,
    /// No printer with the configured name is known to the plugin
    PrinterNotFound = 1002,

    // ==================== 2xxx: Network ====================
    /// The printer refused the TCP connection
    ConnectionRefused = 2001,
    /// Connecting or writing took too long
    Timeout = 2002,
    /// No route to the printer's address
    HostUnreachable = 2003,
    /// The print proxy itself could not be reached
    BackendUnreachable = 2004,

    // ==================== 3xxx: Bluetooth ====================
    /// No paired device is on record
    NotPaired = 3001,
    /// GATT write or reconnect failed
    Bluetooth = 3002,

    // ==================== 4xxx: Session ====================
    /// The backend rejected the session
    SessionExpired = 4001,
}

impl PrintErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Category derived from the code range
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            PrintErrorCode::Unknown => "Printing failed",
            PrintErrorCode::InvalidConfig => "Printer settings are invalid",
            PrintErrorCode::Io => "Could not send data to the printer",

            PrintErrorCode::PluginNotInstalled => "QZ Tray is not installed or not running",
            PrintErrorCode::PrinterNotFound => "Printer not found",

            PrintErrorCode::ConnectionRefused => "Printer refused the connection",
            PrintErrorCode::Timeout => "Printer did not respond in time",
            PrintErrorCode::HostUnreachable => "Printer is unreachable",
            PrintErrorCode::BackendUnreachable => "Print server is unreachable",

            PrintErrorCode::NotPaired => "No Bluetooth printer is paired",
            PrintErrorCode::Bluetooth => "Bluetooth printing failed",

            PrintErrorCode::SessionExpired => "Session has expired",
        }
    }

    /// Remediation shown next to the message
    pub const fn hint(&self) -> &'static str {
        match self {
            PrintErrorCode::Unknown => "Try printing again.",
            PrintErrorCode::InvalidConfig => "Check the printer IP address, port and name in settings.",
            PrintErrorCode::Io => "Check the printer cable or network and try again.",

            PrintErrorCode::PluginNotInstalled => "Install QZ Tray from qz.io and make sure it is running.",
            PrintErrorCode::PrinterNotFound => {
                "Check that the printer name in settings matches the installed printer."
            }

            PrintErrorCode::ConnectionRefused => {
                "Check that the printer is powered on and the IP address and port are correct."
            }
            PrintErrorCode::Timeout => "Check that the printer is powered on and on the same network.",
            PrintErrorCode::HostUnreachable => {
                "Check the printer IP address and that this machine can reach its network."
            }
            PrintErrorCode::BackendUnreachable => "Check your internet connection or contact support.",

            PrintErrorCode::NotPaired => "Pair the printer from the Bluetooth settings first.",
            PrintErrorCode::Bluetooth => "Move closer to the printer, switch it off and on, then pair again.",

            PrintErrorCode::SessionExpired => "Log in again and retry.",
        }
    }

    /// Full user-facing text: message followed by hint
    pub fn user_message(&self) -> String {
        format!("{}. {}", self.message(), self.hint())
    }
}

impl fmt::Display for PrintErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<PrintErrorCode> for u16 {
    fn from(code: PrintErrorCode) -> Self {
        code.code()
    }
}

/// A numeric code this build does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown print error code: {0}")]
pub struct UnknownErrorCode(pub u16);

impl TryFrom<u16> for PrintErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            1 => PrintErrorCode::Unknown,
            2 => PrintErrorCode::InvalidConfig,
            3 => PrintErrorCode::Io,
            1001 => PrintErrorCode::PluginNotInstalled,
            1002 => PrintErrorCode::PrinterNotFound,
            2001 => PrintErrorCode::ConnectionRefused,
            2002 => PrintErrorCode::Timeout,
            2003 => PrintErrorCode::HostUnreachable,
            2004 => PrintErrorCode::BackendUnreachable,
            3001 => PrintErrorCode::NotPaired,
            3002 => PrintErrorCode::Bluetooth,
            4001 => PrintErrorCode::SessionExpired,
            other => return Err(UnknownErrorCode(other)),
        };
        Ok(code)
    }
}
