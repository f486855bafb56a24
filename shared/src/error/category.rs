//! Error category classification

use super::codes::PrintErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Print plugin errors
/// - 2xxx: Network printer errors
/// - 3xxx: Bluetooth errors
/// - 4xxx: Session errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Print plugin errors (1xxx)
    Plugin,
    /// Network printer errors (2xxx)
    Network,
    /// Bluetooth errors (3xxx)
    Bluetooth,
    /// Session errors (4xxx)
    Session,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Plugin,
            2000..3000 => Self::Network,
            3000..4000 => Self::Bluetooth,
            4000..5000 => Self::Session,
            _ => Self::General,
        }
    }

    /// Get the category name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Plugin => "plugin",
            Self::Network => "network",
            Self::Bluetooth => "bluetooth",
            Self::Session => "session",
        }
    }
}

impl From<PrintErrorCode> for ErrorCategory {
    fn from(code: PrintErrorCode) -> Self {
        Self::from_code(code.code())
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
