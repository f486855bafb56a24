//! Raw-print wire contract
//!
//! The printing client and the print proxy exchange these over HTTP:
//! the client posts a [`PrintRawRequest`], the proxy answers with a
//! [`PrintOutcome`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::PrintErrorCode;

/// De facto raw printing port (JetDirect / AppSocket)
pub const DEFAULT_RAW_PORT: u16 = 9100;

/// Request to write raw bytes to a network printer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrintRawRequest {
    /// Printer IP address (host names are not resolved)
    pub ip: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Payload bytes, base64 encoded
    pub data: String,
}

fn default_port() -> u16 {
    DEFAULT_RAW_PORT
}

impl PrintRawRequest {
    pub fn new(ip: impl Into<String>, port: u16, bytes: &[u8]) -> Self {
        Self {
            ip: ip.into(),
            port,
            data: STANDARD.encode(bytes),
        }
    }

    /// Decode the payload back to raw bytes
    pub fn decode_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// Printer address for status checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrinterTarget {
    pub ip: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Result of a print attempt, reported instead of raised
///
/// UI code renders `message` directly; `error` carries the technical
/// detail for logs and `code` the classified failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrintOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<PrintErrorCode>,
}

impl PrintOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            code: None,
        }
    }

    /// Failed outcome; the message is the code's user-facing text
    pub fn failure(code: PrintErrorCode, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: code.user_message(),
            error: Some(detail.into()),
            code: Some(code),
        }
    }
}
