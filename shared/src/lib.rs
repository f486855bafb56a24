//! Shared types for the freight receipt workspace
//!
//! Common types used across multiple crates: the LR order record,
//! minor-unit money helpers and the raw-print wire contract spoken
//! between the printing client and the print proxy.

pub mod error;
pub mod models;
pub mod money;
pub mod print;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCategory, PrintErrorCode};
pub use models::{ItemType, LineItem, Order, Party, PaymentMode, Station};
pub use print::{PrintOutcome, PrintRawRequest, PrinterTarget};
