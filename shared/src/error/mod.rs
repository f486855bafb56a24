//! Print error classification
//!
//! Every transport failure is reduced to a [`PrintErrorCode`] so that the
//! printing client and the print proxy agree on what went wrong, and so the
//! UI can show one actionable message per failure kind.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Print plugin errors
//! - 2xxx: Network printer errors
//! - 3xxx: Bluetooth errors
//! - 4xxx: Session errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCategory, PrintErrorCode};
//!
//! let code = PrintErrorCode::ConnectionRefused;
//! assert_eq!(code.category(), ErrorCategory::Network);
//! assert!(code.hint().contains("IP"));
//! ```

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{PrintErrorCode, UnknownErrorCode};
