//! # freight-receipt
//!
//! LR (lorry receipt) rendering for 80mm thermal printers.
//!
//! This crate decides WHAT goes on the paper; `freight-printer` handles
//! the ESC/POS format and the transports.
//!
//! ```ignore
//! use freight_receipt::{CopyKind, ReceiptConfig, encode, encode_copies};
//!
//! let config = ReceiptConfig::from_env();
//! let stream = encode(&order, CopyKind::Full, &config);
//! let [office, customer, driver] = encode_copies(&order, &config);
//! ```

mod config;
mod renderer;

pub use config::ReceiptConfig;
pub use renderer::{
    AMOUNT_COL, CopyKind, GAP_COL, ITEM_COL, QTY_COL, RULE_WIDTH, ReceiptRenderer, encode,
    encode_all, encode_copies, preview,
};
