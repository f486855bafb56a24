//! # freight-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS directive building and serialization
//! - Receipt preview (stream parsing, HTML rendering)
//! - Wire conversion (one byte per char)
//! - Transports: raw TCP, print proxy, print plugin, Bluetooth LE
//!
//! Business logic (WHAT to print) lives in `freight-receipt`.
//!
//! ## Example
//!
//! ```ignore
//! use freight_printer::{EscPosTextBuilder, NetworkPrinter, Printer, to_escpos};
//!
//! let mut builder = EscPosTextBuilder::new(44);
//! builder.reset();
//! builder.align_center();
//! builder.size_double();
//! builder.write_line("LR1001");
//! builder.size_reset();
//! builder.cut();
//!
//! let stream = to_escpos(&builder.finalize());
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print_stream(&stream).await?;
//! ```

mod bluetooth;
mod client;
mod encoding;
mod error;
mod escpos;
mod plugin;
mod preview;
mod printer;
mod proxy;

// Re-exports
pub use bluetooth::{
    BluetoothConnection, BluetoothPrinter, ConnectionStore, DEFAULT_CHUNK_DELAY,
    DEFAULT_CHUNK_SIZE, GattWriter,
};
pub use client::{ApiClient, ResponseInterceptor, SessionExpiryInterceptor};
pub use encoding::{pad, text_width, to_wire_bytes, truncate, wrap_chars};
pub use error::{PrintError, PrintResult, into_outcome};
pub use escpos::{CharSize, Directive, EscPosTextBuilder, to_escpos, to_lines};
pub use plugin::{PluginJob, PluginPrinter, PrintPlugin, receipt_jobs};
pub use preview::{Align, CUT_LINE_TEXT, LineStyle, ParsedLine, parse, render_html};
pub use printer::{NetworkPrinter, Printer};
pub use proxy::{PRINT_RAW_PATH, PRINT_STATUS_PATH, ProxyPrinter};
