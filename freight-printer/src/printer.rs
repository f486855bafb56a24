//! Printer adapters for sending ESC/POS data
//!
//! Supports:
//! - Network printers (raw TCP, port 9100) - [`NetworkPrinter`]
//! - Network printers reached through the print proxy - [`crate::ProxyPrinter`]
//! - Print plugin (QZ Tray) - [`crate::PluginPrinter`]
//! - Bluetooth LE printers - [`crate::BluetoothPrinter`]

use crate::encoding::to_wire_bytes;
use crate::error::{PrintError, PrintResult};
use shared::print::DEFAULT_RAW_PORT;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;

    /// Send an encoded receipt stream (one byte per char)
    async fn print_stream(&self, stream: &str) -> PrintResult<()> {
        self.print(&to_wire_bytes(stream)).await
    }
}

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let addr_str = format!("{}:{}", host, port);
        Self::from_addr(&addr_str)
    }

    /// Create a printer on the default raw port
    pub fn with_default_port(host: &str) -> PrintResult<Self> {
        Self::new(host, DEFAULT_RAW_PORT)
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn connect(&self) -> PrintResult<TcpStream> {
        tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::from_io(self.addr, e))
    }

    /// Open and drop a connection, classifying any failure
    ///
    /// Uses the same timeout as printing.
    #[instrument(fields(addr = %self.addr))]
    pub async fn probe(&self) -> PrintResult<()> {
        match self.connect().await {
            Ok(_) => {
                info!("Printer online");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Printer offline");
                Err(e)
            }
        }
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = self.connect().await?;

        info!("Connected, sending {} bytes", data.len());

        tokio::time::timeout(self.timeout, async {
            stream.write_all(data).await?;
            stream.flush().await?;
            stream.shutdown().await
        })
        .await
        .map_err(|_| PrintError::Timeout(format!("Write timeout: {}", self.addr)))?
        .map_err(|e| PrintError::from_io(self.addr, e))?;

        info!("Print job sent successfully");
        Ok(())
    }

    async fn is_online(&self) -> bool {
        self.probe().await.is_ok()
    }
}
