//! Network printing through the print proxy
//!
//! Browsers and locked-down terminals cannot open raw sockets, so the
//! payload is posted to the print proxy, which opens the TCP connection to
//! the printer on the caller's behalf.

use shared::error::PrintErrorCode;
use shared::print::{DEFAULT_RAW_PORT, PrintOutcome, PrintRawRequest, PrinterTarget};
use tracing::{info, instrument, warn};

use crate::client::ApiClient;
use crate::error::{PrintError, PrintResult};
use crate::printer::Printer;

pub const PRINT_RAW_PATH: &str = "/api/print/raw";
pub const PRINT_STATUS_PATH: &str = "/api/print/status";

/// Network printer reached through the print proxy
#[derive(Clone)]
pub struct ProxyPrinter {
    client: ApiClient,
    ip: String,
    port: u16,
}

impl ProxyPrinter {
    pub fn new(client: ApiClient, ip: impl Into<String>, port: u16) -> PrintResult<Self> {
        let ip = ip.into();
        if ip.trim().is_empty() {
            return Err(PrintError::InvalidConfig("Printer IP address is empty".to_string()));
        }
        Ok(Self { client, ip, port })
    }

    /// Printer on the default raw port (9100)
    pub fn with_default_port(client: ApiClient, ip: impl Into<String>) -> PrintResult<Self> {
        Self::new(client, ip, DEFAULT_RAW_PORT)
    }

    pub fn target(&self) -> PrinterTarget {
        PrinterTarget {
            ip: self.ip.clone(),
            port: self.port,
        }
    }
}

fn outcome_to_result(outcome: PrintOutcome) -> PrintResult<()> {
    if outcome.success {
        return Ok(());
    }
    let code = outcome.code.unwrap_or(PrintErrorCode::Unknown);
    Err(PrintError::from_code(code, outcome.error.unwrap_or(outcome.message)))
}

impl Printer for ProxyPrinter {
    #[instrument(skip(self, data), fields(ip = %self.ip, port = self.port, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let request = PrintRawRequest::new(self.ip.clone(), self.port, data);
        let outcome: PrintOutcome = self.client.post_json(PRINT_RAW_PATH, &request).await?;

        match outcome_to_result(outcome) {
            Ok(()) => {
                info!("Print job accepted by proxy");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Proxy reported print failure");
                Err(e)
            }
        }
    }

    #[instrument(skip(self), fields(ip = %self.ip, port = self.port))]
    async fn is_online(&self) -> bool {
        match self
            .client
            .post_json::<_, PrintOutcome>(PRINT_STATUS_PATH, &self.target())
            .await
        {
            Ok(outcome) => outcome.success,
            Err(e) => {
                warn!(error = %e, "Printer status check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::post};
    use std::net::SocketAddr;

    async fn spawn_fake_proxy(reply: PrintOutcome) -> SocketAddr {
        let app = Router::new().route(
            PRINT_RAW_PATH,
            post(move |Json(req): Json<PrintRawRequest>| {
                let reply = reply.clone();
                async move {
                    assert_eq!(req.port, 9100);
                    assert_eq!(req.decode_data().unwrap(), vec![0x1B, 0x40]);
                    Json(reply)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[test]
    fn test_empty_ip_rejected() {
        let client = ApiClient::new("http://localhost:3100").unwrap();
        assert!(ProxyPrinter::with_default_port(client, " ").is_err());
    }

    #[tokio::test]
    async fn test_print_success() {
        let addr = spawn_fake_proxy(PrintOutcome::ok("Printed")).await;
        let client = ApiClient::new(format!("http://{}", addr)).unwrap();
        let printer = ProxyPrinter::with_default_port(client, "192.168.1.60").unwrap();

        printer.print_stream("\x1B@").await.unwrap();
    }

    #[tokio::test]
    async fn test_print_failure_keeps_classification() {
        let reply = PrintOutcome::failure(PrintErrorCode::HostUnreachable, "no route to host");
        let addr = spawn_fake_proxy(reply).await;
        let client = ApiClient::new(format!("http://{}", addr)).unwrap();
        let printer = ProxyPrinter::with_default_port(client, "192.168.1.60").unwrap();

        let err = printer.print(&[0x1B, 0x40]).await.unwrap_err();
        assert_eq!(err.code(), PrintErrorCode::HostUnreachable);
        assert!(err.to_string().contains("no route to host"));
    }
}
