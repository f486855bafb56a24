//! Raw print endpoints
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/print/raw | POST | Write a base64 payload to `ip:port` over TCP |
//! | /api/print/status | POST | Check whether `ip:port` accepts connections |
//!
//! Both answer `200` with a [`PrintOutcome`] whether or not the printer
//! cooperated; only a request that cannot be acted on gets a `400`.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use freight_printer::{NetworkPrinter, PRINT_RAW_PATH, PRINT_STATUS_PATH, Printer, into_outcome};
use shared::print::{PrintOutcome, PrintRawRequest, PrinterTarget};
use tracing::{info, instrument};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(PRINT_RAW_PATH, post(print_raw))
        .route(PRINT_STATUS_PATH, post(printer_status))
}

fn resolve(ip: &str, port: u16) -> AppResult<NetworkPrinter> {
    NetworkPrinter::new(ip.trim(), port).map_err(|e| AppError::invalid(e.to_string()))
}

/// POST /api/print/raw
#[instrument(skip_all)]
pub async fn print_raw(
    State(state): State<ServerState>,
    payload: Result<Json<PrintRawRequest>, JsonRejection>,
) -> AppResult<Json<PrintOutcome>> {
    let Json(req) = payload.map_err(|e| AppError::invalid(e.body_text()))?;

    let data = req
        .decode_data()
        .map_err(|e| AppError::invalid(format!("Payload is not valid base64: {}", e)))?;
    if data.is_empty() {
        return Err(AppError::invalid("Payload is empty"));
    }

    let printer = resolve(&req.ip, req.port)?.with_timeout(state.config.printer_timeout());
    info!(addr = %printer.addr(), bytes = data.len(), "Forwarding print job");

    let result = printer.print(&data).await;
    Ok(Json(into_outcome(result, "Printed successfully")))
}

/// POST /api/print/status
#[instrument(skip_all)]
pub async fn printer_status(
    State(state): State<ServerState>,
    payload: Result<Json<PrinterTarget>, JsonRejection>,
) -> AppResult<Json<PrintOutcome>> {
    let Json(target) = payload.map_err(|e| AppError::invalid(e.body_text()))?;
    let printer = resolve(&target.ip, target.port)?.with_timeout(state.config.printer_timeout());

    Ok(Json(into_outcome(printer.probe().await, "Printer is online")))
}
