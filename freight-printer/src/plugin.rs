//! Printing through a host print plugin (QZ Tray)
//!
//! The plugin owns the printer driver. Each receipt copy is submitted as
//! its styled HTML preview followed by a raw cut command, so the paper is
//! cut between copies whatever the driver does with the HTML page.

use tracing::{info, instrument};

use crate::encoding::to_wire_bytes;
use crate::error::{PrintError, PrintResult};
use crate::escpos::{Directive, to_escpos};
use crate::preview::{parse, render_html};
use crate::printer::Printer;

/// One unit of data handed to the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginJob {
    /// Rendered by the plugin's HTML engine
    Html(String),
    /// Passed through to the printer untouched
    Raw(Vec<u8>),
}

/// Host print plugin
///
/// Implementations translate plugin failures into
/// [`PrintError::PluginNotInstalled`] (plugin absent) and
/// [`PrintError::ConnectionRefused`] (plugin present but refusing).
#[allow(async_fn_in_trait)]
pub trait PrintPlugin {
    /// Open (or reuse) the plugin connection
    async fn connect(&self) -> PrintResult<()>;

    /// Resolve a configured printer name to the plugin's identifier
    async fn find_printer(&self, name: &str) -> PrintResult<Option<String>>;

    /// Submit jobs to a resolved printer
    async fn print(&self, printer: &str, jobs: &[PluginJob]) -> PrintResult<()>;
}

/// Printer driven through a [`PrintPlugin`]
pub struct PluginPrinter<P> {
    plugin: P,
    printer_name: String,
}

impl<P: PrintPlugin> PluginPrinter<P> {
    pub fn new(plugin: P, printer_name: impl Into<String>) -> PrintResult<Self> {
        let printer_name = printer_name.into();
        if printer_name.trim().is_empty() {
            return Err(PrintError::InvalidConfig("Printer name is empty".to_string()));
        }
        Ok(Self {
            plugin,
            printer_name,
        })
    }

    pub fn printer_name(&self) -> &str {
        &self.printer_name
    }

    async fn resolve(&self) -> PrintResult<String> {
        self.plugin.connect().await?;
        self.plugin
            .find_printer(&self.printer_name)
            .await?
            .ok_or_else(|| PrintError::PrinterNotFound(self.printer_name.clone()))
    }

    /// Print encoded receipt copies, one HTML page plus cut per copy
    #[instrument(skip(self, copies), fields(printer = %self.printer_name, copies = copies.len()))]
    pub async fn print_receipts(&self, copies: &[String]) -> PrintResult<()> {
        let printer = self.resolve().await?;
        let jobs = receipt_jobs(copies);
        self.plugin.print(&printer, &jobs).await?;
        info!("Receipts sent to plugin");
        Ok(())
    }
}

/// HTML preview + raw cut for each copy
pub fn receipt_jobs(copies: &[String]) -> Vec<PluginJob> {
    let cut = to_wire_bytes(&to_escpos(&[Directive::Cut]));
    copies
        .iter()
        .flat_map(|copy| {
            [
                PluginJob::Html(render_html(&parse(copy))),
                PluginJob::Raw(cut.clone()),
            ]
        })
        .collect()
}

impl<P: PrintPlugin> Printer for PluginPrinter<P> {
    #[instrument(skip(self, data), fields(printer = %self.printer_name, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let printer = self.resolve().await?;
        self.plugin
            .print(&printer, &[PluginJob::Raw(data.to_vec())])
            .await
    }

    async fn is_online(&self) -> bool {
        self.resolve().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::PrintErrorCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakePlugin {
        installed: bool,
        printers: Vec<String>,
        submitted: Mutex<Vec<(String, Vec<PluginJob>)>>,
    }

    impl PrintPlugin for FakePlugin {
        async fn connect(&self) -> PrintResult<()> {
            if self.installed {
                Ok(())
            } else {
                Err(PrintError::PluginNotInstalled("websocket closed".to_string()))
            }
        }

        async fn find_printer(&self, name: &str) -> PrintResult<Option<String>> {
            Ok(self.printers.iter().find(|p| p.as_str() == name).cloned())
        }

        async fn print(&self, printer: &str, jobs: &[PluginJob]) -> PrintResult<()> {
            self.submitted
                .lock()
                .unwrap()
                .push((printer.to_string(), jobs.to_vec()));
            Ok(())
        }
    }

    fn plugin_with(printer: &str) -> FakePlugin {
        FakePlugin {
            installed: true,
            printers: vec![printer.to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_each_copy_gets_html_then_cut() {
        let printer = PluginPrinter::new(plugin_with("TVS RP3160"), "TVS RP3160").unwrap();
        let copies = vec!["\x1B@first\n".to_string(), "\x1B@second\n".to_string()];

        printer.print_receipts(&copies).await.unwrap();

        let submitted = printer.plugin.submitted.lock().unwrap();
        let (name, jobs) = &submitted[0];
        assert_eq!(name, "TVS RP3160");
        assert_eq!(jobs.len(), 4);
        assert!(matches!(&jobs[0], PluginJob::Html(html) if html.contains("first")));
        assert_eq!(jobs[1], PluginJob::Raw(vec![0x1D, 0x56, 0x42, 0x03]));
        assert!(matches!(&jobs[2], PluginJob::Html(html) if html.contains("second")));
    }

    #[tokio::test]
    async fn test_plugin_missing() {
        let printer = PluginPrinter::new(FakePlugin::default(), "TVS RP3160").unwrap();
        let err = printer.print_receipts(&["x".to_string()]).await.unwrap_err();
        assert_eq!(err.code(), PrintErrorCode::PluginNotInstalled);
        assert!(!printer.is_online().await);
    }

    #[tokio::test]
    async fn test_printer_not_found() {
        let printer = PluginPrinter::new(plugin_with("Other"), "TVS RP3160").unwrap();
        let err = printer.print(b"x").await.unwrap_err();
        assert_eq!(err.code(), PrintErrorCode::PrinterNotFound);
    }

    #[test]
    fn test_empty_printer_name() {
        assert!(PluginPrinter::new(plugin_with("x"), "").is_err());
    }
}
