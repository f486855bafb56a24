//! Bluetooth LE printing
//!
//! Pairing needs a user gesture in the host, so it happens outside this
//! crate: the host discovers a writable GATT characteristic and records it
//! as a [`BluetoothConnection`]. The connection is kept in a
//! [`ConnectionStore`] so the next session can reconnect without pairing
//! again.
//!
//! Low-energy links accept small writes only, so the payload goes out in
//! fixed-size chunks with a pause between them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{PrintError, PrintResult};
use crate::printer::Printer;

/// Bytes per GATT write
pub const DEFAULT_CHUNK_SIZE: usize = 40;

/// Pause between GATT writes
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(100);

/// A paired printer's GATT endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BluetoothConnection {
    pub device_id: String,
    pub service_uuid: String,
    pub characteristic_uuid: String,
}

/// Host-side GATT characteristic writer
#[allow(async_fn_in_trait)]
pub trait GattWriter {
    /// Write one chunk to the connection's characteristic
    async fn write(&self, connection: &BluetoothConnection, chunk: &[u8]) -> PrintResult<()>;

    /// Whether the device is currently connected
    async fn is_connected(&self, connection: &BluetoothConnection) -> bool;
}

/// Persisted pairing state (a small JSON file)
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    path: PathBuf,
}

impl ConnectionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the saved connection; a missing file means never paired
    pub fn load(&self) -> PrintResult<Option<BluetoothConnection>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(connection) => Ok(Some(connection)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable pairing file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, connection: &BluetoothConnection) -> PrintResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(connection)
            .map_err(|e| PrintError::Bluetooth(format!("Serialize pairing: {}", e)))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Forget the paired device
    pub fn clear(&self) -> PrintResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Bluetooth LE receipt printer
///
/// One instance per print session; nothing is shared between instances.
pub struct BluetoothPrinter<W> {
    writer: W,
    connection: Option<BluetoothConnection>,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl<W: GattWriter> BluetoothPrinter<W> {
    pub fn new(writer: W, connection: Option<BluetoothConnection>) -> Self {
        Self {
            writer,
            connection,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: DEFAULT_CHUNK_DELAY,
        }
    }

    /// Restore the pairing saved by a previous session
    pub fn from_store(writer: W, store: &ConnectionStore) -> PrintResult<Self> {
        Ok(Self::new(writer, store.load()?))
    }

    /// Record a freshly paired device and remember it for later sessions
    #[instrument(skip(self, store), fields(device = %connection.device_id))]
    pub fn pair(&mut self, connection: BluetoothConnection, store: &ConnectionStore) -> PrintResult<()> {
        store.save(&connection)?;
        info!("Bluetooth printer paired");
        self.connection = Some(connection);
        Ok(())
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_chunk_delay(mut self, chunk_delay: Duration) -> Self {
        self.chunk_delay = chunk_delay;
        self
    }

    pub fn connection(&self) -> Option<&BluetoothConnection> {
        self.connection.as_ref()
    }
}

impl<W: GattWriter> Printer for BluetoothPrinter<W> {
    #[instrument(skip(self, data), fields(data_len = data.len(), chunk_size = self.chunk_size))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let connection = self.connection.as_ref().ok_or(PrintError::NotPaired)?;

        for (idx, chunk) in data.chunks(self.chunk_size).enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.chunk_delay).await;
            }
            debug!(chunk = idx, len = chunk.len(), "Writing GATT chunk");
            self.writer.write(connection, chunk).await?;
        }

        info!(device = %connection.device_id, "Bluetooth print job sent");
        Ok(())
    }

    async fn is_online(&self) -> bool {
        match &self.connection {
            Some(connection) => self.writer.is_connected(connection).await,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingWriter {
        chunks: Mutex<Vec<Vec<u8>>>,
        fail_at: Option<usize>,
    }

    impl GattWriter for RecordingWriter {
        async fn write(&self, _connection: &BluetoothConnection, chunk: &[u8]) -> PrintResult<()> {
            let mut chunks = self.chunks.lock().unwrap();
            if self.fail_at == Some(chunks.len()) {
                return Err(PrintError::Bluetooth("GATT operation failed".to_string()));
            }
            chunks.push(chunk.to_vec());
            Ok(())
        }

        async fn is_connected(&self, _connection: &BluetoothConnection) -> bool {
            true
        }
    }

    fn connection() -> BluetoothConnection {
        BluetoothConnection {
            device_id: "AA:BB:CC:DD:EE:FF".to_string(),
            service_uuid: "000018f0-0000-1000-8000-00805f9b34fb".to_string(),
            characteristic_uuid: "00002af1-0000-1000-8000-00805f9b34fb".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let printer = BluetoothPrinter::new(RecordingWriter::default(), None);
        assert_eq!(printer.chunk_size, 40);
        assert_eq!(printer.chunk_delay, Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_chunks_in_order() {
        let printer = BluetoothPrinter::new(RecordingWriter::default(), Some(connection()))
            .with_chunk_delay(Duration::from_millis(1));

        let data: Vec<u8> = (0..=100).collect();
        printer.print(&data).await.unwrap();

        let chunks = printer.writer.chunks.lock().unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 40);
        assert_eq!(chunks[2].len(), 21);
        assert_eq!(chunks.concat(), data);
    }

    #[tokio::test]
    async fn test_not_paired() {
        let printer = BluetoothPrinter::new(RecordingWriter::default(), None);
        let err = printer.print(b"x").await.unwrap_err();
        assert!(matches!(err, PrintError::NotPaired));
        assert!(!printer.is_online().await);
    }

    #[tokio::test]
    async fn test_write_failure_stops_job() {
        let writer = RecordingWriter {
            fail_at: Some(1),
            ..Default::default()
        };
        let printer = BluetoothPrinter::new(writer, Some(connection()))
            .with_chunk_delay(Duration::ZERO);

        let err = printer.print(&[0u8; 120]).await.unwrap_err();
        assert!(matches!(err, PrintError::Bluetooth(_)));
        assert_eq!(printer.writer.chunks.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_store_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConnectionStore::new(dir.path().join("bt").join("printer.json"));

        assert_eq!(store.load().unwrap(), None);

        let mut printer = BluetoothPrinter::new(RecordingWriter::default(), None);
        printer.pair(connection(), &store).unwrap();
        assert_eq!(printer.connection(), Some(&connection()));

        let restored = BluetoothPrinter::from_store(RecordingWriter::default(), &store).unwrap();
        assert_eq!(restored.connection(), Some(&connection()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printer.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(ConnectionStore::new(&path).load().unwrap(), None);
    }
}
