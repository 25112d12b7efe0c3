//! Asynchronous CSV reader with batch interface
//!
//! Provides batches of operations from any async byte source. Used by the
//! concurrent replay strategy, which fans each batch out over worker tasks.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Operations
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{AccountError, Operation};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Streams the source; only the batch currently being filled is held in memory.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    skipped: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            skipped: 0,
        }
    }

    /// Read up to `batch_size` operations
    ///
    /// Malformed records are logged and skipped. Returns an empty vector once
    /// the source is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Operation> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let Some(next) = records.next().await else {
                break;
            };
            self.line_num += 1;

            let converted = next
                .map_err(AccountError::from)
                .and_then(|csv_record| convert_csv_record(csv_record, Some(self.line_num)));

            match converted {
                Ok(operation) => batch.push(operation),
                Err(e) => {
                    self.skipped += 1;
                    tracing::warn!("Skipping record: {}", e);
                }
            }
        }

        batch
    }

    /// Number of records skipped as malformed so far
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
