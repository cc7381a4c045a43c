// Copyright 2018-2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded batch writes.
//!
//! A `BatchInsertBuilder` accumulates rows for a single destination and hands them to its
//! `BatchSink` in groups of at most `max_batch_size` rows. Groups are committed independently: a
//! failed flush leaves earlier groups committed and keeps the failed group's rows buffered, so
//! the caller may retry or abandon the ingestion run.

use std::error::Error;
use std::fmt;

use crate::error::InvalidArgumentError;
use crate::ledger::{LedgerCodec, LedgerTransaction};

use super::normalize::transaction_to_row;
use super::store::{TransactionStore, TransactionStoreError};
use super::{TransactionBatchInsertError, TransactionRow, TransactionTable};

/// A destination which commits one group of rows at a time.
pub trait BatchSink<R> {
    /// Commits every row in `rows`, or none of them.
    fn flush(&self, rows: &[R]) -> Result<(), TransactionStoreError>;

    /// Names the destination in log messages.
    fn describe(&self) -> String;
}

/// Returned when a flush fails. `pending` counts the rows which were buffered and not committed
/// when the failure happened; they remain in the buffer.
#[derive(Debug)]
pub struct BatchWriteError {
    pending: usize,
    source: TransactionStoreError,
}

impl BatchWriteError {
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn store_error(&self) -> &TransactionStoreError {
        &self.source
    }
}

impl Error for BatchWriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl fmt::Display for BatchWriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Unable to write batch, {} rows pending: {}",
            self.pending, self.source
        )
    }
}

pub struct BatchInsertBuilder<R, S> {
    sink: S,
    max_batch_size: usize,
    rows: Vec<R>,
    flushes: usize,
}

impl<R, S: BatchSink<R>> BatchInsertBuilder<R, S> {
    pub fn new(sink: S, max_batch_size: usize) -> Result<Self, InvalidArgumentError> {
        if max_batch_size == 0 {
            return Err(InvalidArgumentError::new(
                "max_batch_size".to_string(),
                "must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            sink,
            max_batch_size,
            rows: Vec::with_capacity(max_batch_size),
            flushes: 0,
        })
    }

    /// Appends a row, flushing once the buffer holds `max_batch_size` rows.
    pub fn add(&mut self, row: R) -> Result<(), BatchWriteError> {
        self.rows.push(row);
        if self.rows.len() >= self.max_batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Flushes whatever is still buffered. Does nothing when the buffer is empty.
    pub fn finalize(&mut self) -> Result<(), BatchWriteError> {
        if self.rows.is_empty() {
            return Ok(());
        }
        self.flush()
    }

    /// Number of rows buffered and not yet committed.
    pub fn pending(&self) -> usize {
        self.rows.len()
    }

    /// Number of successful flushes so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn flush(&mut self) -> Result<(), BatchWriteError> {
        while !self.rows.is_empty() {
            let group = self.max_batch_size.min(self.rows.len());
            debug!("Flushing {} rows to {}", group, self.sink.describe());

            if let Err(err) = self.sink.flush(&self.rows[..group]) {
                return Err(BatchWriteError {
                    pending: self.rows.len(),
                    source: err,
                });
            }

            self.rows.drain(..group);
            self.flushes += 1;
        }

        Ok(())
    }
}

/// Writes transaction rows into one transactions table.
pub struct TransactionTableSink<'a> {
    store: &'a dyn TransactionStore,
    table: TransactionTable,
}

impl<'a> TransactionTableSink<'a> {
    pub fn new(store: &'a dyn TransactionStore, table: TransactionTable) -> Self {
        Self { store, table }
    }

    pub fn table(&self) -> TransactionTable {
        self.table
    }
}

impl<'a> BatchSink<TransactionRow> for TransactionTableSink<'a> {
    fn flush(&self, rows: &[TransactionRow]) -> Result<(), TransactionStoreError> {
        self.store.add_transactions(self.table, rows)
    }

    fn describe(&self) -> String {
        self.table.to_string()
    }
}

/// Normalizes ledger transactions and buffers the rows for one transactions table.
pub struct TransactionBatchInsertBuilder<'a> {
    codec: &'a dyn LedgerCodec,
    builder: BatchInsertBuilder<TransactionRow, TransactionTableSink<'a>>,
}

impl<'a> TransactionBatchInsertBuilder<'a> {
    pub fn new(
        store: &'a dyn TransactionStore,
        codec: &'a dyn LedgerCodec,
        table: TransactionTable,
        max_batch_size: usize,
    ) -> Result<Self, InvalidArgumentError> {
        Ok(Self {
            codec,
            builder: BatchInsertBuilder::new(
                TransactionTableSink::new(store, table),
                max_batch_size,
            )?,
        })
    }

    /// Normalizes `transaction`, applied in ledger `sequence`, and buffers its row.
    pub fn add(
        &mut self,
        transaction: &LedgerTransaction,
        sequence: u32,
    ) -> Result<(), TransactionBatchInsertError> {
        let row = transaction_to_row(self.codec, transaction, sequence)?;
        self.builder.add(row)?;
        Ok(())
    }

    /// Buffers a row which was already normalized.
    pub fn add_row(&mut self, row: TransactionRow) -> Result<(), TransactionBatchInsertError> {
        self.builder.add(row)?;
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<(), TransactionBatchInsertError> {
        self.builder.finalize()?;
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.builder.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};

    use crate::error::InternalError;
    use crate::ledger::json::JsonLedgerCodec;
    use crate::ledger::TransactionResultCode;
    use crate::transactions::filter::TransactionFilter;
    use crate::transactions::store::MemoryTransactionStore;
    use crate::transactions::tests::test_ledger_transaction;

    /// Records every group it is handed; fails the flush with the given (1 based) number.
    #[derive(Default)]
    struct RecordingSink {
        groups: RefCell<Vec<Vec<u32>>>,
        attempts: Cell<usize>,
        fail_on: Option<usize>,
    }

    impl BatchSink<u32> for RecordingSink {
        fn flush(&self, rows: &[u32]) -> Result<(), TransactionStoreError> {
            self.attempts.set(self.attempts.get() + 1);
            if self.fail_on == Some(self.attempts.get()) {
                return Err(TransactionStoreError::InternalError(
                    InternalError::with_message("connection reset".to_string()),
                ));
            }
            self.groups.borrow_mut().push(rows.to_vec());
            Ok(())
        }

        fn describe(&self) -> String {
            "recording sink".to_string()
        }
    }

    #[test]
    fn test_flush_count_is_rows_over_batch_size_rounded_up() {
        for (rows, max_batch_size) in &[(0, 3), (1, 3), (3, 3), (7, 3), (9, 3), (10, 1), (5, 100)] {
            let mut builder = BatchInsertBuilder::new(RecordingSink::default(), *max_batch_size)
                .expect("valid batch size");
            for row in 0..*rows {
                builder.add(row).expect("unable to add row");
            }
            builder.finalize().expect("unable to finalize");

            let expected = (*rows as usize + max_batch_size - 1) / max_batch_size;
            assert_eq!(builder.flushes(), expected, "{} rows, batches of {}", rows, max_batch_size);
            assert_eq!(
                builder.sink().groups.borrow().concat(),
                (0..*rows).collect::<Vec<u32>>()
            );
            assert!(builder
                .sink()
                .groups
                .borrow()
                .iter()
                .all(|group| group.len() <= *max_batch_size));
        }
    }

    #[test]
    fn test_finalize_persists_partial_group() {
        let mut builder =
            BatchInsertBuilder::new(RecordingSink::default(), 4).expect("valid batch size");
        for row in 0..6 {
            builder.add(row).expect("unable to add row");
        }

        assert_eq!(builder.pending(), 2);
        builder.finalize().expect("unable to finalize");
        assert_eq!(builder.pending(), 0);
        assert_eq!(*builder.sink().groups.borrow(), vec![vec![0, 1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_failed_flush_keeps_rows_for_retry() {
        let sink = RecordingSink {
            fail_on: Some(2),
            ..Default::default()
        };
        let mut builder = BatchInsertBuilder::new(sink, 2).expect("valid batch size");
        builder.add(1).expect("unable to add row");
        builder.add(2).expect("unable to add row");
        builder.add(3).expect("unable to add row");

        let err = builder.add(4).unwrap_err();
        assert_eq!(err.pending(), 2);
        assert_eq!(builder.pending(), 2);
        assert!(err.to_string().contains("connection reset"));

        builder.finalize().expect("unable to retry");
        assert_eq!(*builder.sink().groups.borrow(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        assert!(BatchInsertBuilder::new(RecordingSink::default(), 0).is_err());
    }

    #[test]
    fn test_transaction_builder_writes_target_table() {
        let store = MemoryTransactionStore::new();
        let codec = JsonLedgerCodec::new();
        let mut builder =
            TransactionBatchInsertBuilder::new(&store, &codec, TransactionTable::ExpHistory, 2)
                .expect("valid batch size");

        for index in 1..=3 {
            builder
                .add(&test_ledger_transaction(index, TransactionResultCode::TxSuccess), 8)
                .expect("unable to add transaction");
        }
        assert_eq!(builder.pending(), 1);
        builder.finalize().expect("unable to finalize");

        let filter = TransactionFilter::new().include_failed();
        let rows = store
            .list_transactions(TransactionTable::ExpHistory, &filter)
            .expect("unable to list");
        assert_eq!(rows.len(), 3);
        assert!(store
            .list_transactions(TransactionTable::History, &filter)
            .expect("unable to list")
            .is_empty());
    }

    #[test]
    fn test_transaction_builder_stops_on_unrecognized_memo() {
        let store = MemoryTransactionStore::new();
        let codec = JsonLedgerCodec::new();
        let mut builder =
            TransactionBatchInsertBuilder::new(&store, &codec, TransactionTable::History, 10)
                .expect("valid batch size");
        let mut transaction = test_ledger_transaction(1, TransactionResultCode::TxSuccess);
        transaction.envelope.tx.memo = crate::ledger::Memo::Unrecognized(5);

        match builder.add(&transaction, 8) {
            Err(TransactionBatchInsertError::NormalizeError(err)) => assert!(err.is_fatal()),
            other => panic!("expected a normalize error, got {:?}", other),
        }
        assert_eq!(builder.pending(), 0);
    }
}
