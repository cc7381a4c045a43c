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


//! Dual writes of a ledger's transactions into the legacy and the shadow transactions table.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use crate::config::HistoryConfig;
use crate::error::InvalidArgumentError;
use crate::ledger::{LedgerCodec, LedgerTransaction};
use crate::transactions::batch::{BatchWriteError, TransactionBatchInsertBuilder};
use crate::transactions::normalize::transaction_to_row;
use crate::transactions::participants::TransactionParticipantsBatchInsertBuilder;
use crate::transactions::store::{TransactionStore, TransactionStoreError};
use crate::transactions::{TransactionBatchInsertError, TransactionNormalizeError};

#[derive(Debug)]
pub enum IngestError {
    InvalidArgumentError(InvalidArgumentError),
    NormalizeError(TransactionNormalizeError),
    WriteError(BatchWriteError),
    TransactionStoreError(TransactionStoreError),
}

impl IngestError {
    /// Whether the ledger contains something this crate cannot represent. Ingestion must not be
    /// retried after such an error.
    pub fn is_fatal(&self) -> bool {
        match self {
            IngestError::NormalizeError(err) => err.is_fatal(),
            _ => false,
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IngestError::InvalidArgumentError(err) => Some(err),
            IngestError::NormalizeError(err) => Some(err),
            IngestError::WriteError(err) => Some(err),
            IngestError::TransactionStoreError(err) => Some(err),
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IngestError::InvalidArgumentError(err) => err.fmt(f),
            IngestError::NormalizeError(err) => err.fmt(f),
            IngestError::WriteError(err) => err.fmt(f),
            IngestError::TransactionStoreError(err) => err.fmt(f),
        }
    }
}

impl From<InvalidArgumentError> for IngestError {
    fn from(err: InvalidArgumentError) -> Self {
        IngestError::InvalidArgumentError(err)
    }
}

impl From<TransactionNormalizeError> for IngestError {
    fn from(err: TransactionNormalizeError) -> Self {
        IngestError::NormalizeError(err)
    }
}

impl From<BatchWriteError> for IngestError {
    fn from(err: BatchWriteError) -> Self {
        IngestError::WriteError(err)
    }
}

impl From<TransactionBatchInsertError> for IngestError {
    fn from(err: TransactionBatchInsertError) -> Self {
        match err {
            TransactionBatchInsertError::NormalizeError(err) => IngestError::NormalizeError(err),
            TransactionBatchInsertError::WriteError(err) => IngestError::WriteError(err),
        }
    }
}

impl From<TransactionStoreError> for IngestError {
    fn from(err: TransactionStoreError) -> Self {
        IngestError::TransactionStoreError(err)
    }
}

/// Writes the transactions of ledger `sequence` into the legacy and the shadow table of
/// `config`, and links every transaction to the accounts taking part in it.
///
/// Each transaction is normalized once and the same row is buffered for both tables. Returns the
/// number of transactions written.
///
/// # Arguments
///
///  * `store` - the store holding the history tables
///  * `codec` - encodes the ledger payloads for the blob columns
///  * `config` - names the legacy and shadow tables and bounds the batch size
///  * `sequence` - the ledger the transactions were applied in
///  * `transactions` - the ledger's transactions in application order
pub fn ingest_ledger(
    store: &dyn TransactionStore,
    codec: &dyn LedgerCodec,
    config: &HistoryConfig,
    sequence: u32,
    transactions: &[LedgerTransaction],
) -> Result<usize, IngestError> {
    write_ledger(store, codec, config, sequence, transactions).map_err(|err| {
        error!("Stopping ingestion of ledger {}: {}", sequence, err);
        err
    })
}

fn write_ledger(
    store: &dyn TransactionStore,
    codec: &dyn LedgerCodec,
    config: &HistoryConfig,
    sequence: u32,
    transactions: &[LedgerTransaction],
) -> Result<usize, IngestError> {
    let mut legacy = TransactionBatchInsertBuilder::new(
        store,
        codec,
        config.legacy_table(),
        config.max_batch_size(),
    )?;
    let mut shadow = TransactionBatchInsertBuilder::new(
        store,
        codec,
        config.shadow_table(),
        config.max_batch_size(),
    )?;

    let mut participants_by_transaction = Vec::with_capacity(transactions.len());
    for transaction in transactions {
        let row = transaction_to_row(codec, transaction, sequence)?;
        participants_by_transaction.push((row.id, transaction.participants()));
        legacy.add_row(row.clone())?;
        shadow.add_row(row)?;
    }

    legacy.finalize()?;
    shadow.finalize()?;

    let addresses: Vec<String> = participants_by_transaction
        .iter()
        .flat_map(|(_, addresses)| addresses.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let account_ids = if addresses.is_empty() {
        Default::default()
    } else {
        store.create_accounts(&addresses)?
    };

    let mut participants =
        TransactionParticipantsBatchInsertBuilder::new(store, config.max_batch_size())?;
    for (transaction_id, addresses) in &participants_by_transaction {
        for address in addresses {
            let account_id = account_ids.get(address).ok_or_else(|| {
                TransactionStoreError::NotFoundError(format!(
                    "Account {} was not created",
                    address
                ))
            })?;
            participants.add(*transaction_id, *account_id)?;
        }
    }
    participants.finalize()?;

    debug!(
        "Ingested {} transactions of ledger {}",
        transactions.len(),
        sequence
    );

    Ok(transactions.len())
}
