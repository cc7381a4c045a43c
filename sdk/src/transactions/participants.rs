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

//! Batched writes of the accounts taking part in each transaction.

use crate::error::InvalidArgumentError;

use super::batch::{BatchInsertBuilder, BatchSink, BatchWriteError};
use super::store::{TransactionParticipant, TransactionStore, TransactionStoreError};

pub struct TransactionParticipantsSink<'a> {
    store: &'a dyn TransactionStore,
}

impl<'a> BatchSink<TransactionParticipant> for TransactionParticipantsSink<'a> {
    fn flush(&self, rows: &[TransactionParticipant]) -> Result<(), TransactionStoreError> {
        self.store.add_transaction_participants(rows)
    }

    fn describe(&self) -> String {
        "history_transaction_participants".to_string()
    }
}

/// Buffers `(transaction id, account id)` pairs for `history_transaction_participants`.
pub struct TransactionParticipantsBatchInsertBuilder<'a> {
    builder: BatchInsertBuilder<TransactionParticipant, TransactionParticipantsSink<'a>>,
}

impl<'a> TransactionParticipantsBatchInsertBuilder<'a> {
    pub fn new(
        store: &'a dyn TransactionStore,
        max_batch_size: usize,
    ) -> Result<Self, InvalidArgumentError> {
        Ok(Self {
            builder: BatchInsertBuilder::new(TransactionParticipantsSink { store }, max_batch_size)?,
        })
    }

    pub fn add(&mut self, transaction_id: i64, account_id: i64) -> Result<(), BatchWriteError> {
        self.builder.add(TransactionParticipant {
            history_transaction_id: transaction_id,
            history_account_id: account_id,
        })
    }

    pub fn finalize(&mut self) -> Result<(), BatchWriteError> {
        self.builder.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ledger::json::JsonLedgerCodec;
    use crate::ledger::TransactionResultCode;
    use crate::transactions::filter::TransactionFilter;
    use crate::transactions::normalize::transaction_to_row;
    use crate::transactions::store::MemoryTransactionStore;
    use crate::transactions::tests::test_ledger_transaction;
    use crate::transactions::TransactionTable;

    #[test]
    fn test_participants_scope_account_reads() {
        let store = MemoryTransactionStore::new();
        let codec = JsonLedgerCodec::new();
        let rows: Vec<_> = (1..=3)
            .map(|index| {
                transaction_to_row(
                    &codec,
                    &test_ledger_transaction(index, TransactionResultCode::TxSuccess),
                    12,
                )
                .expect("unable to normalize")
            })
            .collect();
        store
            .add_transactions(TransactionTable::History, &rows)
            .expect("unable to add");

        let accounts = store
            .create_accounts(&["GA".to_string(), "GB".to_string()])
            .expect("unable to create accounts");

        let mut builder =
            TransactionParticipantsBatchInsertBuilder::new(&store, 2).expect("valid batch size");
        builder.add(rows[0].id, accounts["GA"]).expect("unable to add");
        builder.add(rows[2].id, accounts["GA"]).expect("unable to add");
        builder.add(rows[1].id, accounts["GB"]).expect("unable to add");
        builder.finalize().expect("unable to finalize");

        let ids: Vec<i64> = store
            .list_transactions(
                TransactionTable::History,
                &TransactionFilter::new().for_account("GA"),
            )
            .expect("unable to list")
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(ids, vec![rows[0].id, rows[2].id]);
    }
}
