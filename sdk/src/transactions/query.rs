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

//! Reads of transaction rows which re-check every row against its stored result.

use std::collections::HashMap;

use crate::error::{DataCorruptionError, InvalidArgumentError};
use crate::hex;
use crate::ledger::LedgerCodec;

use super::filter::TransactionFilter;
use super::store::TransactionStore;
use super::{TransactionQueryError, TransactionRow, TransactionTable};

/// Serves transaction reads from one table.
///
/// `select` returns the rows chosen by a `TransactionFilter` only after decoding the stored
/// result of each of them and confirming that the `successful` column agrees with it. Any row
/// which does not is reported as `DataCorruption`; no rows are returned in that case.
pub struct TransactionQuery<'a> {
    store: &'a dyn TransactionStore,
    codec: &'a dyn LedgerCodec,
    table: TransactionTable,
}

impl<'a> TransactionQuery<'a> {
    pub fn new(
        store: &'a dyn TransactionStore,
        codec: &'a dyn LedgerCodec,
        table: TransactionTable,
    ) -> Self {
        Self {
            store,
            codec,
            table,
        }
    }

    pub fn table(&self) -> TransactionTable {
        self.table
    }

    pub fn select(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRow>, TransactionQueryError> {
        let rows = self.store.list_transactions(self.table, filter)?;

        for row in &rows {
            self.verify(row, filter.includes_failed()).map_err(|err| {
                error!("{} in {}", err, self.table);
                err
            })?;
        }

        Ok(rows)
    }

    /// Loads a single transaction by its hex encoded hash.
    pub fn transaction_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionQueryError> {
        hex::parse_hex(hash).map_err(|err| {
            TransactionQueryError::InvalidArgumentError(InvalidArgumentError::new(
                "hash".to_string(),
                err.to_string(),
            ))
        })?;

        Ok(self
            .store
            .get_transaction_by_hash(self.table, &hash.to_lowercase())?)
    }

    /// Loads the transactions with the given ids, keyed by id. Unknown ids are absent from the
    /// result.
    pub fn transactions_by_ids(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, TransactionRow>, TransactionQueryError> {
        if ids.is_empty() {
            return Err(TransactionQueryError::InvalidArgumentError(
                InvalidArgumentError::new("ids".to_string(), "no id arguments provided".to_string()),
            ));
        }

        Ok(self
            .store
            .list_transactions_by_ids(self.table, ids)?
            .into_iter()
            .map(|row| (row.id, row))
            .collect())
    }

    fn verify(&self, row: &TransactionRow, include_failed: bool) -> Result<(), DataCorruptionError> {
        let result = base64::decode(&row.tx_result)
            .map_err(|err| {
                DataCorruptionError::from_source_with_message(
                    Box::new(err),
                    format!("unable to decode result of {}", row.transaction_hash),
                )
            })
            .and_then(|bytes| {
                self.codec.decode_result(&bytes).map_err(|err| {
                    DataCorruptionError::from_source_with_message(
                        Box::new(err),
                        format!("unable to decode result of {}", row.transaction_hash),
                    )
                })
            })?;
        let result_success = result.is_success();

        if !include_failed && (!row.is_successful() || !result_success) {
            return Err(DataCorruptionError::with_message(format!(
                "`include_failed=false` but returned transaction is failed: {}",
                row.transaction_hash
            )));
        }

        if row.is_successful() && !result_success {
            return Err(DataCorruptionError::with_message(format!(
                "`successful=true` but returned transaction is not success: {} {}",
                row.transaction_hash, row.tx_result
            )));
        }

        if !row.is_successful() && result_success {
            return Err(DataCorruptionError::with_message(format!(
                "`successful=false` but returned transaction is success: {} {}",
                row.transaction_hash, row.tx_result
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ledger::json::JsonLedgerCodec;
    use crate::ledger::TransactionResultCode;
    use crate::transactions::normalize::transaction_to_row;
    use crate::transactions::store::MemoryTransactionStore;
    use crate::transactions::tests::test_ledger_transaction;

    const ACCOUNT: &str = "GA5WBPYA5Y4WAEHXWR2UKO2UO4BUGHUQ74EUPKON2QHV4WRHOIRNKKH2";

    fn row(index: u32, code: TransactionResultCode) -> TransactionRow {
        transaction_to_row(
            &JsonLedgerCodec::new(),
            &test_ledger_transaction(index, code),
            30,
        )
        .expect("unable to normalize")
    }

    /// Three successful and one failed transaction, all with `ACCOUNT` as participant.
    fn populated_store(rows: &[TransactionRow]) -> MemoryTransactionStore {
        let store = MemoryTransactionStore::new();
        store
            .add_transactions(TransactionTable::History, rows)
            .expect("unable to add");
        let accounts = store
            .create_accounts(&[ACCOUNT.to_string()])
            .expect("unable to create accounts");
        let participants: Vec<_> = rows
            .iter()
            .map(|row| crate::transactions::store::TransactionParticipant {
                history_transaction_id: row.id,
                history_account_id: accounts[ACCOUNT],
            })
            .collect();
        store
            .add_transaction_participants(&participants)
            .expect("unable to add participants");
        store
    }

    fn mixed_rows() -> Vec<TransactionRow> {
        vec![
            row(1, TransactionResultCode::TxSuccess),
            row(2, TransactionResultCode::TxFailed),
            row(3, TransactionResultCode::TxSuccess),
            row(4, TransactionResultCode::TxSuccess),
        ]
    }

    #[test]
    fn test_default_filter_returns_successful_subset() {
        let rows = mixed_rows();
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        let selected = query
            .select(&TransactionFilter::new().for_account(ACCOUNT))
            .expect("unable to select");

        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|row| row.successful == Some(true)));

        let all = query
            .select(&TransactionFilter::new().for_account(ACCOUNT).include_failed())
            .expect("unable to select");
        assert_eq!(all.len(), 4);
        assert_eq!(
            all.iter().filter(|row| row.successful == Some(false)).count(),
            1
        );
    }

    #[test]
    fn test_legacy_rows_without_flag_are_returned() {
        let mut rows = mixed_rows();
        rows[0].successful = None;
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        let selected = query
            .select(&TransactionFilter::new())
            .expect("unable to select");
        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].successful, None);
    }

    #[test]
    fn test_successful_flag_on_failed_result_is_corruption() {
        let mut rows = mixed_rows();
        rows[1].successful = Some(true);
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        let err = query
            .select(&TransactionFilter::new().for_account(ACCOUNT).include_failed())
            .unwrap_err();
        assert!(matches!(err, TransactionQueryError::DataCorruption(_)));
        assert!(err
            .to_string()
            .contains("Corrupted data! `successful=true` but returned transaction is not success"));

        let err = query
            .select(&TransactionFilter::new().for_account(ACCOUNT))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Corrupted data! `include_failed=false` but returned transaction is failed"));
    }

    #[test]
    fn test_failed_flag_on_successful_result_is_corruption() {
        let mut rows = mixed_rows();
        rows[2].successful = Some(false);
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        let err = query
            .select(&TransactionFilter::new().for_account(ACCOUNT).include_failed())
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Corrupted data! `successful=false` but returned transaction is success"));
    }

    #[test]
    fn test_unset_flag_on_failed_result_is_corruption() {
        let mut rows = mixed_rows();
        rows[1].successful = None;
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        let err = query.select(&TransactionFilter::new()).unwrap_err();
        assert!(err
            .to_string()
            .contains("`include_failed=false` but returned transaction is failed"));
    }

    #[test]
    fn test_undecodable_result_is_corruption() {
        let mut rows = mixed_rows();
        rows[0].tx_result = "not base64!".to_string();
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        assert!(matches!(
            query.select(&TransactionFilter::new()),
            Err(TransactionQueryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_transaction_by_hash() {
        let rows = mixed_rows();
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        let found = query
            .transaction_by_hash(&rows[2].transaction_hash.to_uppercase())
            .expect("unable to get");
        assert_eq!(found, Some(rows[2].clone()));
        assert_eq!(
            query
                .transaction_by_hash(&"ff".repeat(32))
                .expect("unable to get"),
            None
        );
        assert!(matches!(
            query.transaction_by_hash("xyz"),
            Err(TransactionQueryError::InvalidArgumentError(_))
        ));
    }

    #[test]
    fn test_transactions_by_ids() {
        let rows = mixed_rows();
        let store = populated_store(&rows);
        let codec = JsonLedgerCodec::new();
        let query = TransactionQuery::new(&store, &codec, TransactionTable::History);

        let by_id = query
            .transactions_by_ids(&[rows[0].id, rows[3].id, 1])
            .expect("unable to get");
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id[&rows[3].id], rows[3]);

        let err = query.transactions_by_ids(&[]).unwrap_err();
        assert!(err.to_string().contains("no id arguments provided"));
    }
}
