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

//! Verification that a shadow table holds exactly the rows of its legacy table.

use std::ops::RangeInclusive;

use crate::order_key::OrderKey;

use super::filter::TransactionFilter;
use super::store::{StoredTransaction, TransactionStore, TransactionStoreError};
use super::TransactionTable;

/// Compares two ordered row sets with a column equality function.
///
/// The sets agree when they have the same length and every pair of rows at the same position is
/// equal. There is no partial verdict.
pub struct ConsistencyChecker<R, F>
where
    F: Fn(&R, &R) -> bool,
{
    same_columns: F,
    _row: std::marker::PhantomData<fn(&R)>,
}

impl<R, F> ConsistencyChecker<R, F>
where
    F: Fn(&R, &R) -> bool,
{
    pub fn new(same_columns: F) -> Self {
        Self {
            same_columns,
            _row: std::marker::PhantomData,
        }
    }

    pub fn verify(&self, legacy: &[R], shadow: &[R]) -> bool {
        legacy.len() == shadow.len()
            && legacy
                .iter()
                .zip(shadow.iter())
                .all(|(legacy, shadow)| (self.same_columns)(legacy, shadow))
    }
}

/// Checks, ledger by ledger, that the shadow transactions table matches the legacy one.
pub struct TransactionConsistencyChecker<'a> {
    store: &'a dyn TransactionStore,
    legacy: TransactionTable,
    shadow: TransactionTable,
}

impl<'a> TransactionConsistencyChecker<'a> {
    pub fn new(
        store: &'a dyn TransactionStore,
        legacy: TransactionTable,
        shadow: TransactionTable,
    ) -> Self {
        Self {
            store,
            legacy,
            shadow,
        }
    }

    /// Returns whether both tables hold the same rows for the ledger. Every column except the
    /// write timestamps is compared in its persisted form; failed transactions are included.
    /// A value which no `TransactionRow` can hold is a difference, not an error.
    pub fn check(&self, ledger_sequence: u32) -> Result<bool, TransactionStoreError> {
        let filter = TransactionFilter::new()
            .for_id_range(OrderKey::ledger_range(ledger_sequence))
            .include_failed();

        let legacy = self.store.list_stored_transactions(self.legacy, &filter)?;
        let shadow = self.store.list_stored_transactions(self.shadow, &filter)?;

        let valid =
            ConsistencyChecker::<StoredTransaction, _>::new(StoredTransaction::same_columns)
                .verify(&legacy, &shadow);

        if valid {
            info!(
                "Ledger {}: {} matches {} ({} transactions)",
                ledger_sequence,
                self.shadow,
                self.legacy,
                legacy.len()
            );
        } else {
            warn!(
                "Ledger {}: {} does not match {} ({} and {} transactions)",
                ledger_sequence,
                self.shadow,
                self.legacy,
                shadow.len(),
                legacy.len()
            );
        }

        Ok(valid)
    }

    /// Returns whether every ledger in `ledgers` is consistent. Stops at the first ledger which
    /// is not.
    pub fn check_ledgers(
        &self,
        ledgers: RangeInclusive<u32>,
    ) -> Result<bool, TransactionStoreError> {
        for ledger_sequence in ledgers {
            if !self.check(ledger_sequence)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ledger::json::JsonLedgerCodec;
    use crate::ledger::TransactionResultCode;
    use crate::transactions::normalize::transaction_to_row;
    use crate::transactions::store::MemoryTransactionStore;
    use crate::transactions::TransactionRow;
    use crate::transactions::tests::test_ledger_transaction;

    const LEDGER: u32 = 64;

    fn ledger_rows(sequence: u32) -> Vec<TransactionRow> {
        let codec = JsonLedgerCodec::new();
        vec![
            TransactionResultCode::TxSuccess,
            TransactionResultCode::TxFailed,
            TransactionResultCode::TxSuccess,
        ]
        .into_iter()
        .enumerate()
        .map(|(index, code)| {
            transaction_to_row(&codec, &test_ledger_transaction(index as u32 + 1, code), sequence)
                .expect("unable to normalize")
        })
        .collect()
    }

    /// Writes the same rows to both tables; the shadow copy is stamped later.
    fn dual_written(rows: &[TransactionRow]) -> MemoryTransactionStore {
        let store = MemoryTransactionStore::new();
        store
            .add_transactions(TransactionTable::History, rows)
            .expect("unable to add legacy");
        let shadow: Vec<TransactionRow> = rows
            .iter()
            .cloned()
            .map(|mut row| {
                row.created_at = row.created_at + chrono::Duration::milliseconds(3);
                row.updated_at = row.created_at;
                row
            })
            .collect();
        store
            .add_transactions(TransactionTable::ExpHistory, &shadow)
            .expect("unable to add shadow");
        store
    }

    fn store_with(legacy: &[TransactionRow], shadow: &[TransactionRow]) -> MemoryTransactionStore {
        let store = MemoryTransactionStore::new();
        store
            .add_transactions(TransactionTable::History, legacy)
            .expect("unable to add legacy");
        store
            .add_transactions(TransactionTable::ExpHistory, shadow)
            .expect("unable to add shadow");
        store
    }

    fn mutation(
        mutate: impl Fn(&mut TransactionRow) + 'static,
    ) -> Box<dyn Fn(&mut TransactionRow)> {
        Box::new(mutate)
    }

    fn checker(store: &MemoryTransactionStore) -> TransactionConsistencyChecker {
        TransactionConsistencyChecker::new(
            store,
            TransactionTable::History,
            TransactionTable::ExpHistory,
        )
    }

    #[test]
    fn test_generic_checker() {
        let checker = ConsistencyChecker::new(|a: &(i32, char), b: &(i32, char)| a == b);

        assert!(checker.verify(&[], &[]));
        assert!(checker.verify(&[(1, 'a'), (2, 'b')], &[(1, 'a'), (2, 'b')]));
        assert!(!checker.verify(&[(1, 'a'), (2, 'b')], &[(1, 'a')]));
        assert!(!checker.verify(&[(1, 'a'), (2, 'b')], &[(2, 'b'), (1, 'a')]));
    }

    #[test]
    fn test_identical_tables_are_consistent() {
        let rows = ledger_rows(LEDGER);
        let store = dual_written(&rows);

        assert!(checker(&store).check(LEDGER).expect("unable to check"));
        assert!(checker(&store).check(LEDGER).expect("unable to check"));
        assert!(checker(&store).check(LEDGER + 1).expect("unable to check"));
    }

    #[test]
    fn test_missing_shadow_row_is_inconsistent() {
        let rows = ledger_rows(LEDGER);
        let store = MemoryTransactionStore::new();
        store
            .add_transactions(TransactionTable::History, &rows)
            .expect("unable to add legacy");
        store
            .add_transactions(TransactionTable::ExpHistory, &rows[..2])
            .expect("unable to add shadow");

        assert!(!checker(&store).check(LEDGER).expect("unable to check"));
    }

    #[test]
    fn test_every_single_column_mutation_is_detected() {
        let rows = ledger_rows(LEDGER);
        let mutations: Vec<(&str, Box<dyn Fn(&mut TransactionRow)>)> = vec![
            ("id", mutation(|row| row.id += 1)),
            ("transaction_hash", mutation(|row| row.transaction_hash = "ab".repeat(32))),
            ("ledger_sequence", mutation(|row| row.ledger_sequence += 1)),
            ("application_order", mutation(|row| row.application_order += 7)),
            ("account", mutation(|row| row.account = "GBXGQJWV".to_string())),
            ("account_sequence", mutation(|row| row.account_sequence = "12".to_string())),
            ("max_fee", mutation(|row| row.max_fee += 1)),
            ("fee_charged", mutation(|row| row.fee_charged = None)),
            ("operation_count", mutation(|row| row.operation_count += 1)),
            ("tx_envelope", mutation(|row| row.tx_envelope.push('A'))),
            ("tx_result", mutation(|row| row.tx_result.push('A'))),
            ("tx_meta", mutation(|row| row.tx_meta.push('A'))),
            ("tx_fee_meta", mutation(|row| row.tx_fee_meta.push('A'))),
            ("signatures", mutation(|row| row.signatures.reverse())),
            ("signature count", mutation(|row| row.signatures.truncate(1))),
            ("memo_type", mutation(|row| row.memo_type = crate::transactions::MemoType::Id)),
            ("memo", mutation(|row| row.memo = Some("hello".to_string()))),
            ("valid_after", mutation(|row| row.valid_after = Some(101))),
            ("valid_before", mutation(|row| row.valid_before = None)),
            ("successful", mutation(|row| row.successful = Some(true))),
        ];

        for (column, mutate) in &mutations {
            let mut legacy = rows.clone();
            mutate(&mut legacy[1]);
            assert!(
                !checker(&store_with(&legacy, &rows))
                    .check(LEDGER)
                    .expect("unable to check"),
                "mutation of {} was not detected",
                column
            );

            legacy[1] = rows[1].clone();
            assert!(
                checker(&store_with(&legacy, &rows))
                    .check(LEDGER)
                    .expect("unable to check"),
                "restoring {} did not restore consistency",
                column
            );
        }
    }

    #[test]
    fn test_check_ledgers_requires_every_ledger() {
        let mut rows = ledger_rows(LEDGER);
        rows.extend(ledger_rows(LEDGER + 1));
        let store = dual_written(&rows);
        assert!(checker(&store)
            .check_ledgers(LEDGER..=LEDGER + 2)
            .expect("unable to check"));

        let mut extra = ledger_rows(LEDGER + 2);
        extra.truncate(1);
        store
            .add_transactions(TransactionTable::History, &extra)
            .expect("unable to add");
        assert!(!checker(&store)
            .check_ledgers(LEDGER..=LEDGER + 2)
            .expect("unable to check"));
    }
}
