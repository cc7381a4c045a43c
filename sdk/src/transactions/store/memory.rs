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


use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::{StoredTransaction, TransactionParticipant, TransactionStore, TransactionStoreError};
use crate::error::{ConstraintViolationError, ConstraintViolationType, InternalError};
use crate::paging::Order;
use crate::transactions::filter::TransactionFilter;
use crate::transactions::{TransactionRow, TransactionTable};

#[derive(Default)]
struct MemoryTables {
    transactions: HashMap<TransactionTable, BTreeMap<i64, TransactionRow>>,
    accounts: HashMap<String, i64>,
    participants: HashSet<TransactionParticipant>,
}

/// Implementation of TransactionStore that keeps every table in memory. Useful for when
/// persistence isn't necessary.
#[derive(Clone, Default)]
pub struct MemoryTransactionStore {
    inner: Arc<Mutex<MemoryTables>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        MemoryTransactionStore {
            inner: Arc::new(Mutex::new(MemoryTables::default())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<MemoryTables>, TransactionStoreError> {
        self.inner.lock().map_err(|_| {
            TransactionStoreError::InternalError(InternalError::with_message(
                "Cannot access transactions: mutex lock poisoned".to_string(),
            ))
        })
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError> {
        let mut inner = self.lock()?;
        let stored = inner.transactions.entry(table).or_insert_with(BTreeMap::new);

        let mut seen = HashSet::new();
        for row in rows {
            if stored.contains_key(&row.id) || !seen.insert(row.id) {
                return Err(TransactionStoreError::ConstraintViolationError(
                    ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
                ));
            }
        }

        for row in rows {
            stored.insert(row.id, row.clone());
        }

        Ok(())
    }

    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError> {
        let inner = self.lock()?;

        Ok(inner.transactions.get(&table).and_then(|rows| {
            rows.values()
                .find(|row| row.transaction_hash == hash)
                .cloned()
        }))
    }

    fn list_transactions_by_ids(
        &self,
        table: TransactionTable,
        ids: &[i64],
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        let inner = self.lock()?;
        let ids: HashSet<i64> = ids.iter().copied().collect();

        Ok(inner
            .transactions
            .get(&table)
            .map(|rows| {
                rows.values()
                    .filter(|row| ids.contains(&row.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        let inner = self.lock()?;

        let participating = match filter.account() {
            Some(address) => {
                let account_id = inner.accounts.get(address).copied().ok_or_else(|| {
                    TransactionStoreError::NotFoundError(format!("account {}", address))
                })?;
                Some(
                    inner
                        .participants
                        .iter()
                        .filter(|p| p.history_account_id == account_id)
                        .map(|p| p.history_transaction_id)
                        .collect::<HashSet<i64>>(),
                )
            }
            None => None,
        };

        let rows = match inner.transactions.get(&table) {
            Some(rows) => rows,
            None => return Ok(Vec::new()),
        };

        let selected = rows.values().filter(|row| {
            participating
                .as_ref()
                .map(|ids| ids.contains(&row.id))
                .unwrap_or(true)
                && filter.admits_id(row.id)
                && filter.admits_success(row.successful)
        });

        let limit = filter
            .page_query()
            .map(|page| page.limit() as usize)
            .unwrap_or(usize::MAX);

        Ok(match filter.order() {
            Order::Asc => selected.take(limit).cloned().collect(),
            Order::Desc => selected.rev().take(limit).cloned().collect(),
        })
    }

    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError> {
        Ok(self
            .list_transactions(table, filter)?
            .iter()
            .map(StoredTransaction::from)
            .collect())
    }

    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError> {
        let mut inner = self.lock()?;

        let mut resolved = HashMap::new();
        for address in addresses {
            let next_id = inner.accounts.len() as i64 + 1;
            let id = *inner.accounts.entry(address.clone()).or_insert(next_id);
            resolved.insert(address.clone(), id);
        }

        Ok(resolved)
    }

    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError> {
        Ok(self.lock()?.accounts.get(address).copied())
    }

    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError> {
        let mut inner = self.lock()?;
        inner.participants.extend(participants.iter().cloned());
        Ok(())
    }
}
