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

//! The storage boundary for transaction rows, accounts and participants.

pub(in crate) mod diesel;
mod error;
pub mod memory;
mod stored;

use std::collections::HashMap;

pub use self::diesel::DieselTransactionStore;
pub use error::TransactionStoreError;
pub use memory::MemoryTransactionStore;
pub use stored::StoredTransaction;

use super::filter::TransactionFilter;
use super::{TransactionRow, TransactionTable};

/// Links a transaction row to an account which took part in it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionParticipant {
    pub history_transaction_id: i64,
    pub history_account_id: i64,
}

pub trait TransactionStore: Send + Sync {
    /// Inserts the rows into `table` as one unit: either every row is written or none is.
    ///
    /// # Arguments
    ///
    ///  * `table` - the transactions table to write to
    ///  * `rows` - the rows to insert
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError>;

    /// Fetches the row with the given hex encoded hash.
    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError>;

    /// Fetches the rows with the given ids, ordered by id. Unknown ids are skipped.
    fn list_transactions_by_ids(
        &self,
        table: TransactionTable,
        ids: &[i64],
    ) -> Result<Vec<TransactionRow>, TransactionStoreError>;

    /// Fetches the rows selected by `filter`, ordered by id in the filter's direction.
    ///
    /// Only the predicates of the filter are evaluated; the returned rows are not checked
    /// against their stored results. Returns `NotFoundError` when the filter is scoped to an
    /// account which is not known.
    fn list_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRow>, TransactionStoreError>;

    /// Fetches the rows selected by `filter` as they are persisted, ordered like
    /// `list_transactions`. Values which do not fit a `TransactionRow` are returned as stored.
    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError>;

    /// Resolves addresses to account ids, creating accounts for addresses seen for the first
    /// time. Repeated calls return the same id for the same address.
    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError>;

    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError>;

    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError>;
}

impl<TS> TransactionStore for Box<TS>
where
    TS: TransactionStore + ?Sized,
{
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError> {
        (**self).add_transactions(table, rows)
    }

    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError> {
        (**self).get_transaction_by_hash(table, hash)
    }

    fn list_transactions_by_ids(
        &self,
        table: TransactionTable,
        ids: &[i64],
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        (**self).list_transactions_by_ids(table, ids)
    }

    fn list_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        (**self).list_transactions(table, filter)
    }

    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError> {
        (**self).list_stored_transactions(table, filter)
    }

    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError> {
        (**self).create_accounts(addresses)
    }

    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError> {
        (**self).get_account_id(address)
    }

    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError> {
        (**self).add_transaction_participants(participants)
    }
}
