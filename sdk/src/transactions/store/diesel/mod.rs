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


/// Runs `$body` with `$t` bound to the schema module of the given transactions table. Both
/// tables share a column set, so one body serves either.
macro_rules! with_transaction_table {
    ($table:expr, |$t:ident| $body:expr) => {
        match $table {
            crate::transactions::TransactionTable::History => {
                use crate::transactions::store::diesel::schema::history_transactions as $t;
                $body
            }
            crate::transactions::TransactionTable::ExpHistory => {
                use crate::transactions::store::diesel::schema::exp_history_transactions as $t;
                $body
            }
        }
    };
}

/// Builds the insertable column assignments of a `StoredTransaction` for table `$t`.
macro_rules! transaction_values {
    ($t:ident, $model:expr) => {{
        let model: crate::transactions::store::StoredTransaction = $model;
        (
            $t::id.eq(model.id),
            $t::transaction_hash.eq(model.transaction_hash),
            $t::ledger_sequence.eq(model.ledger_sequence),
            $t::application_order.eq(model.application_order),
            $t::account.eq(model.account),
            $t::account_sequence.eq(model.account_sequence),
            $t::max_fee.eq(model.max_fee),
            $t::fee_charged.eq(model.fee_charged),
            $t::operation_count.eq(model.operation_count),
            $t::tx_envelope.eq(model.tx_envelope),
            $t::tx_result.eq(model.tx_result),
            $t::tx_meta.eq(model.tx_meta),
            $t::tx_fee_meta.eq(model.tx_fee_meta),
            $t::signatures.eq(model.signatures),
            $t::memo_type.eq(model.memo_type),
            $t::memo.eq(model.memo),
            $t::valid_after.eq(model.valid_after),
            $t::valid_before.eq(model.valid_before),
            $t::successful.eq(model.successful),
            $t::created_at.eq(model.created_at),
            $t::updated_at.eq(model.updated_at),
        )
    }};
}

pub(in crate::transactions) mod models;
mod operations;
pub(in crate) mod schema;

use std::collections::HashMap;

use diesel::r2d2::{ConnectionManager, Pool};

use super::stored::into_rows;
use super::{StoredTransaction, TransactionParticipant, TransactionStore, TransactionStoreError};
use crate::transactions::filter::TransactionFilter;
use crate::transactions::{TransactionRow, TransactionTable};
use operations::add_transaction_participants::TransactionStoreAddTransactionParticipantsOperation as _;
use operations::add_transactions::TransactionStoreAddTransactionsOperation as _;
use operations::create_accounts::TransactionStoreCreateAccountsOperation as _;
use operations::get_account_id::TransactionStoreGetAccountIdOperation as _;
use operations::get_transaction_by_hash::TransactionStoreGetTransactionByHashOperation as _;
use operations::list_stored_transactions::TransactionStoreListStoredTransactionsOperation as _;
use operations::list_transactions_by_ids::TransactionStoreListTransactionsByIdsOperation as _;
use operations::TransactionStoreOperations;

/// Manages transaction rows, accounts and participants in the database
#[derive(Clone)]
pub struct DieselTransactionStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselTransactionStore<C> {
    /// Creates a new DieselTransactionStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselTransactionStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl TransactionStore for DieselTransactionStore<diesel::pg::PgConnection> {
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?).add_transactions(table, rows)
    }

    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .get_transaction_by_hash(table, hash)
    }

    fn list_transactions_by_ids(
        &self,
        table: TransactionTable,
        ids: &[i64],
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .list_transactions_by_ids(table, ids)
    }

    fn list_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        into_rows(
            TransactionStoreOperations::new(&*self.connection_pool.get()?)
                .list_stored_transactions(table, filter)?,
        )
    }

    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .list_stored_transactions(table, filter)
    }

    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?).create_accounts(addresses)
    }

    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?).get_account_id(address)
    }

    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .add_transaction_participants(participants)
    }
}

#[cfg(feature = "sqlite")]
impl TransactionStore for DieselTransactionStore<diesel::sqlite::SqliteConnection> {
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?).add_transactions(table, rows)
    }

    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .get_transaction_by_hash(table, hash)
    }

    fn list_transactions_by_ids(
        &self,
        table: TransactionTable,
        ids: &[i64],
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .list_transactions_by_ids(table, ids)
    }

    fn list_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRow>, TransactionStoreError> {
        into_rows(
            TransactionStoreOperations::new(&*self.connection_pool.get()?)
                .list_stored_transactions(table, filter)?,
        )
    }

    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .list_stored_transactions(table, filter)
    }

    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?).create_accounts(addresses)
    }

    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?).get_account_id(address)
    }

    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError> {
        TransactionStoreOperations::new(&*self.connection_pool.get()?)
            .add_transaction_participants(participants)
    }
}
