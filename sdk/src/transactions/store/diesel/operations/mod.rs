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


pub(super) mod add_transaction_participants;
pub(super) mod add_transactions;
pub(super) mod create_accounts;
pub(super) mod get_account_id;
pub(super) mod get_transaction_by_hash;
pub(super) mod list_stored_transactions;
pub(super) mod list_transactions_by_ids;

use super::models::TransactionModel;
use crate::transactions::store::{stored, StoredTransaction, TransactionStoreError};
use crate::transactions::TransactionRow;

pub(super) struct TransactionStoreOperations<'a, C> {
    conn: &'a C,
}

impl<'a, C> TransactionStoreOperations<'a, C>
where
    C: diesel::Connection,
{
    pub fn new(conn: &'a C) -> Self {
        TransactionStoreOperations { conn }
    }
}

fn into_rows(models: Vec<TransactionModel>) -> Result<Vec<TransactionRow>, TransactionStoreError> {
    stored::into_rows(models.into_iter().map(StoredTransaction::from))
}
