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


use super::TransactionStoreOperations;
use crate::transactions::store::diesel::schema::history_accounts;
use crate::transactions::store::TransactionStoreError;

use diesel::prelude::*;

pub(in crate::transactions::store::diesel) trait TransactionStoreGetAccountIdOperation {
    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TransactionStoreGetAccountIdOperation
    for TransactionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError> {
        history_accounts::table
            .select(history_accounts::id)
            .filter(history_accounts::address.eq(address))
            .first::<i64>(self.conn)
            .optional()
            .map_err(TransactionStoreError::from)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TransactionStoreGetAccountIdOperation
    for TransactionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn get_account_id(&self, address: &str) -> Result<Option<i64>, TransactionStoreError> {
        history_accounts::table
            .select(history_accounts::id)
            .filter(history_accounts::address.eq(address))
            .first::<i64>(self.conn)
            .optional()
            .map_err(TransactionStoreError::from)
    }
}
