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


use super::{into_rows, TransactionStoreOperations};
use crate::transactions::store::diesel::models::TransactionModel;
use crate::transactions::store::TransactionStoreError;
use crate::transactions::{TransactionRow, TransactionTable};

use diesel::prelude::*;

pub(in crate::transactions::store::diesel) trait TransactionStoreGetTransactionByHashOperation {
    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TransactionStoreGetTransactionByHashOperation
    for TransactionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError> {
        let model = with_transaction_table!(table, |t| {
            t::table
                .filter(t::transaction_hash.eq(hash))
                .first::<TransactionModel>(self.conn)
                .optional()?
        });

        Ok(into_rows(model.into_iter().collect())?.pop())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TransactionStoreGetTransactionByHashOperation
    for TransactionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn get_transaction_by_hash(
        &self,
        table: TransactionTable,
        hash: &str,
    ) -> Result<Option<TransactionRow>, TransactionStoreError> {
        let model = with_transaction_table!(table, |t| {
            t::table
                .filter(t::transaction_hash.eq(hash))
                .first::<TransactionModel>(self.conn)
                .optional()?
        });

        Ok(into_rows(model.into_iter().collect())?.pop())
    }
}
