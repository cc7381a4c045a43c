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
use crate::transactions::store::StoredTransaction;
use crate::transactions::store::TransactionStoreError;
use crate::transactions::{TransactionRow, TransactionTable};

use diesel::{dsl::insert_into, prelude::*};

pub(in crate::transactions::store::diesel) trait TransactionStoreAddTransactionsOperation {
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TransactionStoreAddTransactionsOperation
    for TransactionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            for row in rows {
                with_transaction_table!(table, |t| {
                    insert_into(t::table)
                        .values(transaction_values!(t, StoredTransaction::from(row)))
                        .execute(self.conn)?
                });
            }

            Ok(())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TransactionStoreAddTransactionsOperation
    for TransactionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_transactions(
        &self,
        table: TransactionTable,
        rows: &[TransactionRow],
    ) -> Result<(), TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            for row in rows {
                with_transaction_table!(table, |t| {
                    insert_into(t::table)
                        .values(transaction_values!(t, StoredTransaction::from(row)))
                        .execute(self.conn)?
                });
            }

            Ok(())
        })
    }
}
