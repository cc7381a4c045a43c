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


use crate::paging::Order;
use crate::transactions::filter::TransactionFilter;
use crate::transactions::store::diesel::{
    models::TransactionModel,
    schema::{history_accounts, history_transaction_participants},
};
use crate::transactions::store::{StoredTransaction, TransactionStoreError};
use crate::transactions::TransactionTable;

use super::TransactionStoreOperations;

use diesel::prelude::*;

pub(in crate::transactions::store::diesel) trait TransactionStoreListStoredTransactionsOperation {
    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError>;
}
#[cfg(feature = "postgres")]
impl<'a> TransactionStoreListStoredTransactionsOperation
    for TransactionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            let account_id = match filter.account() {
                Some(address) => Some(pg::account_id(self.conn, address)?),
                None => None,
            };

            let models = with_transaction_table!(table, |t| {
                let mut query = t::table.into_boxed();

                if let Some(account_id) = account_id {
                    query = query.filter(
                        t::id.eq_any(
                            history_transaction_participants::table
                                .select(history_transaction_participants::history_transaction_id)
                                .filter(
                                    history_transaction_participants::history_account_id
                                        .eq(account_id),
                                ),
                        ),
                    );
                }

                if let Some(range) = filter.id_range() {
                    query = query.filter(t::id.ge(range.start).and(t::id.lt(range.end)));
                }

                if let Some(page) = filter.page_query() {
                    match (page.order(), page.cursor()) {
                        (Order::Asc, Some(cursor)) => query = query.filter(t::id.gt(cursor)),
                        (Order::Desc, Some(cursor)) => query = query.filter(t::id.lt(cursor)),
                        (_, None) => (),
                    }
                    query = query.limit(page.limit() as i64);
                }

                query = match filter.order() {
                    Order::Asc => query.order(t::id.asc()),
                    Order::Desc => query.order(t::id.desc()),
                };

                if !filter.includes_failed() {
                    query = query.filter(t::successful.eq(true).or(t::successful.is_null()));
                }

                query.load::<TransactionModel>(self.conn)?
            });

            Ok(models.into_iter().map(StoredTransaction::from).collect())
        })
    }
}

#[cfg(feature = "postgres")]
pub(in crate::transactions::store::diesel) mod pg {
    use super::*;

    pub fn account_id(conn: &diesel::pg::PgConnection, address: &str) -> Result<i64, TransactionStoreError> {
        history_accounts::table
            .select(history_accounts::id)
            .filter(history_accounts::address.eq(address))
            .first::<i64>(conn)
            .optional()?
            .ok_or_else(|| TransactionStoreError::NotFoundError(format!("account {}", address)))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TransactionStoreListStoredTransactionsOperation
    for TransactionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_stored_transactions(
        &self,
        table: TransactionTable,
        filter: &TransactionFilter,
    ) -> Result<Vec<StoredTransaction>, TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            let account_id = match filter.account() {
                Some(address) => Some(sqlite::account_id(self.conn, address)?),
                None => None,
            };

            let models = with_transaction_table!(table, |t| {
                let mut query = t::table.into_boxed();

                if let Some(account_id) = account_id {
                    query = query.filter(
                        t::id.eq_any(
                            history_transaction_participants::table
                                .select(history_transaction_participants::history_transaction_id)
                                .filter(
                                    history_transaction_participants::history_account_id
                                        .eq(account_id),
                                ),
                        ),
                    );
                }

                if let Some(range) = filter.id_range() {
                    query = query.filter(t::id.ge(range.start).and(t::id.lt(range.end)));
                }

                if let Some(page) = filter.page_query() {
                    match (page.order(), page.cursor()) {
                        (Order::Asc, Some(cursor)) => query = query.filter(t::id.gt(cursor)),
                        (Order::Desc, Some(cursor)) => query = query.filter(t::id.lt(cursor)),
                        (_, None) => (),
                    }
                    query = query.limit(page.limit() as i64);
                }

                query = match filter.order() {
                    Order::Asc => query.order(t::id.asc()),
                    Order::Desc => query.order(t::id.desc()),
                };

                if !filter.includes_failed() {
                    query = query.filter(t::successful.eq(true).or(t::successful.is_null()));
                }

                query.load::<TransactionModel>(self.conn)?
            });

            Ok(models.into_iter().map(StoredTransaction::from).collect())
        })
    }
}

#[cfg(feature = "sqlite")]
pub(in crate::transactions::store::diesel) mod sqlite {
    use super::*;

    pub fn account_id(conn: &diesel::sqlite::SqliteConnection, address: &str) -> Result<i64, TransactionStoreError> {
        history_accounts::table
            .select(history_accounts::id)
            .filter(history_accounts::address.eq(address))
            .first::<i64>(conn)
            .optional()?
            .ok_or_else(|| TransactionStoreError::NotFoundError(format!("account {}", address)))
    }
}
