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


use std::collections::{BTreeSet, HashMap, HashSet};

use super::TransactionStoreOperations;
use crate::transactions::store::diesel::{models::AccountModel, schema::history_accounts};
use crate::transactions::store::TransactionStoreError;

use diesel::{dsl::insert_into, prelude::*};

pub(in crate::transactions::store::diesel) trait TransactionStoreCreateAccountsOperation {
    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TransactionStoreCreateAccountsOperation
    for TransactionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            let wanted: Vec<String> = addresses
                .iter()
                .cloned()
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect();

            let existing: HashSet<String> = history_accounts::table
                .filter(history_accounts::address.eq_any(&wanted))
                .load::<AccountModel>(self.conn)?
                .into_iter()
                .map(|account| account.address)
                .collect();

            for address in wanted.iter().filter(|address| !existing.contains(*address)) {
                insert_into(history_accounts::table)
                    .values(history_accounts::address.eq(address))
                    .execute(self.conn)?;
            }

            Ok(history_accounts::table
                .filter(history_accounts::address.eq_any(&wanted))
                .load::<AccountModel>(self.conn)?
                .into_iter()
                .map(|account| (account.address, account.id))
                .collect())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TransactionStoreCreateAccountsOperation
    for TransactionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn create_accounts(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, i64>, TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            let wanted: Vec<String> = addresses
                .iter()
                .cloned()
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect();

            let existing: HashSet<String> = history_accounts::table
                .filter(history_accounts::address.eq_any(&wanted))
                .load::<AccountModel>(self.conn)?
                .into_iter()
                .map(|account| account.address)
                .collect();

            for address in wanted.iter().filter(|address| !existing.contains(*address)) {
                insert_into(history_accounts::table)
                    .values(history_accounts::address.eq(address))
                    .execute(self.conn)?;
            }

            Ok(history_accounts::table
                .filter(history_accounts::address.eq_any(&wanted))
                .load::<AccountModel>(self.conn)?
                .into_iter()
                .map(|account| (account.address, account.id))
                .collect())
        })
    }
}
