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


use diesel::{
    pg::PgConnection,
    r2d2::{ConnectionManager, Pool},
};

use super::StoreFactory;
use crate::error::ResourceTemporarilyUnavailableError;
use crate::migrations::{run_postgres_migrations, MigrationsError};
use crate::transactions::store::{DieselTransactionStore, TransactionStore};

/// A `StoreFactory` backed by a PostgreSQL database.
pub struct PgStoreFactory {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl PgStoreFactory {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }
}

impl StoreFactory for PgStoreFactory {
    fn get_transaction_store<'a>(&'a self) -> Box<dyn TransactionStore + 'a> {
        Box::new(DieselTransactionStore::new(self.pool.clone()))
    }

    fn run_migrations(&self) -> Result<(), MigrationsError> {
        let conn = self.pool.get().map_err(|err| {
            MigrationsError::ResourceTemporarilyUnavailableError(
                ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
            )
        })?;
        run_postgres_migrations(&*conn)
    }
}
