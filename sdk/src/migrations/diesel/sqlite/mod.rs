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


use diesel::sqlite::SqliteConnection;
use diesel::{Connection, RunQueryDsl};

use crate::error::ResourceTemporarilyUnavailableError;
use crate::migrations::MigrationsError;
use crate::transactions::store::diesel::schema::{
    exp_history_transactions, history_accounts, history_transaction_participants,
    history_transactions,
};

embed_migrations!("./src/migrations/diesel/sqlite/migrations");

/// Run database migrations to create the history tables
///
/// # Arguments
///
/// * `conn` - Connection to database
///
pub fn run_migrations(conn: &SqliteConnection) -> Result<(), MigrationsError> {
    embedded_migrations::run(conn).map_err(|err| {
        MigrationsError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    })?;

    info!("Successfully applied history migrations");

    Ok(())
}

/// Remove every row from the history tables, leaving the schema in place
pub fn clear_database(conn: &SqliteConnection) -> Result<(), MigrationsError> {
    conn.transaction::<_, MigrationsError, _>(|| {
        diesel::delete(history_transaction_participants::table).execute(conn)?;
        diesel::delete(history_accounts::table).execute(conn)?;
        diesel::delete(history_transactions::table).execute(conn)?;
        diesel::delete(exp_history_transactions::table).execute(conn)?;

        Ok(())
    })?;

    Ok(())
}
