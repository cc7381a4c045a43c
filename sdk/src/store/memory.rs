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


use crate::migrations::MigrationsError;
use crate::transactions::store::{MemoryTransactionStore, TransactionStore};

use super::StoreFactory;

/// A `StoreFactory` backed by memory.
#[derive(Default)]
pub struct MemoryStoreFactory {
    transaction_store: MemoryTransactionStore,
}

impl MemoryStoreFactory {
    pub fn new() -> Self {
        let transaction_store = MemoryTransactionStore::new();

        Self { transaction_store }
    }
}

impl StoreFactory for MemoryStoreFactory {
    fn get_transaction_store<'a>(&'a self) -> Box<dyn TransactionStore + 'a> {
        Box::new(self.transaction_store.clone())
    }

    fn run_migrations(&self) -> Result<(), MigrationsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::transactions::filter::TransactionFilter;
    use crate::transactions::TransactionTable;

    #[test]
    fn test_stores_share_the_same_tables() {
        let factory = MemoryStoreFactory::new();
        factory.run_migrations().expect("unable to run migrations");

        let address = "GA5WBPYA5Y4WAEHXWR2UKO2UO4BUGHUQ74EUPKON2QHV4WRHOIRNKKH2";
        let created = factory
            .get_transaction_store()
            .create_accounts(&[address.to_string()])
            .expect("unable to create accounts");

        let store = factory.get_transaction_store();
        assert_eq!(
            store.get_account_id(address).expect("unable to get account"),
            Some(created[address])
        );
        assert!(store
            .list_transactions(
                TransactionTable::History,
                &TransactionFilter::new().include_failed()
            )
            .expect("unable to list")
            .is_empty());
    }
}
