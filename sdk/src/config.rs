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

//! Settings for ingesting into, verifying and reading the transaction history tables.

use std::error::Error;
use std::fmt;

use crate::store::ConnectionUri;
use crate::transactions::TransactionTable;

pub const DEFAULT_DATABASE_URL: &str = ":memory:";
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

#[derive(Debug, PartialEq)]
pub enum ConfigurationError {
    MissingValue(String),
    InvalidValue(String),
}

impl Error for ConfigurationError {}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigurationError::MissingValue(config_field_name) => {
                write!(f, "Missing configuration for {}", config_field_name)
            }
            ConfigurationError::InvalidValue(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HistoryConfig {
    database_url: String,
    connection_uri: ConnectionUri,
    max_batch_size: usize,
    legacy_table: TransactionTable,
    shadow_table: TransactionTable,
    read_table: TransactionTable,
}

impl HistoryConfig {
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn connection_uri(&self) -> &ConnectionUri {
        &self.connection_uri
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// The table ingestion has always written and readers trust.
    pub fn legacy_table(&self) -> TransactionTable {
        self.legacy_table
    }

    /// The table written in parallel, trusted only after it has been verified.
    pub fn shadow_table(&self) -> TransactionTable {
        self.shadow_table
    }

    /// The table reads are served from.
    pub fn read_table(&self) -> TransactionTable {
        self.read_table
    }
}

pub struct HistoryConfigBuilder {
    database_url: Option<String>,
    max_batch_size: Option<usize>,
    legacy_table: Option<TransactionTable>,
    shadow_table: Option<TransactionTable>,
    read_table: Option<TransactionTable>,
}

impl Default for HistoryConfigBuilder {
    fn default() -> Self {
        Self {
            database_url: Some(DEFAULT_DATABASE_URL.to_owned()),
            max_batch_size: Some(DEFAULT_MAX_BATCH_SIZE),
            legacy_table: Some(TransactionTable::History),
            shadow_table: Some(TransactionTable::ExpHistory),
            read_table: None,
        }
    }
}

impl HistoryConfigBuilder {
    pub fn with_database_url(mut self, database_url: &str) -> Self {
        self.database_url = Some(database_url.to_owned());
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }

    pub fn with_legacy_table(mut self, table: TransactionTable) -> Self {
        self.legacy_table = Some(table);
        self
    }

    pub fn with_shadow_table(mut self, table: TransactionTable) -> Self {
        self.shadow_table = Some(table);
        self
    }

    pub fn with_read_table(mut self, table: TransactionTable) -> Self {
        self.read_table = Some(table);
        self
    }

    /// Sets the tables from their SQL names, as found in a configuration file or the
    /// environment. Unset names keep their current value.
    pub fn with_table_names(
        mut self,
        legacy: Option<&str>,
        shadow: Option<&str>,
        read: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let parse = |name: &str| {
            name.parse::<TransactionTable>()
                .map_err(|err| ConfigurationError::InvalidValue(err.to_string()))
        };

        if let Some(name) = legacy {
            self.legacy_table = Some(parse(name)?);
        }
        if let Some(name) = shadow {
            self.shadow_table = Some(parse(name)?);
        }
        if let Some(name) = read {
            self.read_table = Some(parse(name)?);
        }

        Ok(self)
    }

    pub fn build(mut self) -> Result<HistoryConfig, ConfigurationError> {
        let database_url = self
            .database_url
            .take()
            .ok_or_else(|| ConfigurationError::MissingValue("database_url".to_owned()))?;
        let connection_uri = database_url
            .parse::<ConnectionUri>()
            .map_err(|err| ConfigurationError::InvalidValue(err.to_string()))?;

        let max_batch_size = self
            .max_batch_size
            .take()
            .ok_or_else(|| ConfigurationError::MissingValue("max_batch_size".to_owned()))?;
        if max_batch_size == 0 {
            return Err(ConfigurationError::InvalidValue(
                "max_batch_size must be greater than 0".to_owned(),
            ));
        }

        let legacy_table = self
            .legacy_table
            .take()
            .ok_or_else(|| ConfigurationError::MissingValue("legacy_table".to_owned()))?;
        let shadow_table = self
            .shadow_table
            .take()
            .ok_or_else(|| ConfigurationError::MissingValue("shadow_table".to_owned()))?;
        if legacy_table == shadow_table {
            return Err(ConfigurationError::InvalidValue(format!(
                "legacy and shadow table are both {}",
                legacy_table
            )));
        }

        Ok(HistoryConfig {
            database_url,
            connection_uri,
            max_batch_size,
            legacy_table,
            shadow_table,
            read_table: self.read_table.take().unwrap_or(legacy_table),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_with_defaults() {
        let config = HistoryConfigBuilder::default()
            .build()
            .expect("Unable to build configuration");

        assert_eq!(":memory:", config.database_url());
        assert_eq!(DEFAULT_MAX_BATCH_SIZE, config.max_batch_size());
        assert_eq!(TransactionTable::History, config.legacy_table());
        assert_eq!(TransactionTable::ExpHistory, config.shadow_table());
        assert_eq!(TransactionTable::History, config.read_table());
    }

    #[test]
    fn build_with_cutover_to_shadow_table() {
        let config = HistoryConfigBuilder::default()
            .with_table_names(None, None, Some("exp_history_transactions"))
            .expect("Unable to parse table names")
            .with_max_batch_size(50)
            .build()
            .expect("Unable to build configuration");

        assert_eq!(TransactionTable::ExpHistory, config.read_table());
        assert_eq!(50, config.max_batch_size());
    }

    #[test]
    fn build_with_invalid_values() {
        assert!(matches!(
            HistoryConfigBuilder::default()
                .with_max_batch_size(0)
                .build(),
            Err(ConfigurationError::InvalidValue(_))
        ));
        assert!(matches!(
            HistoryConfigBuilder::default()
                .with_shadow_table(TransactionTable::History)
                .build(),
            Err(ConfigurationError::InvalidValue(_))
        ));
        assert!(matches!(
            HistoryConfigBuilder::default().with_table_names(Some("history_ledgers"), None, None),
            Err(ConfigurationError::InvalidValue(_))
        ));
    }

    #[test]
    fn build_with_missing_value() {
        let builder = HistoryConfigBuilder {
            database_url: None,
            ..Default::default()
        };

        assert_eq!(
            builder.build().unwrap_err(),
            ConfigurationError::MissingValue("database_url".to_owned())
        );
    }
}
