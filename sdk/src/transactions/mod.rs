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

//! Transaction history rows: normalization, batched writes, filtered reads and the consistency
//! check between the legacy and the shadow transactions table.

pub mod batch;
pub mod consistency;
mod error;
pub mod filter;
pub mod normalize;
pub mod participants;
pub mod query;
pub mod store;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::InvalidArgumentError;
use crate::order_key::OrderKey;

pub use error::{TransactionBatchInsertError, TransactionNormalizeError, TransactionQueryError};

/// The tables holding transaction rows. Both have the same column set; which of them plays the
/// legacy and which the shadow role is configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionTable {
    History,
    ExpHistory,
}

impl TransactionTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            TransactionTable::History => "history_transactions",
            TransactionTable::ExpHistory => "exp_history_transactions",
        }
    }
}

impl fmt::Display for TransactionTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for TransactionTable {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "history_transactions" => Ok(TransactionTable::History),
            "exp_history_transactions" => Ok(TransactionTable::ExpHistory),
            _ => Err(InvalidArgumentError::new(
                "table".to_string(),
                format!("unknown transactions table {}", s),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoType {
    None,
    Text,
    Id,
    Hash,
    Return,
}

impl MemoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoType::None => "none",
            MemoType::Text => "text",
            MemoType::Id => "id",
            MemoType::Hash => "hash",
            MemoType::Return => "return",
        }
    }
}

impl fmt::Display for MemoType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoType {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(MemoType::None),
            "text" => Ok(MemoType::Text),
            "id" => Ok(MemoType::Id),
            "hash" => Ok(MemoType::Hash),
            "return" => Ok(MemoType::Return),
            _ => Err(InvalidArgumentError::new(
                "memo_type".to_string(),
                format!("unknown memo type {}", s),
            )),
        }
    }
}

/// One row of a transactions table.
///
/// Blobs are base64 encoded payloads produced by the ledger codec. `successful` is `None` only
/// for rows written before the column existed; such rows are treated as successful.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRow {
    pub id: i64,
    pub transaction_hash: String,
    pub ledger_sequence: u32,
    pub application_order: u32,
    pub account: String,
    pub account_sequence: String,
    pub max_fee: i64,
    /// `None` until the row has been re-ingested with the charged fee.
    pub fee_charged: Option<i64>,
    pub operation_count: u32,
    pub tx_envelope: String,
    pub tx_result: String,
    pub tx_meta: String,
    pub tx_fee_meta: String,
    pub signatures: Vec<String>,
    pub memo_type: MemoType,
    pub memo: Option<String>,
    pub valid_after: Option<i64>,
    pub valid_before: Option<i64>,
    pub successful: Option<bool>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TransactionRow {
    pub fn order_key(&self) -> Result<OrderKey, InvalidArgumentError> {
        OrderKey::parse(self.id)
    }

    pub fn is_successful(&self) -> bool {
        self.successful.unwrap_or(true)
    }

    /// The charged fee, or the max fee for rows which predate the charged fee column.
    pub fn fee_charged_or_max(&self) -> i64 {
        self.fee_charged.unwrap_or(self.max_fee)
    }
}
