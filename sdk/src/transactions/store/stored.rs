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


//! Transaction rows exactly as a store persists them.

use std::convert::TryFrom;

use chrono::NaiveDateTime;

use crate::error::DataCorruptionError;
use crate::transactions::{MemoType, TransactionRow};

use super::TransactionStoreError;

/// A row of either transactions table with every column in its persisted form.
///
/// Unlike `TransactionRow` this holds any value the table can, so two tables can be compared
/// even when one of them holds values no `TransactionRow` can represent.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredTransaction {
    pub id: i64,
    pub transaction_hash: String,
    pub ledger_sequence: i64,
    pub application_order: i64,
    pub account: String,
    pub account_sequence: String,
    pub max_fee: i64,
    pub fee_charged: Option<i64>,
    pub operation_count: i64,
    pub tx_envelope: String,
    pub tx_result: String,
    pub tx_meta: String,
    pub tx_fee_meta: String,
    /// JSON array of the base64 encoded signatures, in envelope order.
    pub signatures: String,
    pub memo_type: String,
    pub memo: Option<String>,
    pub valid_after: Option<i64>,
    pub valid_before: Option<i64>,
    pub successful: Option<bool>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl StoredTransaction {
    /// Compares every ledger derived column. The write timestamps are left out: each table
    /// stamps its own rows when they are inserted.
    pub fn same_columns(&self, other: &StoredTransaction) -> bool {
        self.id == other.id
            && self.transaction_hash == other.transaction_hash
            && self.ledger_sequence == other.ledger_sequence
            && self.application_order == other.application_order
            && self.account == other.account
            && self.account_sequence == other.account_sequence
            && self.max_fee == other.max_fee
            && self.fee_charged == other.fee_charged
            && self.operation_count == other.operation_count
            && self.tx_envelope == other.tx_envelope
            && self.tx_result == other.tx_result
            && self.tx_meta == other.tx_meta
            && self.tx_fee_meta == other.tx_fee_meta
            && self.signatures == other.signatures
            && self.memo_type == other.memo_type
            && self.memo == other.memo
            && self.valid_after == other.valid_after
            && self.valid_before == other.valid_before
            && self.successful == other.successful
    }
}

impl From<&TransactionRow> for StoredTransaction {
    fn from(row: &TransactionRow) -> Self {
        Self {
            id: row.id,
            transaction_hash: row.transaction_hash.clone(),
            ledger_sequence: i64::from(row.ledger_sequence),
            application_order: i64::from(row.application_order),
            account: row.account.clone(),
            account_sequence: row.account_sequence.clone(),
            max_fee: row.max_fee,
            fee_charged: row.fee_charged,
            operation_count: i64::from(row.operation_count),
            tx_envelope: row.tx_envelope.clone(),
            tx_result: row.tx_result.clone(),
            tx_meta: row.tx_meta.clone(),
            tx_fee_meta: row.tx_fee_meta.clone(),
            signatures: serde_json::Value::from(row.signatures.clone()).to_string(),
            memo_type: row.memo_type.to_string(),
            memo: row.memo.clone(),
            valid_after: row.valid_after,
            valid_before: row.valid_before,
            successful: row.successful,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<StoredTransaction> for TransactionRow {
    type Error = DataCorruptionError;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        let memo_type = stored.memo_type.parse::<MemoType>().map_err(|err| {
            DataCorruptionError::from_source_with_message(
                Box::new(err),
                format!("transaction {} has an unknown memo type", stored.id),
            )
        })?;

        let signatures = serde_json::from_str::<Vec<String>>(&stored.signatures).map_err(|err| {
            DataCorruptionError::from_source_with_message(
                Box::new(err),
                format!("transaction {} has an unreadable signature list", stored.id),
            )
        })?;

        Ok(Self {
            id: stored.id,
            ledger_sequence: to_u32(stored.id, "ledger_sequence", stored.ledger_sequence)?,
            application_order: to_u32(stored.id, "application_order", stored.application_order)?,
            operation_count: to_u32(stored.id, "operation_count", stored.operation_count)?,
            transaction_hash: stored.transaction_hash,
            account: stored.account,
            account_sequence: stored.account_sequence,
            max_fee: stored.max_fee,
            fee_charged: stored.fee_charged,
            tx_envelope: stored.tx_envelope,
            tx_result: stored.tx_result,
            tx_meta: stored.tx_meta,
            tx_fee_meta: stored.tx_fee_meta,
            signatures,
            memo_type,
            memo: stored.memo,
            valid_after: stored.valid_after,
            valid_before: stored.valid_before,
            successful: stored.successful,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}

fn to_u32(id: i64, column: &str, value: i64) -> Result<u32, DataCorruptionError> {
    u32::try_from(value).map_err(|err| {
        DataCorruptionError::from_source_with_message(
            Box::new(err),
            format!("transaction {} has {} out of range: {}", id, column, value),
        )
    })
}

/// Maps persisted rows back into `TransactionRow`s, failing on the first row which does not fit.
pub(in crate::transactions::store) fn into_rows<I>(
    stored: I,
) -> Result<Vec<TransactionRow>, TransactionStoreError>
where
    I: IntoIterator<Item = StoredTransaction>,
{
    stored
        .into_iter()
        .map(TransactionRow::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            error!("Unable to read transaction row: {}", err);
            TransactionStoreError::from(err)
        })
}
