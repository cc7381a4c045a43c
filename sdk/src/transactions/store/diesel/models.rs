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


use chrono::NaiveDateTime;

use crate::transactions::store::StoredTransaction;

/// A row of either transactions table, in `table!` column order.
#[derive(Queryable, PartialEq, Debug)]
pub struct TransactionModel {
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
    pub signatures: String,
    pub memo_type: String,
    pub memo: Option<String>,
    pub valid_after: Option<i64>,
    pub valid_before: Option<i64>,
    pub successful: Option<bool>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct AccountModel {
    pub id: i64,
    pub address: String,
}

impl From<TransactionModel> for StoredTransaction {
    fn from(model: TransactionModel) -> Self {
        Self {
            id: model.id,
            transaction_hash: model.transaction_hash,
            ledger_sequence: model.ledger_sequence,
            application_order: model.application_order,
            account: model.account,
            account_sequence: model.account_sequence,
            max_fee: model.max_fee,
            fee_charged: model.fee_charged,
            operation_count: model.operation_count,
            tx_envelope: model.tx_envelope,
            tx_result: model.tx_result,
            tx_meta: model.tx_meta,
            tx_fee_meta: model.tx_fee_meta,
            signatures: model.signatures,
            memo_type: model.memo_type,
            memo: model.memo,
            valid_after: model.valid_after,
            valid_before: model.valid_before,
            successful: model.successful,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
