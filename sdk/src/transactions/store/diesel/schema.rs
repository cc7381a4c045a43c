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


table! {
    history_transactions (id) {
        id -> Int8,
        transaction_hash -> Text,
        ledger_sequence -> Int8,
        application_order -> Int8,
        account -> Text,
        account_sequence -> Text,
        max_fee -> Int8,
        fee_charged -> Nullable<Int8>,
        operation_count -> Int8,
        tx_envelope -> Text,
        tx_result -> Text,
        tx_meta -> Text,
        tx_fee_meta -> Text,
        signatures -> Text,
        memo_type -> Text,
        memo -> Nullable<Text>,
        valid_after -> Nullable<Int8>,
        valid_before -> Nullable<Int8>,
        successful -> Nullable<Bool>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

// Same column set as `history_transactions`. The physical column order differs, which does not
// matter here since every select names its columns.
table! {
    exp_history_transactions (id) {
        id -> Int8,
        transaction_hash -> Text,
        ledger_sequence -> Int8,
        application_order -> Int8,
        account -> Text,
        account_sequence -> Text,
        max_fee -> Int8,
        fee_charged -> Nullable<Int8>,
        operation_count -> Int8,
        tx_envelope -> Text,
        tx_result -> Text,
        tx_meta -> Text,
        tx_fee_meta -> Text,
        signatures -> Text,
        memo_type -> Text,
        memo -> Nullable<Text>,
        valid_after -> Nullable<Int8>,
        valid_before -> Nullable<Int8>,
        successful -> Nullable<Bool>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    history_accounts (id) {
        id -> Int8,
        address -> Text,
    }
}

table! {
    history_transaction_participants (id) {
        id -> Int8,
        history_transaction_id -> Int8,
        history_account_id -> Int8,
    }
}

allow_tables_to_appear_in_same_query!(
    exp_history_transactions,
    history_accounts,
    history_transaction_participants,
    history_transactions,
);
