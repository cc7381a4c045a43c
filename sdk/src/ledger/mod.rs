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

//! The decoded form of a ledger transaction, as handed to the history tables by the ledger
//! reader, and the codec used to move between the decoded and the binary form.
//!
//! Only the fields the history tables read are modelled; operation bodies, ledger entries and
//! meta contents stay opaque.

mod codec;
pub mod json;

pub use codec::LedgerCodec;

/// One transaction of a closed ledger together with its execution result and meta.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Position of the transaction inside its ledger, starting at 1.
    pub index: u32,
    pub envelope: TransactionEnvelope,
    pub result: TransactionResultPair,
    pub meta: TransactionMeta,
    pub fee_changes: LedgerEntryChanges,
}

impl LedgerTransaction {
    /// Every account the transaction touches as a source: the transaction source followed by
    /// the operation sources, without duplicates.
    pub fn participants(&self) -> Vec<String> {
        let mut participants = vec![self.envelope.tx.source_account.clone()];
        for op in &self.envelope.tx.operations {
            if let Some(source) = &op.source_account {
                if !participants.contains(source) {
                    participants.push(source.clone());
                }
            }
        }
        participants
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub source_account: String,
    pub fee: u32,
    pub seq_num: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub source_account: Option<String>,
    pub body: Vec<u8>,
}

/// Validity window declared by a transaction. A `max_time` of zero means no upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Memo {
    None,
    /// Raw memo text; the protocol does not guarantee valid UTF-8.
    Text(Vec<u8>),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
    /// A memo discriminant this library does not know, carried so that it can be refused.
    Unrecognized(i32),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionResultPair {
    pub transaction_hash: [u8; 32],
    pub result: TransactionResult,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub fee_charged: i64,
    pub code: TransactionResultCode,
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        self.code == TransactionResultCode::TxSuccess
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionResultCode {
    TxSuccess,
    TxFailed,
    TxTooEarly,
    TxTooLate,
    TxMissingOperation,
    TxBadSeq,
    TxBadAuth,
    TxInsufficientBalance,
    TxNoAccount,
    TxInsufficientFee,
    TxBadAuthExtra,
    TxInternalError,
}

impl TransactionResultCode {
    /// The protocol's numeric value for this code.
    pub fn code(&self) -> i32 {
        match self {
            TransactionResultCode::TxSuccess => 0,
            TransactionResultCode::TxFailed => -1,
            TransactionResultCode::TxTooEarly => -2,
            TransactionResultCode::TxTooLate => -3,
            TransactionResultCode::TxMissingOperation => -4,
            TransactionResultCode::TxBadSeq => -5,
            TransactionResultCode::TxBadAuth => -6,
            TransactionResultCode::TxInsufficientBalance => -7,
            TransactionResultCode::TxNoAccount => -8,
            TransactionResultCode::TxInsufficientFee => -9,
            TransactionResultCode::TxBadAuthExtra => -10,
            TransactionResultCode::TxInternalError => -11,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMeta {
    pub tx_changes: Vec<LedgerEntryChange>,
    pub operations: Vec<OperationMeta>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationMeta {
    pub changes: Vec<LedgerEntryChange>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntryChanges(pub Vec<LedgerEntryChange>);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntryChange {
    pub change_type: LedgerEntryChangeType,
    pub entry: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntryChangeType {
    Created,
    Updated,
    Removed,
    State,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(source: Option<&str>) -> Operation {
        Operation {
            source_account: source.map(String::from),
            body: vec![],
        }
    }

    #[test]
    fn test_participants_are_deduplicated_in_order() {
        let transaction = LedgerTransaction {
            index: 1,
            envelope: TransactionEnvelope {
                tx: Transaction {
                    source_account: "GSOURCE".to_string(),
                    fee: 100,
                    seq_num: 1,
                    time_bounds: None,
                    memo: Memo::None,
                    operations: vec![
                        operation(None),
                        operation(Some("GOTHER")),
                        operation(Some("GSOURCE")),
                        operation(Some("GOTHER")),
                        operation(Some("GTHIRD")),
                    ],
                },
                signatures: vec![],
            },
            result: TransactionResultPair {
                transaction_hash: [0; 32],
                result: TransactionResult {
                    fee_charged: 100,
                    code: TransactionResultCode::TxSuccess,
                },
            },
            meta: TransactionMeta::default(),
            fee_changes: LedgerEntryChanges::default(),
        };

        assert_eq!(
            transaction.participants(),
            vec![
                "GSOURCE".to_string(),
                "GOTHER".to_string(),
                "GTHIRD".to_string()
            ]
        );
    }

    #[test]
    fn test_only_tx_success_is_success() {
        let mut result = TransactionResult {
            fee_charged: 100,
            code: TransactionResultCode::TxSuccess,
        };
        assert!(result.is_success());
        result.code = TransactionResultCode::TxFailed;
        assert!(!result.is_success());
        assert_eq!(TransactionResultCode::TxBadSeq.code(), -5);
    }
}
