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

//! Turns a decoded ledger transaction into a `TransactionRow`.

use chrono::{NaiveDateTime, Timelike, Utc};

use crate::error::InvariantViolationError;
use crate::hex;
use crate::ledger::{LedgerCodec, LedgerTransaction, Memo, TimeBounds};
use crate::order_key::OrderKey;

use super::{MemoType, TransactionNormalizeError, TransactionRow};

/// Builds the row for `transaction`, which was applied in ledger `sequence`.
///
/// Every column is derived from the decoded transaction; in particular `successful` comes from
/// the decoded result code and never from an outside flag.
pub fn transaction_to_row(
    codec: &dyn LedgerCodec,
    transaction: &LedgerTransaction,
    sequence: u32,
) -> Result<TransactionRow, TransactionNormalizeError> {
    let tx_envelope = base64::encode(codec.encode_envelope(&transaction.envelope)?);
    let tx_result = base64::encode(codec.encode_result(&transaction.result.result)?);
    let tx_meta = base64::encode(codec.encode_meta(&transaction.meta)?);
    let tx_fee_meta = base64::encode(codec.encode_fee_changes(&transaction.fee_changes)?);

    let (memo_type, memo) = memo_columns(&transaction.envelope.tx.memo).map_err(|err| {
        error!(
            "Refusing to store transaction {} of ledger {}: {}",
            transaction.index, sequence, err
        );
        TransactionNormalizeError::InvariantViolation(err)
    })?;
    let (valid_after, valid_before) = time_bounds_columns(transaction.envelope.tx.time_bounds);

    let now = write_timestamp();

    Ok(TransactionRow {
        id: OrderKey::new(sequence, transaction.index, 0)?.to_i64(),
        transaction_hash: hex::to_hex(&transaction.result.transaction_hash),
        ledger_sequence: sequence,
        application_order: transaction.index,
        account: transaction.envelope.tx.source_account.clone(),
        account_sequence: transaction.envelope.tx.seq_num.to_string(),
        max_fee: i64::from(transaction.envelope.tx.fee),
        fee_charged: Some(transaction.result.result.fee_charged),
        operation_count: transaction.envelope.tx.operations.len() as u32,
        tx_envelope,
        tx_result,
        tx_meta,
        tx_fee_meta,
        signatures: transaction
            .envelope
            .signatures
            .iter()
            .map(|sig| base64::encode(&sig.signature))
            .collect(),
        memo_type,
        memo,
        valid_after,
        valid_before,
        successful: Some(transaction.result.result.is_success()),
        created_at: now,
        updated_at: now,
    })
}

/// Maps a memo to its type column and its value column.
///
/// Text memos are scrubbed of invalid UTF-8 and have every NUL removed, since the database text
/// columns cannot hold NUL. Hash and return memos are base64 encoded.
pub fn memo_columns(memo: &Memo) -> Result<(MemoType, Option<String>), InvariantViolationError> {
    match memo {
        Memo::None => Ok((MemoType::None, None)),
        Memo::Text(text) => {
            let scrubbed = String::from_utf8_lossy(text).replace('\u{0}', "");
            Ok((MemoType::Text, Some(scrubbed)))
        }
        Memo::Id(id) => Ok((MemoType::Id, Some(id.to_string()))),
        Memo::Hash(hash) => Ok((MemoType::Hash, Some(base64::encode(hash)))),
        Memo::Return(hash) => Ok((MemoType::Return, Some(base64::encode(hash)))),
        Memo::Unrecognized(discriminant) => Err(InvariantViolationError::with_message(format!(
            "invalid memo type: {}",
            discriminant
        ))),
    }
}

/// Maps declared time bounds to the `(valid_after, valid_before)` columns.
///
/// A zero max time is the protocol's "no upper bound" and is stored as `None`; bounds beyond
/// `i64::MAX` are clamped to it.
pub fn time_bounds_columns(time_bounds: Option<TimeBounds>) -> (Option<i64>, Option<i64>) {
    match time_bounds {
        None => (None, None),
        Some(bounds) => {
            let valid_after = clamp_to_i64(bounds.min_time);
            let valid_before = if bounds.max_time == 0 {
                None
            } else {
                Some(clamp_to_i64(bounds.max_time))
            };
            (Some(valid_after), valid_before)
        }
    }
}

fn clamp_to_i64(value: u64) -> i64 {
    if value > i64::MAX as u64 {
        i64::MAX
    } else {
        value as i64
    }
}

// Truncated to microseconds, the precision of a PostgreSQL timestamp.
fn write_timestamp() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::EncodingError;
    use crate::ledger::json::JsonLedgerCodec;
    use crate::ledger::{
        LedgerEntryChanges, TransactionEnvelope, TransactionMeta, TransactionResult,
        TransactionResultCode,
    };
    use crate::transactions::tests::test_ledger_transaction;

    /// Encodes everything but the meta, which always fails.
    struct BrokenMetaCodec;

    impl LedgerCodec for BrokenMetaCodec {
        fn encode_envelope(&self, envelope: &TransactionEnvelope) -> Result<Vec<u8>, EncodingError> {
            JsonLedgerCodec.encode_envelope(envelope)
        }

        fn encode_result(&self, result: &TransactionResult) -> Result<Vec<u8>, EncodingError> {
            JsonLedgerCodec.encode_result(result)
        }

        fn encode_meta(&self, _meta: &TransactionMeta) -> Result<Vec<u8>, EncodingError> {
            Err(EncodingError::with_context("meta is truncated".to_string()))
        }

        fn encode_fee_changes(
            &self,
            changes: &LedgerEntryChanges,
        ) -> Result<Vec<u8>, EncodingError> {
            JsonLedgerCodec.encode_fee_changes(changes)
        }

        fn decode_result(&self, bytes: &[u8]) -> Result<TransactionResult, EncodingError> {
            JsonLedgerCodec.decode_result(bytes)
        }
    }

    #[test]
    fn test_row_columns_are_derived_from_transaction() {
        let codec = JsonLedgerCodec::new();
        let transaction = test_ledger_transaction(3, TransactionResultCode::TxSuccess);

        let row = transaction_to_row(&codec, &transaction, 123).expect("unable to normalize");

        assert_eq!(row.id, OrderKey::new(123, 3, 0).expect("valid key").to_i64());
        assert_eq!(row.transaction_hash, "03".repeat(32));
        assert_eq!(row.ledger_sequence, 123);
        assert_eq!(row.application_order, 3);
        assert_eq!(
            row.account,
            "GA5WBPYA5Y4WAEHXWR2UKO2UO4BUGHUQ74EUPKON2QHV4WRHOIRNKKH2"
        );
        assert_eq!(row.account_sequence, "8589934596");
        assert_eq!(row.max_fee, 200);
        assert_eq!(row.fee_charged, Some(100));
        assert_eq!(row.operation_count, 2);
        assert_eq!(
            row.signatures,
            vec![base64::encode(&[9u8; 64][..]), base64::encode(&[7u8; 64][..])]
        );
        assert_eq!(row.memo_type, MemoType::Text);
        assert_eq!(row.memo.as_deref(), Some("hello world"));
        assert_eq!(row.valid_after, Some(100));
        assert_eq!(row.valid_before, Some(1_000));
        assert_eq!(row.successful, Some(true));
        assert_eq!(row.created_at, row.updated_at);

        let stored_result = base64::decode(&row.tx_result).expect("valid base64");
        assert_eq!(
            codec.decode_result(&stored_result).expect("valid result"),
            transaction.result.result
        );
    }

    #[test]
    fn test_successful_follows_result_code() {
        let codec = JsonLedgerCodec::new();
        for code in &[
            TransactionResultCode::TxSuccess,
            TransactionResultCode::TxFailed,
            TransactionResultCode::TxBadSeq,
            TransactionResultCode::TxInsufficientFee,
        ] {
            let transaction = test_ledger_transaction(1, *code);
            let row = transaction_to_row(&codec, &transaction, 5).expect("unable to normalize");
            assert_eq!(
                row.successful,
                Some(*code == TransactionResultCode::TxSuccess)
            );
        }
    }

    #[test]
    fn test_text_memo_loses_every_nul() {
        let codec = JsonLedgerCodec::new();
        let mut transaction = test_ledger_transaction(1, TransactionResultCode::TxSuccess);
        transaction.envelope.tx.memo = Memo::Text(b"hi\x00there".to_vec());

        let row = transaction_to_row(&codec, &transaction, 5).expect("unable to normalize");

        assert_eq!(row.memo_type, MemoType::Text);
        assert_eq!(row.memo.as_deref(), Some("hithere"));

        let (_, memo) = memo_columns(&Memo::Text(b"\x00a\x00b\x00".to_vec())).expect("valid memo");
        assert_eq!(memo.as_deref(), Some("ab"));
    }

    #[test]
    fn test_text_memo_invalid_utf8_is_replaced() {
        let (memo_type, memo) =
            memo_columns(&Memo::Text(vec![b'o', b'k', 0xff, 0xfe])).expect("valid memo");
        assert_eq!(memo_type, MemoType::Text);
        assert_eq!(memo.as_deref(), Some("ok\u{fffd}\u{fffd}"));
    }

    #[test]
    fn test_memo_variants() {
        assert_eq!(memo_columns(&Memo::None).expect("valid memo"), (MemoType::None, None));
        assert_eq!(
            memo_columns(&Memo::Id(18_446_744_073_709_551_615)).expect("valid memo"),
            (MemoType::Id, Some("18446744073709551615".to_string()))
        );

        let hash = [0xab; 32];
        let (memo_type, memo) = memo_columns(&Memo::Hash(hash)).expect("valid memo");
        assert_eq!(memo_type, MemoType::Hash);
        assert_eq!(
            base64::decode(memo.expect("memo value")).expect("valid base64"),
            hash.to_vec()
        );

        let (memo_type, memo) = memo_columns(&Memo::Return(hash)).expect("valid memo");
        assert_eq!(memo_type, MemoType::Return);
        assert_eq!(memo, Some(base64::encode(&hash)));
    }

    #[test]
    fn test_unrecognized_memo_is_fatal() {
        let codec = JsonLedgerCodec::new();
        let mut transaction = test_ledger_transaction(1, TransactionResultCode::TxSuccess);
        transaction.envelope.tx.memo = Memo::Unrecognized(7);

        let err = transaction_to_row(&codec, &transaction, 5).unwrap_err();

        assert!(err.is_fatal());
        assert!(err.to_string().contains("invalid memo type: 7"));
    }

    #[test]
    fn test_time_bounds_columns() {
        assert_eq!(time_bounds_columns(None), (None, None));
        assert_eq!(
            time_bounds_columns(Some(TimeBounds {
                min_time: 5,
                max_time: 0
            })),
            (Some(5), None)
        );
        assert_eq!(
            time_bounds_columns(Some(TimeBounds {
                min_time: 5,
                max_time: u64::MAX
            })),
            (Some(5), Some(i64::MAX))
        );
        assert_eq!(
            time_bounds_columns(Some(TimeBounds {
                min_time: 5,
                max_time: 10
            })),
            (Some(5), Some(10))
        );
    }

    #[test]
    fn test_missing_time_bounds_store_nulls() {
        let codec = JsonLedgerCodec::new();
        let mut transaction = test_ledger_transaction(1, TransactionResultCode::TxSuccess);
        transaction.envelope.tx.time_bounds = None;

        let row = transaction_to_row(&codec, &transaction, 5).expect("unable to normalize");
        assert_eq!((row.valid_after, row.valid_before), (None, None));

        transaction.envelope.tx.time_bounds = Some(TimeBounds {
            min_time: 0,
            max_time: 0,
        });
        let row = transaction_to_row(&codec, &transaction, 5).expect("unable to normalize");
        assert_eq!(row.valid_before, None);
    }

    #[test]
    fn test_encoding_failure_is_reported() {
        let transaction = test_ledger_transaction(1, TransactionResultCode::TxSuccess);

        let err = transaction_to_row(&BrokenMetaCodec, &transaction, 5).unwrap_err();

        assert!(!err.is_fatal());
        match err {
            TransactionNormalizeError::EncodingError(err) => {
                assert_eq!(err.to_string(), "meta is truncated")
            }
            other => panic!("expected an encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_index_out_of_order_key_range_is_rejected() {
        let codec = JsonLedgerCodec::new();
        let transaction = test_ledger_transaction(
            OrderKey::MAX_TRANSACTION_ORDER + 1,
            TransactionResultCode::TxSuccess,
        );

        match transaction_to_row(&codec, &transaction, 5) {
            Err(TransactionNormalizeError::InvalidArgumentError(_)) => (),
            other => panic!("expected an invalid argument error, got {:?}", other),
        }
    }
}
