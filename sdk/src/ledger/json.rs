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

//! A `LedgerCodec` producing JSON payloads.
//!
//! Suitable for development databases and tests, where the ledger's own binary codec is not
//! available. Payloads written with it are not interchangeable with payloads of another codec.

use serde::Serialize;

use crate::error::EncodingError;

use super::{LedgerCodec, LedgerEntryChanges, TransactionEnvelope, TransactionMeta, TransactionResult};

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLedgerCodec;

impl JsonLedgerCodec {
    pub fn new() -> Self {
        JsonLedgerCodec
    }

    fn encode<T: Serialize>(&self, value: &T, what: &str) -> Result<Vec<u8>, EncodingError> {
        serde_json::to_vec(value).map_err(|err| {
            EncodingError::from_source_with_context(
                Box::new(err),
                format!("Unable to encode transaction {}", what),
            )
        })
    }
}

impl LedgerCodec for JsonLedgerCodec {
    fn encode_envelope(&self, envelope: &TransactionEnvelope) -> Result<Vec<u8>, EncodingError> {
        self.encode(envelope, "envelope")
    }

    fn encode_result(&self, result: &TransactionResult) -> Result<Vec<u8>, EncodingError> {
        self.encode(result, "result")
    }

    fn encode_meta(&self, meta: &TransactionMeta) -> Result<Vec<u8>, EncodingError> {
        self.encode(meta, "meta")
    }

    fn encode_fee_changes(&self, changes: &LedgerEntryChanges) -> Result<Vec<u8>, EncodingError> {
        self.encode(changes, "fee changes")
    }

    fn decode_result(&self, bytes: &[u8]) -> Result<TransactionResult, EncodingError> {
        serde_json::from_slice(bytes).map_err(|err| {
            EncodingError::from_source_with_context(
                Box::new(err),
                "Unable to decode transaction result".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ledger::TransactionResultCode;

    #[test]
    fn test_result_decodes_to_same_code() {
        let codec = JsonLedgerCodec::new();
        let result = TransactionResult {
            fee_charged: 300,
            code: TransactionResultCode::TxBadSeq,
        };

        let bytes = codec.encode_result(&result).expect("unable to encode");
        let decoded = codec.decode_result(&bytes).expect("unable to decode");

        assert_eq!(decoded, result);
    }

    #[test]
    fn test_garbage_is_an_encoding_error() {
        let codec = JsonLedgerCodec::new();
        let err = codec.decode_result(b"not a result").unwrap_err();
        assert!(err.to_string().starts_with("Unable to decode transaction result"));
    }
}
