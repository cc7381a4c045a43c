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

use crate::error::EncodingError;

use super::{LedgerEntryChanges, TransactionEnvelope, TransactionMeta, TransactionResult};

/// Converts the parts of a ledger transaction to and from their binary form.
///
/// The binary codec of the ledger is provided by the caller; the history tables only need the
/// payloads as bytes and the ability to decode a stored result back into its status code.
pub trait LedgerCodec: Send + Sync {
    fn encode_envelope(&self, envelope: &TransactionEnvelope) -> Result<Vec<u8>, EncodingError>;

    fn encode_result(&self, result: &TransactionResult) -> Result<Vec<u8>, EncodingError>;

    fn encode_meta(&self, meta: &TransactionMeta) -> Result<Vec<u8>, EncodingError>;

    fn encode_fee_changes(&self, changes: &LedgerEntryChanges) -> Result<Vec<u8>, EncodingError>;

    fn decode_result(&self, bytes: &[u8]) -> Result<TransactionResult, EncodingError>;
}
