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

use std::error::Error;
use std::fmt;

use crate::error::{
    DataCorruptionError, EncodingError, InvalidArgumentError, InvariantViolationError,
};

use super::batch::BatchWriteError;
use super::store::TransactionStoreError;

/// Represents errors turning a ledger transaction into a row
#[derive(Debug)]
pub enum TransactionNormalizeError {
    EncodingError(EncodingError),
    InvalidArgumentError(InvalidArgumentError),
    InvariantViolation(InvariantViolationError),
}

impl TransactionNormalizeError {
    /// Whether ingestion must stop rather than continue with the next ledger.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TransactionNormalizeError::InvariantViolation(_))
    }
}

impl Error for TransactionNormalizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TransactionNormalizeError::EncodingError(err) => Some(err),
            TransactionNormalizeError::InvalidArgumentError(err) => Some(err),
            TransactionNormalizeError::InvariantViolation(err) => Some(err),
        }
    }
}

impl fmt::Display for TransactionNormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransactionNormalizeError::EncodingError(err) => err.fmt(f),
            TransactionNormalizeError::InvalidArgumentError(err) => err.fmt(f),
            TransactionNormalizeError::InvariantViolation(err) => {
                write!(f, "Invariant violation: {}", err)
            }
        }
    }
}

impl From<EncodingError> for TransactionNormalizeError {
    fn from(err: EncodingError) -> Self {
        TransactionNormalizeError::EncodingError(err)
    }
}

impl From<InvalidArgumentError> for TransactionNormalizeError {
    fn from(err: InvalidArgumentError) -> Self {
        TransactionNormalizeError::InvalidArgumentError(err)
    }
}

/// Represents errors adding ledger transactions to a batch
#[derive(Debug)]
pub enum TransactionBatchInsertError {
    NormalizeError(TransactionNormalizeError),
    WriteError(BatchWriteError),
}

impl Error for TransactionBatchInsertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TransactionBatchInsertError::NormalizeError(err) => Some(err),
            TransactionBatchInsertError::WriteError(err) => Some(err),
        }
    }
}

impl fmt::Display for TransactionBatchInsertError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransactionBatchInsertError::NormalizeError(err) => err.fmt(f),
            TransactionBatchInsertError::WriteError(err) => err.fmt(f),
        }
    }
}

impl From<TransactionNormalizeError> for TransactionBatchInsertError {
    fn from(err: TransactionNormalizeError) -> Self {
        TransactionBatchInsertError::NormalizeError(err)
    }
}

impl From<BatchWriteError> for TransactionBatchInsertError {
    fn from(err: BatchWriteError) -> Self {
        TransactionBatchInsertError::WriteError(err)
    }
}

/// Represents errors reading transactions through the read filter
#[derive(Debug)]
pub enum TransactionQueryError {
    TransactionStoreError(TransactionStoreError),
    InvalidArgumentError(InvalidArgumentError),
    DataCorruption(DataCorruptionError),
}

impl Error for TransactionQueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TransactionQueryError::TransactionStoreError(err) => Some(err),
            TransactionQueryError::InvalidArgumentError(err) => Some(err),
            TransactionQueryError::DataCorruption(err) => Some(err),
        }
    }
}

impl fmt::Display for TransactionQueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransactionQueryError::TransactionStoreError(err) => err.fmt(f),
            TransactionQueryError::InvalidArgumentError(err) => err.fmt(f),
            TransactionQueryError::DataCorruption(err) => err.fmt(f),
        }
    }
}

impl From<TransactionStoreError> for TransactionQueryError {
    fn from(err: TransactionStoreError) -> Self {
        TransactionQueryError::TransactionStoreError(err)
    }
}

impl From<DataCorruptionError> for TransactionQueryError {
    fn from(err: DataCorruptionError) -> Self {
        TransactionQueryError::DataCorruption(err)
    }
}
