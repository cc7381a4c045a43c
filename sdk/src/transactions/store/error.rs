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
    ConstraintViolationError, ConstraintViolationType, DataCorruptionError, InternalError,
    ResourceTemporarilyUnavailableError,
};

/// Represents TransactionStore errors
#[derive(Debug)]
pub enum TransactionStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    NotFoundError(String),
    DataCorruptionError(DataCorruptionError),
}

impl Error for TransactionStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TransactionStoreError::InternalError(err) => Some(err),
            TransactionStoreError::ConstraintViolationError(err) => Some(err),
            TransactionStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            TransactionStoreError::NotFoundError(_) => None,
            TransactionStoreError::DataCorruptionError(err) => Some(err),
        }
    }
}

impl fmt::Display for TransactionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransactionStoreError::InternalError(err) => err.fmt(f),
            TransactionStoreError::ConstraintViolationError(err) => err.fmt(f),
            TransactionStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            TransactionStoreError::NotFoundError(ref s) => write!(f, "Not found: {}", s),
            TransactionStoreError::DataCorruptionError(err) => err.fmt(f),
        }
    }
}

impl From<DataCorruptionError> for TransactionStoreError {
    fn from(err: DataCorruptionError) -> Self {
        TransactionStoreError::DataCorruptionError(err)
    }
}

impl From<diesel::result::Error> for TransactionStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => TransactionStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    ConstraintViolationType::Unique,
                    Box::new(err),
                ),
            ),
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                _,
            ) => TransactionStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    ConstraintViolationType::ForeignKey,
                    Box::new(err),
                ),
            ),
            _ => TransactionStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

impl From<diesel::r2d2::PoolError> for TransactionStoreError {
    fn from(err: diesel::r2d2::PoolError) -> TransactionStoreError {
        TransactionStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}
