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

//! Basic errors shared by the history stores, the normalizer and the consistency checker.
//!
//! Each error here is usable on its own or as a variant of a module specific error `enum`, for
//! example `TransactionStoreError`.
//!
//! # Examples
//!
//! ```
//! use ledger_history_sdk::error::{DataCorruptionError, InternalError};
//!
//! #[derive(Debug)]
//! enum ReadError {
//!     InternalError(InternalError),
//!     DataCorruption(DataCorruptionError),
//! }
//!
//! fn check_flag(successful: bool, result_is_success: bool) -> Result<(), ReadError> {
//!     if successful != result_is_success {
//!         return Err(ReadError::DataCorruption(DataCorruptionError::with_message(
//!             "flag disagrees with result".to_string(),
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_flag(true, true).is_ok());
//! assert!(check_flag(true, false).is_err());
//! ```

mod constraint_violation;
mod corruption;
mod encoding;
mod internal;
mod invalid_argument;
mod invariant;
mod unavailable;

pub use constraint_violation::{ConstraintViolationError, ConstraintViolationType};
pub use corruption::DataCorruptionError;
pub use encoding::EncodingError;
pub use internal::InternalError;
pub use invalid_argument::InvalidArgumentError;
pub use invariant::InvariantViolationError;
pub use unavailable::ResourceTemporarilyUnavailableError;
