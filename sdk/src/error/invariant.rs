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

//! Module containing InvariantViolationError implementation.

use std::error;
use std::fmt;

/// An error returned when the input contains a protocol variant this library does not know how
/// to store, such as an unrecognized memo type.
///
/// This is fatal for the ingestion run: no further rows may be produced from the offending
/// ledger, since writing them would persist a row which cannot be read back faithfully.
#[derive(Debug)]
pub struct InvariantViolationError {
    message: String,
}

impl InvariantViolationError {
    /// Constructs a new `InvariantViolationError`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_history_sdk::error::InvariantViolationError;
    ///
    /// let err = InvariantViolationError::with_message("invalid memo type: 9".to_string());
    /// assert_eq!(format!("{}", err), "invalid memo type: 9");
    /// ```
    pub fn with_message(message: String) -> Self {
        Self { message }
    }
}

impl error::Error for InvariantViolationError {}

impl fmt::Display for InvariantViolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}
