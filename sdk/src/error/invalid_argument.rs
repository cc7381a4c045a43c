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

//! Module containing InvalidArgumentError implementation.

use std::error;
use std::fmt;

/// An error returned when an argument is outside of what the function accepts, such as a ledger
/// sequence too large for an order key.
#[derive(Debug)]
pub struct InvalidArgumentError {
    argument: String,
    message: String,
}

impl InvalidArgumentError {
    /// Constructs a new `InvalidArgumentError`.
    ///
    /// `Display` combines both values as `"{message} ({argument})"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_history_sdk::error::InvalidArgumentError;
    ///
    /// let err = InvalidArgumentError::new("ids".to_string(), "no id arguments provided".to_string());
    /// assert_eq!(format!("{}", err), "no id arguments provided (ids)");
    /// ```
    pub fn new(argument: String, message: String) -> Self {
        Self { argument, message }
    }

    /// Returns the name of the invalid argument.
    pub fn argument(&self) -> &str {
        &self.argument
    }

    /// Returns the reason the argument is invalid.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for InvalidArgumentError {}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", &self.message, &self.argument)
    }
}
