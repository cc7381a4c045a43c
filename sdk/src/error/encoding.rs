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

//! Module containing EncodingError implementation.

use std::error;
use std::fmt;

/// An error returned when a ledger payload (envelope, result, meta or fee changes) cannot be
/// encoded or decoded.
///
/// Ingestion of the transaction which produced it is aborted; the row is never written.
#[derive(Debug)]
pub struct EncodingError {
    context: String,
    source: Option<Box<dyn error::Error>>,
}

impl EncodingError {
    /// Constructs a new `EncodingError` describing what was being encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_history_sdk::error::EncodingError;
    ///
    /// let err = EncodingError::with_context("unable to encode transaction meta".to_string());
    /// assert_eq!(format!("{}", err), "unable to encode transaction meta");
    /// ```
    pub fn with_context(context: String) -> Self {
        Self {
            context,
            source: None,
        }
    }

    /// Constructs a new `EncodingError` from the codec's own error.
    pub fn from_source_with_context(source: Box<dyn error::Error>, context: String) -> Self {
        Self {
            context,
            source: Some(source),
        }
    }
}

impl error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}: {}", self.context, err),
            None => f.write_str(&self.context),
        }
    }
}
