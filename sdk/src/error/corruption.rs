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

//! Module containing DataCorruptionError implementation.

use std::error;
use std::fmt;

/// An error returned when a persisted row breaks an invariant that held when it was written,
/// e.g. a `successful` flag which disagrees with the stored transaction result.
///
/// The store itself is no longer trustworthy when this is returned; it must reach the reader.
#[derive(Debug)]
pub struct DataCorruptionError {
    message: String,
    source: Option<Box<dyn error::Error>>,
}

impl DataCorruptionError {
    /// Constructs a new `DataCorruptionError`.
    pub fn with_message(message: String) -> Self {
        Self {
            message,
            source: None,
        }
    }

    /// Constructs a new `DataCorruptionError` caused by another error, such as a stored result
    /// payload which no longer decodes.
    pub fn from_source_with_message(source: Box<dyn error::Error>, message: String) -> Self {
        Self {
            message,
            source: Some(source),
        }
    }
}

impl error::Error for DataCorruptionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for DataCorruptionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "Corrupted data! {}: {}", self.message, err),
            None => write!(f, "Corrupted data! {}", self.message),
        }
    }
}
