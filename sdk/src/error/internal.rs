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

//! Module containing InternalError implementation.

use std::error;
use std::fmt;

struct Source {
    prefix: Option<String>,
    source: Box<dyn error::Error>,
}

/// An error which is returned for reasons internal to the function.
///
/// Used when a store or codec fails in a way the caller cannot act on beyond reporting it, for
/// example a database error which is not a constraint violation.
pub struct InternalError {
    message: Option<String>,
    source: Option<Source>,
}

impl InternalError {
    /// Constructs a new `InternalError` from a source error; `Display` passes through the source.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_history_sdk::error::InternalError;
    ///
    /// let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
    /// let err = InternalError::from_source(Box::new(io_err));
    /// assert_eq!(format!("{}", err), "disk gone");
    /// ```
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self {
            message: None,
            source: Some(Source {
                prefix: None,
                source,
            }),
        }
    }

    /// Constructs a new `InternalError` from a source error and a message; `Display` shows only
    /// the message.
    pub fn from_source_with_message(source: Box<dyn error::Error>, message: String) -> Self {
        Self {
            message: Some(message),
            source: Some(Source {
                prefix: None,
                source,
            }),
        }
    }

    /// Constructs a new `InternalError` from a source error and a prefix; `Display` is
    /// `"{prefix}: {source}"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_history_sdk::error::InternalError;
    ///
    /// let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
    /// let err = InternalError::from_source_with_prefix(
    ///     Box::new(io_err),
    ///     "Failed to build connection pool".to_string(),
    /// );
    /// assert_eq!(format!("{}", err), "Failed to build connection pool: disk gone");
    /// ```
    pub fn from_source_with_prefix(source: Box<dyn error::Error>, prefix: String) -> Self {
        Self {
            message: None,
            source: Some(Source {
                prefix: Some(prefix),
                source,
            }),
        }
    }

    /// Constructs a new `InternalError` with only a message.
    pub fn with_message(message: String) -> Self {
        Self {
            message: Some(message),
            source: None,
        }
    }
}

impl error::Error for InternalError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|s| s.source.as_ref())
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(m), _) => write!(f, "{}", m),
            (None, Some(Source { prefix: Some(p), source })) => write!(f, "{}: {}", p, source),
            (None, Some(Source { prefix: None, source })) => write!(f, "{}", source),
            (None, None) => f.write_str("InternalError"),
        }
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("InternalError");
        if let Some(m) = &self.message {
            debug.field("message", m);
        }
        if let Some(s) = &self.source {
            if let Some(p) = &s.prefix {
                debug.field("prefix", p);
            }
            debug.field("source", &s.source);
        }
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_variants() {
        let err = InternalError::with_message("pool closed".to_string());
        assert_eq!(err.to_string(), "pool closed");

        let err = InternalError::from_source(Box::new(InternalError::with_message(
            "pool closed".to_string(),
        )));
        assert_eq!(err.to_string(), "pool closed");

        let err = InternalError::from_source_with_prefix(
            Box::new(InternalError::with_message("pool closed".to_string())),
            "Unable to flush".to_string(),
        );
        assert_eq!(err.to_string(), "Unable to flush: pool closed");

        let err = InternalError::from_source_with_message(
            Box::new(InternalError::with_message("unused".to_string())),
            "flush failed".to_string(),
        );
        assert_eq!(err.to_string(), "flush failed");
    }

    #[test]
    fn test_debug_with_message() {
        let err = InternalError::with_message("pool closed".to_string());
        assert_eq!(
            format!("{:?}", err),
            "InternalError { message: \"pool closed\" }"
        );
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;

        let err = InternalError::from_source(Box::new(InternalError::with_message(
            "inner".to_string(),
        )));
        assert_eq!(err.source().map(|s| s.to_string()), Some("inner".to_string()));
        assert!(InternalError::with_message("x".into()).source().is_none());
    }
}
