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

//! Packed total-order identifiers for ledger transactions and operations.
//!
//! An `OrderKey` packs `(ledger sequence, transaction order, operation order)` into a single
//! `i64` with the ledger sequence in the upper 32 bits, the transaction order in the next 20 bits
//! and the operation order in the lowest 12 bits. Comparing packed keys is the same as comparing
//! the triples lexicographically, so keys double as primary keys and as paging cursors.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::InvalidArgumentError;

const LEDGER_SHIFT: u32 = 32;
const TRANSACTION_SHIFT: u32 = 12;
const TRANSACTION_MASK: i64 = (1 << 20) - 1;
const OPERATION_MASK: i64 = (1 << 12) - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey {
    ledger_sequence: u32,
    transaction_order: u32,
    operation_order: u32,
}

impl OrderKey {
    /// Largest ledger sequence which keeps the packed key positive.
    pub const MAX_LEDGER_SEQUENCE: u32 = i32::MAX as u32;
    pub const MAX_TRANSACTION_ORDER: u32 = TRANSACTION_MASK as u32;
    pub const MAX_OPERATION_ORDER: u32 = OPERATION_MASK as u32;

    /// Creates a key, rejecting components which do not fit in their bit ranges.
    ///
    /// The key packing to `i64::MAX` is reserved as the exclusive end of the last ledger's range
    /// and is rejected as well.
    pub fn new(
        ledger_sequence: u32,
        transaction_order: u32,
        operation_order: u32,
    ) -> Result<Self, InvalidArgumentError> {
        if ledger_sequence > Self::MAX_LEDGER_SEQUENCE {
            return Err(InvalidArgumentError::new(
                "ledger_sequence".to_string(),
                format!(
                    "{} exceeds the maximum of {}",
                    ledger_sequence,
                    Self::MAX_LEDGER_SEQUENCE
                ),
            ));
        }
        if transaction_order > Self::MAX_TRANSACTION_ORDER {
            return Err(InvalidArgumentError::new(
                "transaction_order".to_string(),
                format!(
                    "{} exceeds the maximum of {}",
                    transaction_order,
                    Self::MAX_TRANSACTION_ORDER
                ),
            ));
        }
        if operation_order > Self::MAX_OPERATION_ORDER {
            return Err(InvalidArgumentError::new(
                "operation_order".to_string(),
                format!(
                    "{} exceeds the maximum of {}",
                    operation_order,
                    Self::MAX_OPERATION_ORDER
                ),
            ));
        }

        let key = Self {
            ledger_sequence,
            transaction_order,
            operation_order,
        };
        if key.to_i64() == i64::MAX {
            return Err(InvalidArgumentError::new(
                "order_key".to_string(),
                format!("{} is reserved", i64::MAX),
            ));
        }

        Ok(key)
    }

    /// Unpacks a key previously produced by `to_i64`.
    pub fn parse(id: i64) -> Result<Self, InvalidArgumentError> {
        if id < 0 {
            return Err(InvalidArgumentError::new(
                "id".to_string(),
                format!("{} is negative", id),
            ));
        }

        Self::new(
            (id >> LEDGER_SHIFT) as u32,
            ((id >> TRANSACTION_SHIFT) & TRANSACTION_MASK) as u32,
            (id & OPERATION_MASK) as u32,
        )
    }

    pub fn to_i64(&self) -> i64 {
        (i64::from(self.ledger_sequence) << LEDGER_SHIFT)
            | (i64::from(self.transaction_order) << TRANSACTION_SHIFT)
            | i64::from(self.operation_order)
    }

    pub fn ledger_sequence(&self) -> u32 {
        self.ledger_sequence
    }

    pub fn transaction_order(&self) -> u32 {
        self.transaction_order
    }

    pub fn operation_order(&self) -> u32 {
        self.operation_order
    }

    /// Returns the half-open range of packed keys belonging to one ledger.
    ///
    /// The end of the range for `MAX_LEDGER_SEQUENCE` is `i64::MAX`, which `new` never produces,
    /// so every valid key of that ledger is inside it. Sequences past it produce an empty range.
    pub fn ledger_range(ledger_sequence: u32) -> Range<i64> {
        if ledger_sequence > Self::MAX_LEDGER_SEQUENCE {
            return i64::MAX..i64::MAX;
        }

        let start = i64::from(ledger_sequence) << LEDGER_SHIFT;
        let end = if ledger_sequence == Self::MAX_LEDGER_SEQUENCE {
            i64::MAX
        } else {
            i64::from(ledger_sequence + 1) << LEDGER_SHIFT
        };

        start..end
    }

    /// Returns the largest key inside the given ledger, usable as a cursor which skips everything
    /// up to and including that ledger.
    pub fn after_ledger(ledger_sequence: u32) -> Result<i64, InvalidArgumentError> {
        if ledger_sequence > Self::MAX_LEDGER_SEQUENCE {
            return Err(InvalidArgumentError::new(
                "ledger_sequence".to_string(),
                format!(
                    "{} exceeds the maximum of {}",
                    ledger_sequence,
                    Self::MAX_LEDGER_SEQUENCE
                ),
            ));
        }

        Ok(Self::ledger_range(ledger_sequence).end - 1)
    }
}

impl From<OrderKey> for i64 {
    fn from(key: OrderKey) -> Self {
        key.to_i64()
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_i64())
    }
}

impl FromStr for OrderKey {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.parse::<i64>().map_err(|err| {
            InvalidArgumentError::new("order_key".to_string(), format!("{}: {}", s, err))
        })?;
        Self::parse(id)
    }
}
