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

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidArgumentError;

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_PAGE_LIMIT: u64 = 200;

/// Direction in which a page walks the order keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

impl Default for Order {
    fn default() -> Self {
        Order::Asc
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("asc"),
            Order::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for Order {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(InvalidArgumentError::new(
                "order".to_string(),
                format!("must be asc or desc, got {}", s),
            )),
        }
    }
}

/// A cursor based page window over order keys.
///
/// An ascending page returns keys strictly greater than the cursor, a descending page keys
/// strictly smaller. Without a cursor the page starts at the respective end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    cursor: Option<i64>,
    order: Order,
    limit: u64,
}

impl PageQuery {
    pub fn new(cursor: Option<i64>, order: Order, limit: u64) -> Result<Self, InvalidArgumentError> {
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(InvalidArgumentError::new(
                "limit".to_string(),
                format!("must be between 1 and {}, got {}", MAX_PAGE_LIMIT, limit),
            ));
        }
        if let Some(cursor) = cursor {
            if cursor < 0 {
                return Err(InvalidArgumentError::new(
                    "cursor".to_string(),
                    format!("must not be negative, got {}", cursor),
                ));
            }
        }

        Ok(Self {
            cursor,
            order,
            limit,
        })
    }

    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether the given key falls after the cursor in this page's direction.
    pub fn admits(&self, id: i64) -> bool {
        match (self.cursor, self.order) {
            (None, _) => true,
            (Some(cursor), Order::Asc) => id > cursor,
            (Some(cursor), Order::Desc) => id < cursor,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            cursor: None,
            order: Order::Asc,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
