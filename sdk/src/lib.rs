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

//! Ledger transaction history.
//!
//! Normalizes decoded ledger transactions into rows of the transaction history tables, buffers
//! the rows into bounded batch writes, serves filtered reads that re-check every returned row and
//! verifies that the shadow transactions table is an exact copy of the legacy table before
//! readers are allowed to switch to it.

extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate log;

pub mod config;
pub mod error;
mod hex;
pub mod ingest;
pub mod ledger;
pub mod migrations;
pub mod order_key;
pub mod paging;
pub mod store;
pub mod transactions;
