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

//! The selection a transaction read is made of.

use std::ops::Range;

use crate::order_key::OrderKey;
use crate::paging::{Order, PageQuery};

/// An immutable description of which transaction rows to read.
///
/// Scoping clauses (account, ledger, page window) are conjunctive. Failed transactions are left
/// out unless `include_failed` is set; that predicate is always applied after every scoping
/// clause. Each method consumes the filter and returns the refined one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    account: Option<String>,
    id_range: Option<Range<i64>>,
    page: Option<PageQuery>,
    include_failed: bool,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the rows to transactions the account participated in.
    pub fn for_account(mut self, address: &str) -> Self {
        self.account = Some(address.to_string());
        self
    }

    /// Restricts the rows to the transactions of one ledger.
    pub fn for_ledger(self, ledger_sequence: u32) -> Self {
        self.for_id_range(OrderKey::ledger_range(ledger_sequence))
    }

    /// Restricts the rows to the half-open range of order keys. Successive ranges intersect.
    pub fn for_id_range(mut self, range: Range<i64>) -> Self {
        self.id_range = Some(match self.id_range.take() {
            Some(current) => current.start.max(range.start)..current.end.min(range.end),
            None => range,
        });
        self
    }

    pub fn page(mut self, page: PageQuery) -> Self {
        self.page = Some(page);
        self
    }

    pub fn include_failed(mut self) -> Self {
        self.include_failed = true;
        self
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn id_range(&self) -> Option<&Range<i64>> {
        self.id_range.as_ref()
    }

    pub fn page_query(&self) -> Option<&PageQuery> {
        self.page.as_ref()
    }

    pub fn includes_failed(&self) -> bool {
        self.include_failed
    }

    /// The order rows are returned in; ascending by id unless a descending page was requested.
    pub fn order(&self) -> Order {
        self.page
            .as_ref()
            .map(|page| page.order())
            .unwrap_or_default()
    }

    /// Evaluates the id predicates of this filter against a single row id. Account scoping is
    /// resolved by the store.
    pub fn admits_id(&self, id: i64) -> bool {
        self.id_range
            .as_ref()
            .map(|range| range.contains(&id))
            .unwrap_or(true)
            && self
                .page
                .as_ref()
                .map(|page| page.admits(id))
                .unwrap_or(true)
    }

    /// Evaluates the success predicate against a row's `successful` column.
    pub fn admits_success(&self, successful: Option<bool>) -> bool {
        self.include_failed || successful.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_excludes_failed() {
        let filter = TransactionFilter::new();

        assert!(!filter.includes_failed());
        assert!(filter.admits_success(Some(true)));
        assert!(filter.admits_success(None));
        assert!(!filter.admits_success(Some(false)));

        let filter = filter.include_failed();
        assert!(filter.admits_success(Some(false)));
    }

    #[test]
    fn test_ledger_scope_uses_order_key_range() {
        let filter = TransactionFilter::new().for_ledger(7);
        let range = OrderKey::ledger_range(7);

        assert_eq!(filter.id_range(), Some(&range));
        assert!(filter.admits_id(range.start));
        assert!(!filter.admits_id(range.end));
        assert!(!filter.admits_id(range.start - 1));
    }

    #[test]
    fn test_ranges_intersect() {
        let filter = TransactionFilter::new()
            .for_id_range(10..100)
            .for_id_range(50..200);

        assert_eq!(filter.id_range(), Some(&(50..100)));
    }

    #[test]
    fn test_page_window_composes_with_scope() {
        let range = OrderKey::ledger_range(3);
        let cursor = range.start + 4096;
        let filter = TransactionFilter::new()
            .for_account("GA5WBPYA5Y4WAEHXWR2UKO2UO4BUGHUQ74EUPKON2QHV4WRHOIRNKKH2")
            .for_ledger(3)
            .page(PageQuery::new(Some(cursor), Order::Desc, 5).expect("valid page"));

        assert_eq!(
            filter.account(),
            Some("GA5WBPYA5Y4WAEHXWR2UKO2UO4BUGHUQ74EUPKON2QHV4WRHOIRNKKH2")
        );
        assert_eq!(filter.order(), Order::Desc);
        assert!(filter.admits_id(range.start));
        assert!(!filter.admits_id(cursor));
        assert!(!filter.admits_id(range.end + 1));
    }
}
