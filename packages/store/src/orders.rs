//! # Order table: the derived state behind the Orders view
//!
//! Orders reach the client already narrowed by the server-side filters in
//! [`OrderFilters`] (status, date bucket, vendor). [`OrderTable`] holds that
//! loaded collection and layers the client-side state on top of it:
//!
//! | State | Effect |
//! |-------|--------|
//! | `search` | Case-insensitive substring match over guest name, guest email, upsell title, property name and vendor name (see [`crate::search`]). |
//! | `sort_key` / `direction` | One key from [`SortKey`] with an explicit ascending/descending toggle. Status sorts by domain rank, not alphabetically. |
//! | selection | A set of order ids, independent of search and sort. Cleared whenever a new collection is loaded. |
//!
//! [`OrderTable::stats`] is computed from the loaded collection, **not** from the
//! search-narrowed rows. The statistics therefore reflect server filters only
//! while the visible list reflects server and client filters.
//!
//! The card and table layouts both render [`OrderTable::visible`], so they can
//! never disagree about filter, sort or selection.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{Order, OrderStatus};
use crate::search;

/// Date buckets understood by the `date` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Week,
    Month,
}

impl DateBucket {
    pub const ALL: [DateBucket; 3] = [DateBucket::Today, DateBucket::Week, DateBucket::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::Week => "week",
            DateBucket::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateBucket::Today => "Today",
            DateBucket::Week => "This week",
            DateBucket::Month => "This month",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "today" => Some(DateBucket::Today),
            "week" => Some(DateBucket::Week),
            "month" => Some(DateBucket::Month),
            _ => None,
        }
    }
}

/// Server-side filters for `GET /orders`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub date: Option<DateBucket>,
    pub vendor_id: Option<i64>,
}

impl OrderFilters {
    /// Query parameters for the filters that are set, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(date) = self.date {
            pairs.push(("date".to_string(), date.as_str().to_string()));
        }
        if let Some(vendor_id) = self.vendor_id {
            pairs.push(("vendor_id".to_string(), vendor_id.to_string()));
        }
        pairs
    }

    /// Cache key for this filter combination, e.g. `orders?status=pending`.
    pub fn cache_key(&self) -> String {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return "orders".to_string();
        }
        let query = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("orders?{query}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
    Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Totals over the loaded collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderStats {
    pub total: usize,
    pub revenue: f64,
    counts: [usize; 4],
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = OrderStats::default();
        for order in orders {
            stats.total += 1;
            stats.revenue += order.amount;
            stats.counts[order.status.rank() as usize] += 1;
        }
        stats
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.counts[status.rank() as usize]
    }
}

fn compare(a: &Order, b: &Order, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.created_at.cmp(&b.created_at),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
    }
}

/// Stable in-place sort by one key.
pub fn sort_orders(orders: &mut [&Order], key: SortKey, direction: SortDirection) {
    orders.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderTable {
    orders: Vec<Order>,
    pub search: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    selected: BTreeSet<i64>,
}

impl Default for OrderTable {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            search: String::new(),
            sort_key: SortKey::Date,
            direction: SortDirection::Descending,
            selected: BTreeSet::new(),
        }
    }
}

impl OrderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded collection. The selection does not carry over.
    pub fn load(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.selected.clear();
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Rows after client-side search and sort.
    pub fn visible(&self) -> Vec<&Order> {
        let mut rows = search::filter(&self.orders, &self.search);
        sort_orders(&mut rows, self.sort_key, self.direction);
        rows
    }

    pub fn visible_ids(&self) -> BTreeSet<i64> {
        self.visible().iter().map(|o| o.id).collect()
    }

    /// Statistics over the loaded collection, ignoring the search box.
    pub fn stats(&self) -> OrderStats {
        OrderStats::from_orders(&self.orders)
    }

    /// Sort by `key`. Choosing the current key again flips the direction.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.toggled();
        } else {
            self.sort_key = key;
        }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle_selected(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// True when every visible row is selected and at least one row is visible.
    pub fn all_visible_selected(&self) -> bool {
        let visible = self.visible_ids();
        !visible.is_empty() && visible == self.selected
    }

    /// Toggle between the empty selection and exactly the visible rows.
    pub fn toggle_select_all(&mut self) {
        if self.all_visible_selected() {
            self.selected.clear();
        } else {
            self.selected = self.visible_ids();
        }
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Take over the selection of a working copy, keeping only ids that are
    /// still loaded here.
    pub fn sync_selection(&mut self, other: &OrderTable) {
        self.selected = other
            .selected
            .iter()
            .copied()
            .filter(|id| self.orders.iter().any(|o| o.id == *id))
            .collect();
    }

    /// Target statuses legal for at least one selected order.
    pub fn bulk_targets(&self) -> Vec<OrderStatus> {
        let targets: BTreeSet<OrderStatus> = self
            .orders
            .iter()
            .filter(|o| self.selected.contains(&o.id))
            .flat_map(|o| o.status.next_actions().iter().copied())
            .collect();
        targets.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyRef, UpsellRef, VendorRef};
    use chrono::{TimeZone, Utc};

    fn order(id: i64, status: OrderStatus, amount: f64, day: u32) -> Order {
        Order {
            id,
            property_id: 1,
            upsell_id: 1,
            vendor_id: Some(1),
            guest_name: format!("Guest {id}"),
            guest_email: format!("guest{id}@example.com"),
            guest_phone: None,
            amount,
            currency: "EUR".to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            property: Some(PropertyRef { id: 1, name: "Villa Azul".to_string() }),
            upsell: Some(UpsellRef { id: 1, title: "Airport Transfer".to_string() }),
            vendor: Some(VendorRef { id: 1, name: "Boat Co".to_string() }),
        }
    }

    fn table(orders: Vec<Order>) -> OrderTable {
        let mut t = OrderTable::new();
        t.load(orders);
        t
    }

    fn statuses(t: &OrderTable) -> Vec<OrderStatus> {
        t.visible().iter().map(|o| o.status).collect()
    }

    fn amounts(t: &OrderTable) -> Vec<f64> {
        t.visible().iter().map(|o| o.amount).collect()
    }

    #[test]
    fn test_sort_by_status_and_amount_example() {
        let mut t = table(vec![
            order(1, OrderStatus::Pending, 10.0, 1),
            order(2, OrderStatus::Cancelled, 5.0, 2),
            order(3, OrderStatus::Confirmed, 20.0, 3),
        ]);

        t.sort_key = SortKey::Status;
        t.direction = SortDirection::Ascending;
        assert_eq!(
            statuses(&t),
            vec![OrderStatus::Pending, OrderStatus::Confirmed, OrderStatus::Cancelled]
        );

        t.sort_key = SortKey::Amount;
        t.direction = SortDirection::Descending;
        assert_eq!(amounts(&t), vec![20.0, 10.0, 5.0]);
    }

    #[test]
    fn test_status_sort_is_domain_order_not_alphabetical() {
        let mut t = table(vec![
            order(1, OrderStatus::Fulfilled, 1.0, 1),
            order(2, OrderStatus::Cancelled, 1.0, 2),
            order(3, OrderStatus::Pending, 1.0, 3),
            order(4, OrderStatus::Confirmed, 1.0, 4),
        ]);
        t.sort_key = SortKey::Status;
        t.direction = SortDirection::Ascending;
        assert_eq!(statuses(&t), OrderStatus::ALL.to_vec());

        t.toggle_direction();
        let mut reversed = OrderStatus::ALL.to_vec();
        reversed.reverse();
        assert_eq!(statuses(&t), reversed);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let t = table(vec![
            order(1, OrderStatus::Pending, 1.0, 1),
            order(2, OrderStatus::Pending, 1.0, 9),
            order(3, OrderStatus::Pending, 1.0, 5),
        ]);
        let ids: Vec<i64> = t.visible().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_same_key_flips_direction() {
        let mut t = OrderTable::new();
        assert_eq!(t.direction, SortDirection::Descending);
        t.sort_by(SortKey::Date);
        assert_eq!(t.direction, SortDirection::Ascending);
        t.sort_by(SortKey::Amount);
        assert_eq!(t.sort_key, SortKey::Amount);
        assert_eq!(t.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_search_matches_each_field() {
        let mut a = order(1, OrderStatus::Pending, 1.0, 1);
        a.guest_name = "Maria Lopes".to_string();
        let mut b = order(2, OrderStatus::Pending, 1.0, 2);
        b.guest_email = "JOHN@mail.com".to_string();
        let mut c = order(3, OrderStatus::Pending, 1.0, 3);
        c.upsell = Some(UpsellRef { id: 9, title: "Sunset Cruise".to_string() });
        let mut d = order(4, OrderStatus::Pending, 1.0, 4);
        d.property = Some(PropertyRef { id: 2, name: "Casa Mar".to_string() });
        let mut e = order(5, OrderStatus::Pending, 1.0, 5);
        e.vendor = Some(VendorRef { id: 3, name: "Spa Lux".to_string() });

        let mut t = table(vec![a, b, c, d, e]);
        for (query, expected) in [
            ("maria", 1),
            ("john@", 2),
            ("CRUISE", 3),
            ("casa", 4),
            ("spa lux", 5),
        ] {
            t.search = query.to_string();
            let ids: Vec<i64> = t.visible().iter().map(|o| o.id).collect();
            assert_eq!(ids, vec![expected], "query {query}");
        }

        t.search = "no such thing".to_string();
        assert!(t.visible().is_empty());
    }

    #[test]
    fn test_select_all_respects_search() {
        let mut a = order(1, OrderStatus::Pending, 1.0, 1);
        a.guest_name = "Alice".to_string();
        let mut b = order(2, OrderStatus::Pending, 1.0, 2);
        b.guest_name = "Bob".to_string();
        let mut c = order(3, OrderStatus::Pending, 1.0, 3);
        c.guest_name = "Alina".to_string();
        let mut t = table(vec![a, b, c]);

        t.search = "ali".to_string();
        t.toggle_select_all();
        assert_eq!(t.selected_ids(), vec![1, 3]);
        assert!(!t.is_selected(2));
        assert!(t.all_visible_selected());

        t.toggle_select_all();
        assert!(t.selected_ids().is_empty());
    }

    #[test]
    fn test_select_all_replaces_partial_selection() {
        let mut t = table(vec![
            order(1, OrderStatus::Pending, 1.0, 1),
            order(2, OrderStatus::Pending, 1.0, 2),
        ]);
        t.toggle_selected(2);
        t.toggle_select_all();
        assert_eq!(t.selected_ids(), vec![1, 2]);
    }

    #[test]
    fn test_select_all_on_empty_view_selects_nothing() {
        let mut t = table(vec![order(1, OrderStatus::Pending, 1.0, 1)]);
        t.search = "zzz".to_string();
        t.toggle_select_all();
        assert_eq!(t.selection_len(), 0);
        assert!(!t.all_visible_selected());
    }

    #[test]
    fn test_selection_survives_resort_but_not_reload() {
        let mut t = table(vec![
            order(1, OrderStatus::Pending, 1.0, 1),
            order(2, OrderStatus::Confirmed, 2.0, 2),
        ]);
        t.toggle_selected(1);
        t.sort_by(SortKey::Amount);
        t.toggle_direction();
        assert!(t.is_selected(1));

        t.load(vec![order(1, OrderStatus::Pending, 1.0, 1)]);
        assert_eq!(t.selection_len(), 0);
    }

    // Documented behaviour, not assumed correct: statistics follow the server
    // filters only, so narrowing by search leaves them unchanged.
    #[test]
    fn test_stats_ignore_client_search() {
        let mut a = order(1, OrderStatus::Pending, 10.0, 1);
        a.guest_name = "Alice".to_string();
        let mut t = table(vec![
            a,
            order(2, OrderStatus::Cancelled, 5.0, 2),
            order(3, OrderStatus::Confirmed, 20.0, 3),
        ]);
        t.search = "alice".to_string();
        assert_eq!(t.visible().len(), 1);

        let stats = t.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.revenue, 35.0);
        assert_eq!(stats.count(OrderStatus::Pending), 1);
        assert_eq!(stats.count(OrderStatus::Confirmed), 1);
        assert_eq!(stats.count(OrderStatus::Cancelled), 1);
        assert_eq!(stats.count(OrderStatus::Fulfilled), 0);
    }

    #[test]
    fn test_bulk_targets_union_of_legal_actions() {
        let mut t = table(vec![
            order(1, OrderStatus::Pending, 1.0, 1),
            order(2, OrderStatus::Confirmed, 1.0, 2),
            order(3, OrderStatus::Fulfilled, 1.0, 3),
        ]);
        t.toggle_selected(3);
        assert!(t.bulk_targets().is_empty());

        t.toggle_selected(1);
        t.toggle_selected(2);
        assert_eq!(
            t.bulk_targets(),
            vec![OrderStatus::Confirmed, OrderStatus::Fulfilled, OrderStatus::Cancelled]
        );
    }

    #[test]
    fn test_filters_query_and_cache_key() {
        let none = OrderFilters::default();
        assert!(none.query_pairs().is_empty());
        assert_eq!(none.cache_key(), "orders");

        let filters = OrderFilters {
            status: Some(OrderStatus::Pending),
            date: Some(DateBucket::Week),
            vendor_id: Some(4),
        };
        assert_eq!(filters.cache_key(), "orders?status=pending&date=week&vendor_id=4");
    }

    #[test]
    fn test_sync_selection_keeps_loaded_ids() {
        let mut t = table(vec![
            order(1, OrderStatus::Pending, 1.0, 1),
            order(2, OrderStatus::Pending, 1.0, 2),
        ]);
        let mut copy = t.clone();
        copy.toggle_selected(2);
        copy.toggle_selected(9);

        t.sync_selection(&copy);
        assert_eq!(t.selected_ids(), vec![2]);

        copy.clear_selection();
        t.sync_selection(&copy);
        assert_eq!(t.selection_len(), 0);
    }
}
