//! Order endpoints: filtered listing and status transitions.

use serde::Serialize;
use store::{Order, OrderFilters, OrderStatus, OrderTable, QueryCache};

use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors, Result};
use crate::transport::Transport;

#[derive(Serialize)]
struct StatusChange {
    status: OrderStatus,
}

#[derive(Serialize)]
struct BulkStatusChange<'a> {
    order_ids: &'a [i64],
    status: OrderStatus,
}

/// Drop every cached order list and the counters derived from them.
pub fn invalidate_orders(cache: &QueryCache) {
    cache.invalidate("orders");
    cache.invalidate("dashboard/stats");
    cache.invalidate("dashboard/revenue");
    cache.invalidate("dashboard/upsell-performance");
}

impl<T: Transport> ApiClient<T> {
    /// `GET /orders` narrowed by the server-side filters.
    pub async fn list_orders(&self, filters: &OrderFilters) -> Result<Vec<Order>> {
        self.get_with_query("/orders", filters.query_pairs()).await
    }

    pub async fn fetch_order(&self, id: i64) -> Result<Order> {
        self.get(&format!("/orders/{id}")).await
    }

    /// Move the order with `id` to `status`, checking legality against its
    /// current server-side state rather than a possibly stale list row.
    pub async fn transition_order(&self, id: i64, status: OrderStatus) -> Result<Order> {
        let current = self.fetch_order(id).await?;
        self.update_order_status(&current, status).await?;
        Ok(Order { status, ..current })
    }

    /// Move one order to `status`. Illegal transitions are refused locally.
    pub async fn update_order_status(&self, order: &Order, status: OrderStatus) -> Result<()> {
        if !order.status.can_transition_to(status) {
            let mut fields = FieldErrors::new();
            fields.insert(
                "status".into(),
                format!("Cannot move a {} order to {}.", order.status, status),
            );
            return Err(ApiError::invalid(fields));
        }
        self.put_unit(&format!("/orders/{}/status", order.id), &StatusChange { status })
            .await?;
        tracing::info!("order {} -> {}", order.id, status);
        Ok(())
    }

    /// Apply `status` to every id in one request.
    ///
    /// The backend applies the change to the whole set or rejects it; the
    /// caller keeps its selection until this returns `Ok`.
    pub async fn bulk_update_status(&self, order_ids: &[i64], status: OrderStatus) -> Result<()> {
        if order_ids.is_empty() {
            let mut fields = FieldErrors::new();
            fields.insert("order_ids".into(), "Select at least one order.".into());
            return Err(ApiError::invalid(fields));
        }
        self.put_unit(
            "/orders/bulk-status",
            &BulkStatusChange {
                order_ids,
                status,
            },
        )
        .await?;
        tracing::info!("{} orders -> {}", order_ids.len(), status);
        Ok(())
    }

    /// Send the table's selection as one bulk request. The selection is
    /// cleared only once the backend accepts it; returns how many orders moved.
    pub async fn apply_bulk_status(&self, table: &mut OrderTable, status: OrderStatus) -> Result<usize> {
        let ids = table.selected_ids();
        self.bulk_update_status(&ids, status).await?;
        table.clear_selection();
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{json_response, order_json, MockTransport};
    use crate::transport::Method;
    use serde_json::json;
    use store::{DateBucket, OrderTable};

    #[tokio::test]
    async fn test_filters_become_query_parameters() {
        let mock = MockTransport::new(|_| json_response(200, json!([order_json(1, "pending", 10.0)])));
        let client = ApiClient::with_transport(mock.clone());
        let filters = OrderFilters {
            status: Some(OrderStatus::Pending),
            date: Some(DateBucket::Week),
            vendor_id: Some(4),
        };

        let orders = client.list_orders(&filters).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(
            mock.last().query,
            vec![
                ("status".to_string(), "pending".to_string()),
                ("date".to_string(), "week".to_string()),
                ("vendor_id".to_string(), "4".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_bulk_update_sends_one_request_with_exact_ids() {
        let mock = MockTransport::new(|_| json_response(200, json!({"updated": 3})));
        let client = ApiClient::with_transport(mock.clone());

        client
            .bulk_update_status(&[3, 5, 8], OrderStatus::Confirmed)
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            (requests[0].method, requests[0].path.as_str()),
            (Method::Put, "/orders/bulk-status")
        );
        assert_eq!(
            requests[0].json().unwrap(),
            &json!({"order_ids": [3, 5, 8], "status": "confirmed"})
        );
    }

    #[tokio::test]
    async fn test_bulk_update_with_no_ids_is_refused_locally() {
        let mock = MockTransport::new(|_| json_response(200, json!({})));
        let client = ApiClient::with_transport(mock.clone());
        let err = client
            .bulk_update_status(&[], OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(err.field_errors().contains_key("order_ids"));
        assert!(mock.requests().is_empty());
    }

    fn pending_table() -> OrderTable {
        let mut table = OrderTable::new();
        table.load(
            vec![
                order_json(1, "pending", 10.0),
                order_json(2, "pending", 20.0),
                order_json(3, "confirmed", 30.0),
            ]
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect(),
        );
        table.toggle_selected(1);
        table.toggle_selected(2);
        table
    }

    #[tokio::test]
    async fn test_accepted_bulk_update_clears_selection() {
        let mock = MockTransport::new(|_| json_response(200, json!({"updated": 2})));
        let client = ApiClient::with_transport(mock.clone());
        let mut table = pending_table();

        let moved = client
            .apply_bulk_status(&mut table, OrderStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(moved, 2);
        assert_eq!(table.selection_len(), 0);
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/orders/bulk-status");
        assert_eq!(
            requests[0].json().unwrap(),
            &json!({"order_ids": [1, 2], "status": "confirmed"})
        );
    }

    #[tokio::test]
    async fn test_single_selected_order_still_uses_bulk_endpoint() {
        let mock = MockTransport::new(|_| json_response(200, json!({"updated": 1})));
        let client = ApiClient::with_transport(mock.clone());
        let mut table = pending_table();
        table.toggle_selected(2);

        client
            .apply_bulk_status(&mut table, OrderStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(mock.last().path, "/orders/bulk-status");
        assert_eq!(
            mock.last().json().unwrap(),
            &json!({"order_ids": [1], "status": "cancelled"})
        );
    }

    #[tokio::test]
    async fn test_rejected_bulk_update_keeps_selection() {
        let mock = MockTransport::new(|_| json_response(500, json!({"message": "Boom"})));
        let client = ApiClient::with_transport(mock);
        let mut table = pending_table();

        let err = client
            .apply_bulk_status(&mut table, OrderStatus::Confirmed)
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Boom");
        assert_eq!(table.selected_ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_transition_checks_fresh_status() {
        // The list row says pending, the server already fulfilled it
        let mock = MockTransport::new(|_| json_response(200, order_json(7, "fulfilled", 5.0)));
        let client = ApiClient::with_transport(mock.clone());

        let err = client
            .transition_order(7, OrderStatus::Confirmed)
            .await
            .unwrap_err();

        assert!(err.field_errors().contains_key("status"));
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!((requests[0].method, requests[0].path.as_str()), (Method::Get, "/orders/7"));
    }

    #[tokio::test]
    async fn test_transition_of_missing_order_fails() {
        let mock = MockTransport::new(|_| json_response(404, json!({"message": "Order not found"})));
        let client = ApiClient::with_transport(mock.clone());

        assert!(client.transition_order(7, OrderStatus::Confirmed).await.is_err());
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transition_returns_updated_order() {
        let mock = MockTransport::new(|req| match req.method {
            Method::Get => json_response(200, order_json(7, "pending", 5.0)),
            _ => json_response(200, json!({})),
        });
        let client = ApiClient::with_transport(mock.clone());

        let order = client
            .transition_order(7, OrderStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(mock.last().path, "/orders/7/status");
    }

    #[tokio::test]
    async fn test_single_transition_checks_legality() {
        let mock = MockTransport::new(|_| json_response(200, json!({})));
        let client = ApiClient::with_transport(mock.clone());
        let fulfilled: Order = serde_json::from_value(order_json(9, "fulfilled", 5.0)).unwrap();
        let pending: Order = serde_json::from_value(order_json(10, "pending", 5.0)).unwrap();

        assert!(client
            .update_order_status(&fulfilled, OrderStatus::Pending)
            .await
            .is_err());
        assert!(mock.requests().is_empty());

        client
            .update_order_status(&pending, OrderStatus::Confirmed)
            .await
            .unwrap();
        let req = mock.last();
        assert_eq!(req.path, "/orders/10/status");
        assert_eq!(req.json().unwrap(), &json!({"status": "confirmed"}));
    }

    #[test]
    fn test_invalidate_orders_drops_filtered_lists() {
        let cache = QueryCache::new();
        cache.put("orders", &json!([]));
        cache.put("orders?status=pending", &json!([]));
        cache.put("dashboard/stats", &json!({}));
        invalidate_orders(&cache);
        assert!(!cache.contains("orders"));
        assert!(!cache.contains("orders?status=pending"));
        assert!(!cache.contains("dashboard/stats"));
    }
}
