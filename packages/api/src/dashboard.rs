//! Aggregates for the Analytics view and the CSV exports.

use store::{DashboardStats, OrderFilters, RevenuePoint, UpsellPerformance};

use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::Transport;

pub const STATS_KEY: &str = "dashboard/stats";
pub const PERFORMANCE_KEY: &str = "dashboard/upsell-performance";

/// Windows offered by the day selector.
pub const DAY_WINDOWS: [u32; 4] = [7, 30, 90, 365];

pub fn revenue_key(days: u32) -> String {
    format!("dashboard/revenue?days={days}")
}

/// File name offered when saving an export.
pub fn export_file_name(kind: &str, days: Option<u32>) -> String {
    let today = chrono::Local::now().format("%Y-%m-%d");
    match days {
        Some(days) => format!("{kind}-{days}d-{today}.csv"),
        None => format!("{kind}-{today}.csv"),
    }
}

fn days_query(days: u32) -> Vec<(String, String)> {
    vec![("days".to_string(), days.to_string())]
}

impl<T: Transport> ApiClient<T> {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get("/dashboard/stats").await
    }

    /// Daily revenue over the last `days` days.
    pub async fn revenue(&self, days: u32) -> Result<Vec<RevenuePoint>> {
        self.get_with_query("/dashboard/revenue", days_query(days))
            .await
    }

    pub async fn upsell_performance(&self) -> Result<Vec<UpsellPerformance>> {
        self.get("/dashboard/upsell-performance").await
    }

    /// Accounting CSV for the last `days` days, returned verbatim.
    pub async fn export_accounting(&self, days: u32) -> Result<String> {
        self.get_text("/export/accounting", days_query(days)).await
    }

    /// Orders CSV honouring the same server-side filters as the Orders view.
    pub async fn export_orders(&self, filters: &OrderFilters) -> Result<String> {
        self.get_text("/export/orders", filters.query_pairs()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{json_response, text_response, MockTransport};
    use serde_json::json;
    use store::OrderStatus;

    #[tokio::test]
    async fn test_revenue_passes_days_and_accepts_total_alias() {
        let mock = MockTransport::new(|_| {
            json_response(200, json!([{"date": "2026-10-01", "total": 120.5, "orders": 3}]))
        });
        let client = ApiClient::with_transport(mock.clone());
        let points = client.revenue(30).await.unwrap();
        assert_eq!(points[0].revenue, 120.5);
        assert_eq!(mock.last().query, vec![("days".to_string(), "30".to_string())]);
    }

    #[tokio::test]
    async fn test_accounting_export_is_returned_verbatim() {
        let csv = "date,order,amount\n2026-10-01,1,10.00\n";
        let mock = MockTransport::new(move |_| text_response(200, csv));
        let client = ApiClient::with_transport(mock.clone());
        assert_eq!(client.export_accounting(7).await.unwrap(), csv);
        assert_eq!(mock.last().path, "/export/accounting");
    }

    #[tokio::test]
    async fn test_orders_export_uses_filters() {
        let mock = MockTransport::new(|_| text_response(200, "id\n"));
        let client = ApiClient::with_transport(mock.clone());
        let filters = OrderFilters {
            status: Some(OrderStatus::Fulfilled),
            ..OrderFilters::default()
        };
        client.export_orders(&filters).await.unwrap();
        assert_eq!(
            mock.last().query,
            vec![("status".to_string(), "fulfilled".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_export_surfaces_message() {
        let mock = MockTransport::new(|_| json_response(500, json!({"message": "Export failed"})));
        let client = ApiClient::with_transport(mock);
        let err = client.export_accounting(30).await.unwrap_err();
        assert_eq!(err.user_message(), "Export failed");
    }

    #[test]
    fn test_keys_and_file_names() {
        assert_eq!(revenue_key(7), "dashboard/revenue?days=7");
        assert!(export_file_name("accounting", Some(30)).starts_with("accounting-30d-"));
        assert!(export_file_name("orders", None).ends_with(".csv"));
    }
}
