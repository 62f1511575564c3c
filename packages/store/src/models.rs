//! # Domain models mirrored from the marketplace backend
//!
//! Plain records deserialised from the REST API. The client owns no invariants
//! beyond matching the server's JSON shape, so every optional column is an
//! `Option` and every collection field tolerates being absent.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Property`] | A villa owned by a user. Carries locale/currency, the guest-facing `access_token`, the payout processor selection and its account details, and a payout schedule. |
//! | [`Vendor`] | An independent service provider with a `service_type` tag and contact channels. |
//! | [`Upsell`] | A purchasable add-on tied to one property and fulfilled by a primary (and optional secondary) vendor. `availability_rules` is opaque JSON. |
//! | [`Order`] | A guest purchase of an upsell. Embeds short summaries of the property, upsell and vendor so list views never need a join. |
//! | [`RevenuePoint`], [`UpsellPerformance`], [`DashboardStats`] | Precomputed analytics aggregates. |
//!
//! [`OrderStatus`] carries the domain ordering used when sorting by status
//! (`pending < confirmed < fulfilled < cancelled`) and the advisory transition
//! table used to decide which actions a row offers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The derived `Ord` follows declaration order, which is the fixed domain rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Fulfilled,
        OrderStatus::Cancelled,
    ];

    /// Position in the status sort order.
    pub fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Fulfilled => 2,
            OrderStatus::Cancelled => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Fulfilled => "fulfilled",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Fulfilled => "Fulfilled",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Statuses an order in this state may be moved to.
    ///
    /// Advisory only: the UI uses it to decide which buttons to show.
    pub fn next_actions(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Fulfilled, OrderStatus::Cancelled],
            OrderStatus::Fulfilled | OrderStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next_actions().is_empty()
    }

    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self.next_actions().contains(&target)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "fulfilled" => Ok(OrderStatus::Fulfilled),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Which processor pays out a property's revenue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProcessor {
    #[default]
    Stripe,
    Wise,
}

impl PaymentProcessor {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentProcessor::Stripe => "stripe",
            PaymentProcessor::Wise => "wise",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutSchedule {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl PayoutSchedule {
    pub const ALL: [PayoutSchedule; 3] = [
        PayoutSchedule::Daily,
        PayoutSchedule::Weekly,
        PayoutSchedule::Monthly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PayoutSchedule::Daily => "daily",
            PayoutSchedule::Weekly => "weekly",
            PayoutSchedule::Monthly => "monthly",
        }
    }
}

/// A villa listed on the marketplace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Opaque token identifying this property to the guest check-in app.
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub payment_processor: PaymentProcessor,
    #[serde(default)]
    pub stripe_account_id: Option<String>,
    #[serde(default)]
    pub wise_account_holder: Option<String>,
    #[serde(default)]
    pub wise_iban: Option<String>,
    #[serde(default)]
    pub wise_email: Option<String>,
    #[serde(default)]
    pub payout_schedule: PayoutSchedule,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Property {
    /// Link handed to guests: `{guest_app_url}/{access_token}`.
    pub fn guest_link(&self, guest_app_url: &str) -> String {
        format!("{}/{}", guest_app_url.trim_end_matches('/'), self.access_token)
    }

    /// "City, Country" or whichever half is known.
    pub fn location(&self) -> String {
        [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A third-party service provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    /// Free-form tag such as "chef", "transport" or "spa".
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Short property summary embedded in upsells and orders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VendorRef {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpsellRef {
    pub id: i64,
    pub title: String,
}

/// A purchasable add-on service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Upsell {
    pub id: i64,
    pub property_id: i64,
    pub vendor_id: i64,
    #[serde(default)]
    pub secondary_vendor_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Availability rules are owned by the backend and passed through untouched.
    #[serde(default)]
    pub availability_rules: serde_json::Value,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub property: Option<PropertyRef>,
    #[serde(default)]
    pub vendor: Option<VendorRef>,
}

/// A guest purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub property_id: i64,
    pub upsell_id: i64,
    #[serde(default)]
    pub vendor_id: Option<i64>,
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: Option<String>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub property: Option<PropertyRef>,
    #[serde(default)]
    pub upsell: Option<UpsellRef>,
    #[serde(default)]
    pub vendor: Option<VendorRef>,
}

impl Order {
    pub fn property_name(&self) -> &str {
        self.property.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    pub fn upsell_title(&self) -> &str {
        self.upsell.as_ref().map(|u| u.title.as_str()).unwrap_or("")
    }

    pub fn vendor_name(&self) -> &str {
        self.vendor.as_ref().map(|v| v.name.as_str()).unwrap_or("")
    }
}

/// One day of revenue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    #[serde(alias = "total")]
    pub revenue: f64,
    #[serde(default)]
    pub orders: u32,
}

/// Per-upsell ranking row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpsellPerformance {
    pub upsell_id: i64,
    pub title: String,
    #[serde(default)]
    pub orders: u32,
    #[serde(default)]
    pub revenue: f64,
}

/// Summary counters shown above the analytics charts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub pending_orders: u32,
    #[serde(default)]
    pub active_upsells: u32,
    #[serde(default)]
    pub properties: u32,
    #[serde(default)]
    pub vendors: u32,
}

/// Render an amount with the currency symbol when one is known.
pub fn format_money(amount: f64, currency: &str) -> String {
    match currency.to_ascii_uppercase().as_str() {
        "EUR" => format!("€{amount:.2}"),
        "USD" => format!("${amount:.2}"),
        "GBP" => format!("£{amount:.2}"),
        "" => format!("{amount:.2}"),
        other => format!("{amount:.2} {other}"),
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_rank_follows_domain_order() {
        let mut statuses = vec![
            OrderStatus::Cancelled,
            OrderStatus::Pending,
            OrderStatus::Fulfilled,
            OrderStatus::Confirmed,
        ];
        statuses.sort();
        assert_eq!(statuses, OrderStatus::ALL.to_vec());
    }

    #[test]
    fn test_status_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Fulfilled));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Fulfilled));
        assert!(OrderStatus::Fulfilled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_order_deserializes_with_embedded_summaries() {
        let json = r#"{
            "id": 7,
            "property_id": 1,
            "upsell_id": 3,
            "vendor_id": 2,
            "guest_name": "Ana Silva",
            "guest_email": "ana@example.com",
            "amount": 120.5,
            "currency": "EUR",
            "status": "confirmed",
            "created_at": "2024-05-01T10:00:00Z",
            "property": {"id": 1, "name": "Villa Azul"},
            "upsell": {"id": 3, "title": "Private Chef"},
            "vendor": {"id": 2, "name": "Chef Rui"}
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.property_name(), "Villa Azul");
        assert_eq!(order.upsell_title(), "Private Chef");
        assert_eq!(order.vendor_name(), "Chef Rui");
    }

    #[test]
    fn test_property_defaults_and_guest_link() {
        let json = r#"{"id": 4, "name": "Casa Mar", "access_token": "abc123"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.locale, "en");
        assert_eq!(property.currency, "EUR");
        assert_eq!(property.payment_processor, PaymentProcessor::Stripe);
        assert!(property.is_active);
        assert_eq!(
            property.guest_link("https://guest.example.com/"),
            "https://guest.example.com/abc123"
        );
    }

    #[test]
    fn test_revenue_point_accepts_total_alias() {
        let point: RevenuePoint =
            serde_json::from_str(r#"{"date": "2024-05-01", "total": 42.0}"#).unwrap();
        assert_eq!(point.revenue, 42.0);
        assert_eq!(point.orders, 0);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(12.5, "EUR"), "€12.50");
        assert_eq!(format_money(3.0, "usd"), "$3.00");
        assert_eq!(format_money(1.0, "IDR"), "1.00 IDR");
    }
}
