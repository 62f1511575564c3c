//! Client-side data for the villa admin dashboard: entity models, the query
//! cache, persisted token storage, configuration, and the pure derived views
//! (order table, list search, revenue chart) the UI renders.

pub mod analytics;
pub mod cache;
pub mod config;
pub mod models;
pub mod orders;
pub mod search;
pub mod token;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageTokenStore;

pub use cache::QueryCache;
pub use config::DashboardConfig;
pub use models::{
    format_money, DashboardStats, Order, OrderStatus, PaymentProcessor, PayoutSchedule, Property,
    PropertyRef, RevenuePoint, Upsell, UpsellPerformance, UpsellRef, Vendor, VendorRef,
};
pub use orders::{DateBucket, OrderFilters, OrderStats, OrderTable, SortDirection, SortKey};
pub use search::Searchable;
pub use token::{MemoryTokenStore, TokenStore};
