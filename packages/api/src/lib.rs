//! # API crate: the dashboard's REST client
//!
//! Everything the dashboard knows about the marketplace backend lives here.
//! Views never build URLs or parse responses themselves: they call typed
//! methods on [`ApiClient`] and get back store models or an [`ApiError`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | The [`Transport`] seam and its `reqwest` implementation |
//! | [`client`] | [`ApiClient`]: base URL, bearer token, JSON decoding, status-to-error mapping |
//! | [`error`] | [`ApiError`] and server validation-message extraction |
//! | [`auth`] | Login, registration, profile and password requests |
//! | [`session`] | [`Session`]: token persistence and the current user |
//! | [`resource`] | Generic CRUD for properties, vendors and upsells |
//! | [`forms`] | Editable form state, validation, submit-with-upload |
//! | [`orders`] | Filtered order listing, single and bulk status transitions |
//! | [`dashboard`] | Analytics aggregates and CSV exports |
//! | [`upload`] | Image upload |
//! | [`payments`] | Stripe Connect onboarding |
//! | [`models`] | The account model ([`User`]) |
//!
//! Entity models themselves (`Property`, `Order`, ...) come from the `store`
//! crate and are re-exported here for convenience.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod models;
pub mod orders;
pub mod payments;
pub mod resource;
pub mod session;
pub mod transport;
pub mod upload;

#[cfg(test)]
mod mock;

pub use auth::{AuthResponse, Credentials, PasswordChange, ProfileUpdate, Registration};
pub use client::ApiClient;
pub use error::{ApiError, FieldErrors, Result};
pub use forms::{EntityForm, PropertyForm, UpsellForm, VendorForm};
pub use models::{Role, User};
pub use payments::StripeStatus;
pub use resource::{invalidate_after_write, Resource};
pub use session::Session;
pub use transport::{HttpTransport, Transport};
pub use upload::ImageUpload;

pub use store::{
    DashboardStats, Order, OrderFilters, OrderStatus, Property, RevenuePoint, Upsell,
    UpsellPerformance, Vendor,
};
