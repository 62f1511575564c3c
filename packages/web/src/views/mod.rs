mod auth;
pub use auth::{Login, Register};

mod shell;
pub use shell::Shell;

mod pages;
pub use pages::{
    Dashboard, Orders, Properties, PropertyEdit, PropertyNew, Settings, UpsellEdit, UpsellNew,
    Upsells, VendorEdit, VendorNew, Vendors,
};
