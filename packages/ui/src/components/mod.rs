//! Shared widgets. Labels, dialogs and toasts sit on `dioxus-primitives`;
//! the rest are thin styled wrappers over native elements.

mod badge;
mod button;
mod dialog;
mod input;
mod label;
mod toast;

pub use badge::{ActiveBadge, Empty, Loading, StatCard, StatusBadge};
pub use button::{Button, ButtonVariant};
pub use dialog::ConfirmDialog;
pub use input::{Checkbox, SearchBox, Select, TextArea, TextInput};
pub use label::{FormField, Label};
pub use toast::{toast_options, use_toast, ToastOptions, ToastProvider};
