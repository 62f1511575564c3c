use dioxus::prelude::*;
use dioxus_primitives::alert_dialog::{
    AlertDialogActions, AlertDialogContent, AlertDialogDescription, AlertDialogRoot,
    AlertDialogTitle,
};

use super::button::{Button, ButtonVariant};

/// Explicit confirm step for destructive actions. Rendered only while a
/// confirmation is pending; dismissing the dialog cancels.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        AlertDialogRoot {
            class: "modal-backdrop",
            open: true,
            on_open_change: move |open: bool| {
                if !open {
                    on_cancel.call(());
                }
            },
            AlertDialogContent {
                class: "modal-card modal-body",
                AlertDialogTitle { class: "modal-title", "{title}" }
                AlertDialogDescription { "{message}" }
                AlertDialogActions {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
