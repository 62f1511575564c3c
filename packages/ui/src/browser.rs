//! Browser side effects: file downloads, clipboard, external redirects.

use dioxus::prelude::*;

/// Hand `contents` to the browser as a file download.
pub fn download_text(file_name: &str, mime: &str, contents: &str) {
    let script = format!(
        r#"
        const blob = new Blob([{contents}], {{ type: {mime} }});
        const url = URL.createObjectURL(blob);
        const a = document.createElement("a");
        a.href = url;
        a.download = {file_name};
        document.body.appendChild(a);
        a.click();
        a.remove();
        URL.revokeObjectURL(url);
        "#,
        contents = js_string(contents),
        mime = js_string(mime),
        file_name = js_string(file_name),
    );
    let _ = document::eval(&script);
    tracing::info!("download started: {file_name}");
}

pub fn download_csv(file_name: &str, csv: &str) {
    download_text(file_name, "text/csv;charset=utf-8", csv);
}

pub fn copy_to_clipboard(text: &str) {
    let _ = document::eval(&format!("navigator.clipboard.writeText({});", js_string(text)));
}

/// Leave the app for an external URL (Stripe onboarding).
pub fn open_external(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("failed to open {url}: {e:?}");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("cannot open {url} outside the browser");
    }
}

/// A JSON string literal is a valid JS string literal.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
