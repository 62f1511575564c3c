use std::time::Duration;

pub use dioxus_primitives::toast::{use_toast, ToastOptions, ToastProvider};

/// How long a toast stays up; `0` keeps it until dismissed.
pub fn dismiss_after(secs: u32) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs as u64))
}

pub fn toast_options(secs: u32) -> ToastOptions {
    match dismiss_after(secs) {
        Some(duration) => ToastOptions::new().duration(duration),
        None => ToastOptions::new().permanent(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seconds_keeps_toast() {
        assert_eq!(dismiss_after(0), None);
        assert_eq!(dismiss_after(4), Some(Duration::from_secs(4)));
    }
}
