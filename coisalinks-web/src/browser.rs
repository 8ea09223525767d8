//! Blocking dialogs and the clipboard.

/// Show a blocking `window.alert`.
pub fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        log::warn!("no window to show alert: {message}");
        return;
    };
    if let Err(err) = window.alert_with_message(message) {
        log::warn!("alert failed: {err:?}");
    }
}

/// Write `text` to the system clipboard. The returned promise is not awaited.
pub fn copy_to_clipboard(text: &str) {
    match web_sys::window() {
        Some(window) => {
            let _pending = window.navigator().clipboard().write_text(text);
        }
        None => log::warn!("no window to copy to"),
    }
}
