//! Thin wrappers over the browser APIs the views need. Outside WASM they are
//! no-ops (or answer "yes" for confirmations) so native builds still link.

/// Full page navigation, dropping all in-memory state.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("redirect to {path} ignored outside the browser");
    }
}

pub fn reload() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

/// Native `confirm()` dialog.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        true
    }
}

/// Hand downloaded bytes to the browser as a file save.
pub fn save_file(file_name: &str, content_type: Option<&str>, bytes: &[u8]) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = save_blob(file_name, content_type, bytes) {
            tracing::error!("Failed to save {file_name}: {e:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(
            "save of {file_name} ({} bytes, {content_type:?}) ignored outside the browser",
            bytes.len()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn save_blob(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    if let Some(ct) = content_type {
        options.set_type(ct);
    }
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
