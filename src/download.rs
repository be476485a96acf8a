use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement};

use crate::error::ExportError;

/// Percent-encodes text content into a `data:` url.
pub fn text_data_url(mime: &str, content: &str) -> String {
    let encoded = js_sys::encode_uri_component(content);
    format!("data:{mime};charset=utf-8,{encoded}")
}

/// Starts a browser download by routing the url through a transient anchor.
/// The anchor is attached, clicked and detached within this call.
pub fn trigger_download(document: &Document, url: &str, filename: &str) -> Result<(), ExportError> {
    let body = document
        .body()
        .ok_or_else(|| ExportError::Dom("document has no body".to_string()))?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ExportError::Dom("failed to create anchor element".to_string()))?;
    anchor.set_href(url);
    anchor.set_download(filename);

    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    Ok(())
}
