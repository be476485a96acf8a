use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{window, Document, Window};

pub mod download;
pub mod error;
pub mod export;
pub mod serializer;
pub mod style_inliner;

use crate::error::ExportError;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).unwrap();

    Ok(())
}

fn page() -> Result<(Window, Document), ExportError> {
    let window = window().ok_or_else(|| ExportError::Dom("no global window exists".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Dom("no document on window".to_string()))?;

    Ok((window, document))
}

/// Downloads the on-screen drawing as a standalone `drawing.svg`.
#[wasm_bindgen]
pub fn export_svg() {
    let result =
        page().and_then(|(window, document)| export::export_svg_document(&window, &document));
    if let Err(err) = result {
        error!("svg export failed: {err}");
    }
}

/// Rasterizes the on-screen drawing and downloads it as `drawing.png`.
#[wasm_bindgen]
pub fn export_png() {
    wasm_bindgen_futures::spawn_local(async {
        let result = match page() {
            Ok((window, document)) => export::export_png_document(&window, &document).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            error!("png export failed: {err}");
        }
    });
}

/// Downloads drawing data as pretty-printed `drawing.json`. Accepts either a
/// json string or a structured value straight from the host page.
#[wasm_bindgen]
pub fn export_json(data: JsValue) {
    let result = page().and_then(|(_, document)| export::export_json_document(&document, &data));
    if let Err(err) = result {
        error!("json export failed: {err}");
    }
}
