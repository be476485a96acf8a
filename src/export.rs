use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Window,
};

use crate::download::{text_data_url, trigger_download};
use crate::error::ExportError;
use crate::serializer::{serialize_svg, XML_DECLARATION};
use crate::style_inliner::styled_svg_clone;

/// Id of the drawing element the host page renders.
pub const SVG_ELEMENT_ID: &str = "main-svg";

pub const SVG_FILENAME: &str = "drawing.svg";
pub const PNG_FILENAME: &str = "drawing.png";
pub const JSON_FILENAME: &str = "drawing.json";

/// Downloads the on-screen drawing as standalone svg markup.
pub fn export_svg_document(window: &Window, document: &Document) -> Result<(), ExportError> {
    let source = svg_export_source(window, document)?;

    let url = text_data_url("image/svg+xml", &source);
    trigger_download(document, &url, SVG_FILENAME)
}

/// Produces the complete svg text for the drawing: styled clone, serialized,
/// with the xml declaration prepended.
pub fn svg_export_source(window: &Window, document: &Document) -> Result<String, ExportError> {
    let styled = styled_svg_clone(window, document, SVG_ELEMENT_ID)?;
    let source = serialize_svg(&styled)?;

    Ok(format!("{XML_DECLARATION}{source}"))
}

/// Rasterizes the drawing and downloads it as a png.
///
/// The svg text is loaded into an offscreen image, drawn onto a canvas sized
/// to the original element's layout box at device resolution, and encoded as
/// a png data url. Suspends once, on the image decode.
pub async fn export_png_document(window: &Window, document: &Document) -> Result<(), ExportError> {
    let svg = document
        .get_element_by_id(SVG_ELEMENT_ID)
        .ok_or_else(|| ExportError::ElementNotFound(SVG_ELEMENT_ID.to_string()))?;

    let styled = styled_svg_clone(window, document, SVG_ELEMENT_ID)?;
    let source = serialize_svg(&styled)?;

    let image = HtmlImageElement::new()?;
    let decode = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(&text_data_url("image/svg+xml", &source));
    JsFuture::from(decode)
        .await
        .map_err(|_| ExportError::DecodeFailed)?;

    // Size the raster surface from the on-screen layout box, not the clone.
    let rect = svg.get_bounding_client_rect();
    let dpr = window.device_pixel_ratio();
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    let (surface_width, surface_height) = raster_dimensions(rect.width(), rect.height(), dpr);

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ExportError::Dom("failed to create canvas element".to_string()))?;
    canvas.set_width(surface_width);
    canvas.set_height(surface_height);

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| ExportError::Dom("failed to get 2d context".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ExportError::Dom("failed to cast 2d context".to_string()))?;
    context.scale(dpr, dpr)?;

    // The svg may have transparency; the png gets an opaque white background.
    context.set_fill_style(&JsValue::from_str("white"));
    context.fill_rect(0.0, 0.0, rect.width(), rect.height());
    context.draw_image_with_html_image_element_and_dw_and_dh(
        &image,
        0.0,
        0.0,
        rect.width(),
        rect.height(),
    )?;

    let url = canvas.to_data_url_with_type("image/png")?;
    trigger_download(document, &url, PNG_FILENAME)
}

/// Raster surface size for a css-pixel layout box at the given device pixel
/// ratio. Fractional sizes truncate the way a canvas width assignment does.
pub fn raster_dimensions(width: f64, height: f64, dpr: f64) -> (u32, u32) {
    ((width * dpr) as u32, (height * dpr) as u32)
}

/// Downloads drawing data as pretty-printed json.
///
/// `data` is either a json string or a structured value from the host page.
/// A string that does not parse as json passes through unmodified.
pub fn export_json_document(document: &Document, data: &JsValue) -> Result<(), ExportError> {
    if data.is_null() || data.is_undefined() {
        return Err(ExportError::NoData);
    }

    let text = match data.as_string() {
        Some(raw) => pretty_print_json(&raw),
        None => {
            let value: serde_json::Value = serde_wasm_bindgen::from_value(data.clone())
                .map_err(|err| ExportError::Payload(err.to_string()))?;
            serde_json::to_string_pretty(&value)
                .map_err(|err| ExportError::Payload(err.to_string()))?
        }
    };

    let url = text_data_url("application/json", &text);
    trigger_download(document, &url, JSON_FILENAME)
}

/// Re-emits valid json with stable two-space indentation; anything else is
/// returned untouched.
pub fn pretty_print_json(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_dimensions_scale_by_dpr() {
        assert_eq!(raster_dimensions(200.0, 100.0, 2.0), (400, 200));
        assert_eq!(raster_dimensions(640.0, 480.0, 1.0), (640, 480));
    }

    #[test]
    fn test_raster_dimensions_truncate() {
        assert_eq!(raster_dimensions(100.5, 50.25, 1.5), (150, 75));
    }

    #[test]
    fn test_pretty_print_round_trip() {
        let input = r#"{"a":1,"b":[true,null]}"#;
        let out = pretty_print_json(input);

        let reparsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let original: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_pretty_print_uses_two_space_indent() {
        let out = pretty_print_json(r#"{"a":1}"#);
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_malformed_json_passes_through() {
        let input = "{not json";
        assert_eq!(pretty_print_json(input), input);
    }
}
