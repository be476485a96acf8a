use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures raised while exporting the drawing. None of these cross the
/// exported entry points; they are logged and the export call becomes a no-op.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("element `{0}` not found in document")]
    ElementNotFound(String),

    #[error("nothing to export")]
    NoData,

    #[error("svg image failed to decode")]
    DecodeFailed,

    #[error("export payload is not representable as json: {0}")]
    Payload(String),

    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for ExportError {
    fn from(value: JsValue) -> Self {
        ExportError::Dom(format!("{value:?}"))
    }
}
