use web_sys::{Element, XmlSerializer};

use crate::error::ExportError;

pub const SVG_NAMESPACE: &str = r#"xmlns="http://www.w3.org/2000/svg""#;
pub const XLINK_NAMESPACE: &str = r#"xmlns:xlink="http://www.w3.org/1999/xlink""#;

/// Declaration prepended to standalone svg output.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" standalone=\"no\"?>\r\n";

/// Serializes a subtree to markup with both required namespace declarations
/// present on the root tag.
pub fn serialize_svg(node: &Element) -> Result<String, ExportError> {
    let serializer = XmlSerializer::new()?;
    let source = serializer.serialize_to_string(node)?;

    Ok(ensure_namespaces(&source))
}

/// Inserts the svg and xlink namespace declarations on the root `<svg>` tag
/// when the serializer output omitted them. Running this twice yields the
/// same string; markup that does not start with `<svg` is returned untouched.
pub fn ensure_namespaces(source: &str) -> String {
    let mut source = source.to_string();

    if !root_tag_contains(&source, SVG_NAMESPACE) {
        source = source.replacen("<svg", &format!("<svg {SVG_NAMESPACE}"), 1);
    }
    if !root_tag_contains(&source, XLINK_NAMESPACE) {
        source = source.replacen("<svg", &format!("<svg {XLINK_NAMESPACE}"), 1);
    }

    source
}

/// True when the declaration already appears inside the root opening tag.
/// Also true for markup without a leading `<svg`, which is left as is.
fn root_tag_contains(source: &str, declaration: &str) -> bool {
    if !source.starts_with("<svg") {
        return true;
    }

    match source.find('>') {
        Some(end) => source[..end].contains(declaration),
        None => true,
    }
}
