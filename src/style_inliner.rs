use wasm_bindgen::JsCast;
use web_sys::{Document, Element, SvgElement, Window};

use crate::error::ExportError;

/// Presentation properties whose resolved values are baked into the exported
/// copy so it renders the same outside the page's stylesheets.
pub const STYLES_TO_COPY: [&str; 14] = [
    "fill", "stroke", "stroke-width", "stroke-linecap", "stroke-linejoin", "stroke-dasharray",
    "font-family", "font-size", "font-weight", "font-style", "text-anchor", "dominant-baseline",
    "opacity", "visibility",
];

/// Deep-clones the element with id `svg_id` and writes the browser-resolved
/// style of every node into the clone as inline declarations.
///
/// The clone is detached, so styling it never touches the on-screen drawing.
/// The computed style is always read from the original element; the clone has
/// no layout context of its own.
pub fn styled_svg_clone(
    window: &Window,
    document: &Document,
    svg_id: &str,
) -> Result<Element, ExportError> {
    let svg = document
        .get_element_by_id(svg_id)
        .ok_or_else(|| ExportError::ElementNotFound(svg_id.to_string()))?;

    let cloned = svg
        .clone_node_with_deep(true)?
        .dyn_into::<Element>()
        .map_err(|_| ExportError::Dom("cloned node is not an element".to_string()))?;

    // Root first, then every descendant pair. The clone mirrors the source
    // structure node for node, so walking both sibling chains in tandem keeps
    // the pairing exact.
    copy_computed_style(window, &svg, &cloned)?;
    inline_subtree(window, &svg, &cloned)?;

    Ok(cloned)
}

fn inline_subtree(window: &Window, original: &Element, cloned: &Element) -> Result<(), ExportError> {
    let mut pair = (original.first_element_child(), cloned.first_element_child());

    while let (Some(src), Some(dst)) = pair {
        copy_computed_style(window, &src, &dst)?;
        inline_subtree(window, &src, &dst)?;

        pair = (src.next_element_sibling(), dst.next_element_sibling());
    }

    Ok(())
}

/// Copies each property in [`STYLES_TO_COPY`] from the original's computed
/// style into the clone's inline style. Empty resolved values are left unset
/// so the clone keeps its default rendering for them.
fn copy_computed_style(
    window: &Window,
    original: &Element,
    cloned: &Element,
) -> Result<(), ExportError> {
    let computed = match window.get_computed_style(original)? {
        Some(computed) => computed,
        None => return Ok(()),
    };

    let style = match cloned.dyn_ref::<SvgElement>() {
        Some(element) => element.style(),
        None => return Ok(()),
    };

    for prop in STYLES_TO_COPY {
        let value = computed.get_property_value(prop).unwrap_or_default();
        if !value.is_empty() {
            style.set_property(prop, &value)?;
        }
    }

    Ok(())
}
