use crate::error::WebError;

use web_sys::{Document, Element, Window};

/// Returns the global window.
pub fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::DomUnavailable)
}

/// Returns the document owned by `window`.
pub fn document(window: &Window) -> Result<Document, WebError> {
    window.document().ok_or(WebError::DomUnavailable)
}

/// Locates the element demos are mounted into.
///
/// With an id, the element must already exist in the page; without one, the
/// document body is used.
pub fn mount_target(document: &Document, root_id: Option<&str>) -> Result<Element, WebError> {
    if let Some(id) = root_id {
        document
            .get_element_by_id(id)
            .ok_or_else(|| WebError::RootNotFound(id.to_string()))
    } else {
        document
            .body()
            .map(Element::from)
            .ok_or(WebError::DomUnavailable)
    }
}

/// Removes every child of `element`.
pub fn clear(element: &Element) -> Result<(), WebError> {
    while let Some(child) = element.first_child() {
        element.remove_child(&child)?;
    }
    Ok(())
}

/// Returns `true` while the document is still being parsed.
pub fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

/// Absolute URL of `path` relative to the page, so dynamic imports do not resolve
/// against the location of the generated bindings.
pub fn resolve_url(window: &Window, path: &str) -> Result<String, WebError> {
    let base = window.location().href()?;
    Ok(web_sys::Url::new_with_base(path, &base)?.href())
}
