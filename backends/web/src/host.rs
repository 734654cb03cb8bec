use demohost::{Host, HostError};
use web_sys::{Element, UrlSearchParams, Window};

use crate::{dom, error::WebError};

/// The current page: `window.location.search` and the configured mount element.
#[derive(Debug, Clone)]
pub struct BrowserHost {
    window: Window,
    root_id: Option<String>,
}

impl BrowserHost {
    /// Binds to the global window. Demos mount into `root_id`, or the body when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::DomUnavailable`] outside of a browser.
    pub fn new(root_id: Option<String>) -> Result<Self, WebError> {
        Ok(Self {
            window: dom::window()?,
            root_id,
        })
    }

    /// Removes everything from the default mount target.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be found or a child cannot be removed.
    pub fn clear(&self) -> Result<(), WebError> {
        let document = dom::document(&self.window)?;
        dom::clear(&dom::mount_target(&document, self.root_id.as_deref())?)
    }
}

impl Host for BrowserHost {
    type Node = Element;

    fn query_param(&self, name: &str) -> Option<String> {
        let search = self.window.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(name)
    }

    fn default_target(&self) -> Result<Element, HostError> {
        let document = dom::document(&self.window)?;
        Ok(dom::mount_target(&document, self.root_id.as_deref())?)
    }
}
