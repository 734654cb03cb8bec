//! The environment a dispatcher runs in.

use url::Url;

use crate::error::HostError;

/// Source of the demo selection and of the default mount target.
pub trait Host {
    /// Element type demos are mounted into.
    type Node;

    /// Reads a single query parameter of the current page, percent-decoded.
    fn query_param(&self, name: &str) -> Option<String>;

    /// The node demos are mounted into when no other node is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the node is not available.
    fn default_target(&self) -> Result<Self::Node, HostError>;
}

/// Host backed by a parsed page URL and a fixed default node.
///
/// Useful outside the browser, where there is no `window.location`.
#[derive(Debug, Clone)]
pub struct UrlHost<N> {
    url: Url,
    target: Option<N>,
}

impl<N> UrlHost<N> {
    /// Parses `url` and uses `target` as the default mount node.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `url` is not an absolute URL.
    pub fn new(url: &str, target: N) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            target: Some(target),
        })
    }

    /// Parses `url` without a default mount node; only explicit targets can be used.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `url` is not an absolute URL.
    pub fn without_target(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            target: None,
        })
    }
}

impl<N: Clone> Host for UrlHost<N> {
    type Node = N;

    fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn default_target(&self) -> Result<N, HostError> {
        self.target
            .clone()
            .ok_or_else(|| HostError::TargetNotFound("default".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_first_matching_parameter() {
        let host = UrlHost::new("https://example.test/?x=1&demo=Binary&demo=Empty", "body")
            .expect("valid url");
        assert_eq!(host.query_param("demo").as_deref(), Some("Binary"));
        assert_eq!(host.query_param("x").as_deref(), Some("1"));
        assert_eq!(host.query_param("y"), None);
    }

    #[test]
    fn values_are_percent_decoded() {
        let host = UrlHost::new("https://example.test/index.html?demo=Bin%61ry", ()).expect("valid url");
        assert_eq!(host.query_param("demo").as_deref(), Some("Binary"));
    }

    #[test]
    fn missing_default_target_is_an_error() {
        let host: UrlHost<()> = UrlHost::without_target("https://example.test/").expect("valid url");
        assert_eq!(
            host.default_target(),
            Err(HostError::TargetNotFound("default".to_owned()))
        );
    }

    #[test]
    fn relative_urls_are_rejected() {
        assert!(UrlHost::new("/index.html?demo=Binary", ()).is_err());
    }
}
