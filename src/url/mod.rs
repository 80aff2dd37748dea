//! URL handling module for Profile-Lens
//!
//! Profile URLs are validated here, before anything touches the network. A URL
//! that passes [`ProfileUrl::parse`] never produces an invalid-input error later
//! in the pipeline.

mod domain;

use crate::{UrlError, UrlResult};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

pub use domain::{host_key, robots_url};

/// The only host that serves profile pages
pub const PROFILE_HOST: &str = "www.linkedin.com";

fn profile_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/in/([A-Za-z0-9-]+)/?$").expect("profile path pattern is a valid regex")
    })
}

/// A validated public profile URL
///
/// Accepted form: `https://www.linkedin.com/in/<slug>` with an optional trailing
/// slash, where the slug is one or more of `[A-Za-z0-9-]`. No credentials, port,
/// query or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileUrl {
    url: Url,
    slug: String,
}

impl ProfileUrl {
    /// Validates a raw profile URL
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_lens::url::ProfileUrl;
    ///
    /// let url = ProfileUrl::parse("https://www.linkedin.com/in/jane-doe/").unwrap();
    /// assert_eq!(url.profile_id(), "jane-doe");
    ///
    /// assert!(ProfileUrl::parse("https://linkedin.com/in/jane-doe").is_err());
    /// ```
    pub fn parse(raw: &str) -> UrlResult<Self> {
        let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url.host_str().unwrap_or_default();
        if host != PROFILE_HOST || url.port().is_some() {
            return Err(UrlError::InvalidHost(host.to_string()));
        }

        if !url.username().is_empty()
            || url.password().is_some()
            || url.query().is_some()
            || url.fragment().is_some()
        {
            return Err(UrlError::NotAProfile(raw.to_string()));
        }

        let slug = profile_path_pattern()
            .captures(url.path())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase())
            .ok_or_else(|| UrlError::NotAProfile(raw.to_string()))?;

        Ok(Self { url, slug })
    }

    /// The profile identity used as the persistence key
    pub fn profile_id(&self) -> &str {
        &self.slug
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ProfileUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile_urls() {
        for raw in [
            "https://www.linkedin.com/in/johndoe/",
            "https://www.linkedin.com/in/jane-smith",
            "https://www.linkedin.com/in/user123/",
            "https://www.linkedin.com/in/A-1",
        ] {
            assert!(ProfileUrl::parse(raw).is_ok(), "should be valid: {}", raw);
        }
    }

    #[test]
    fn test_profile_id_is_lowercase_slug() {
        let url = ProfileUrl::parse("https://www.linkedin.com/in/Jane-Doe-42/").unwrap();
        assert_eq!(url.profile_id(), "jane-doe-42");
    }

    #[test]
    fn test_reject_wrong_host() {
        assert!(matches!(
            ProfileUrl::parse("https://linkedin.com/in/johndoe/"),
            Err(UrlError::InvalidHost(_))
        ));
        assert!(matches!(
            ProfileUrl::parse("https://facebook.com/johndoe"),
            Err(UrlError::InvalidHost(_))
        ));
    }

    #[test]
    fn test_reject_http_scheme() {
        assert!(matches!(
            ProfileUrl::parse("http://www.linkedin.com/in/johndoe"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_reject_non_profile_path() {
        for raw in [
            "https://www.linkedin.com/johndoe/",
            "https://www.linkedin.com/in/",
            "https://www.linkedin.com/in/john_doe",
            "https://www.linkedin.com/in/john/details",
            "https://www.linkedin.com/in/john?trk=feed",
            "https://www.linkedin.com/in/john#about",
        ] {
            assert!(
                matches!(ProfileUrl::parse(raw), Err(UrlError::NotAProfile(_))),
                "should be rejected: {}",
                raw
            );
        }
    }

    #[test]
    fn test_reject_unparseable() {
        assert!(matches!(
            ProfileUrl::parse("not-a-url"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_reject_port_and_credentials() {
        assert!(ProfileUrl::parse("https://www.linkedin.com:8443/in/john").is_err());
        assert!(ProfileUrl::parse("https://user@www.linkedin.com/in/john").is_err());
    }
}
