use url::Url;

/// Returns the per-host key used by the rate governor and the policy cache
///
/// The key is the lowercase host, followed by `:port` when the URL carries an
/// explicit non-default port, so two services on one machine are throttled
/// independently.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use profile_lens::url::host_key;
///
/// let url = Url::parse("https://WWW.Example.com/in/jane").unwrap();
/// assert_eq!(host_key(&url), Some("www.example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/robots.txt").unwrap();
/// assert_eq!(host_key(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Derives the robots.txt location for the host serving `url`
pub fn robots_url(url: &Url) -> Option<Url> {
    let mut robots = url.clone();
    robots.host_str()?;
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    Some(robots)
}
