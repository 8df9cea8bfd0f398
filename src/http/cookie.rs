// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie reading and the cookie jar backing the default transport
//!
//! The CSRF token lives in a cookie store shaped like a browser's
//! `document.cookie`: `name=value` pairs separated by `;`. The store is
//! injected through [`CookieSource`] so callers and tests can hand in any
//! string without a browser.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

const MAX_AGE_CAP_SECS: i64 = 400 * 24 * 60 * 60;

/// Read-only access to a cookie store string
pub trait CookieSource: Send + Sync {
    /// The raw `name=value; name2=value2` store, or `None` when there is none
    fn cookie_string(&self) -> Option<String>;
}

/// A fixed cookie store string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCookies(Option<String>);

impl StaticCookies {
    /// Wrap a cookie store string
    pub fn new(store: impl Into<String>) -> Self {
        Self(Some(store.into()))
    }

    /// A source with no cookie store at all
    pub fn none() -> Self {
        Self(None)
    }
}

impl CookieSource for StaticCookies {
    fn cookie_string(&self) -> Option<String> {
        self.0.clone()
    }
}

impl<T: CookieSource + ?Sized> CookieSource for Arc<T> {
    fn cookie_string(&self) -> Option<String> {
        (**self).cookie_string()
    }
}

/// Find `name` in a cookie store and return its URL-decoded value.
///
/// Segments are trimmed and compared against the literal prefix `name=`.
/// The leftmost match wins. An empty or absent store yields `None`.
pub fn read_cookie(store: Option<&str>, name: &str) -> Option<String> {
    let store = store.filter(|s| !s.is_empty())?;

    store.split(';').map(str::trim).find_map(|segment| {
        segment
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .map(decode_value)
    })
}

/// Read `name` from an injected cookie source
pub fn get_cookie(source: &dyn CookieSource, name: &str) -> Option<String> {
    read_cookie(source.cookie_string().as_deref(), name)
}

// Values that do not decode to UTF-8 are handed back as stored.
fn decode_value(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(value = raw, error = %e, "Cookie value is not percent-decodable");
            raw.to_string()
        }
    }
}

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value, as sent by the server
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag (hidden from the cookie store string)
    pub http_only: bool,
}

impl Cookie {
    /// Create a new session cookie valid for every path
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie should be sent to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        self.domain_matches(host)
            && self.path_matches(url.path())
            && (!self.secure || url.scheme() == "https")
            && !self.is_expired()
    }

    // RFC 6265 path-match: the prefix has to end on a '/' boundary
    fn path_matches(&self, request_path: &str) -> bool {
        match request_path.strip_prefix(self.path.as_str()) {
            Some(rest) => rest.is_empty() || self.path.ends_with('/') || rest.starts_with('/'),
            None => false,
        }
    }

    fn domain_matches(&self, host: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }

        let domain = self.domain.trim_start_matches('.');
        host == domain || host.ends_with(&format!(".{}", domain))
    }

    /// Parse a Set-Cookie header value received from `url`
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie::new(name, value.trim());
        cookie.domain = url.host_str().unwrap_or("").to_string();

        for part in parts.map(str::trim) {
            match part.split_once('=') {
                Some((attr, val)) => {
                    let val = val.trim();
                    match attr.trim().to_ascii_lowercase().as_str() {
                        "domain" => cookie.domain = val.trim_start_matches('.').to_string(),
                        "path" => cookie.path = val.to_string(),
                        "expires" => {
                            // Max-Age takes precedence when both are present
                            if let (None, Ok(dt)) =
                                (cookie.expires, DateTime::parse_from_rfc2822(val))
                            {
                                cookie.expires = Some(dt.with_timezone(&Utc));
                            }
                        }
                        "max-age" => {
                            if let Ok(secs) = val.parse::<i64>() {
                                // Zero or negative expires immediately; capped at 400 days
                                let secs = if secs <= 0 { -1 } else { secs.min(MAX_AGE_CAP_SECS) };
                                let ttl = chrono::Duration::seconds(secs);
                                cookie.expires = Some(Utc::now() + ttl);
                            }
                        }
                        _ => {}
                    }
                }
                None => match part.to_ascii_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                },
            }
        }

        Some(cookie)
    }

    /// Render as a `name=value` pair
    pub fn to_pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Shared cookie storage, kept in insertion order.
///
/// The transport writes `Set-Cookie` responses into it; as a
/// [`CookieSource`] it renders the cookies script code could see, so the
/// CSRF token set by the server is echoed on later requests.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Arc<RwLock<Vec<Cookie>>>,
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie, replacing one with the same name, domain and path.
    /// A replaced cookie keeps its position.
    pub fn add(&self, cookie: Cookie) {
        let mut cookies = self.cookies.write();
        let existing = cookies.iter_mut().find(|c| {
            c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path
        });
        match existing {
            Some(slot) => *slot = cookie,
            None => cookies.push(cookie),
        }
    }

    /// Add a cookie from a Set-Cookie header
    pub fn add_from_header(&self, header: &str, url: &Url) {
        match Cookie::parse(header, url) {
            Some(cookie) => {
                tracing::trace!(name = %cookie.name, domain = %cookie.domain, "Stored cookie");
                self.add(cookie);
            }
            None => tracing::debug!(header, "Ignoring malformed Set-Cookie header"),
        }
    }

    /// Add every `name=value` pair of a cookie store string as a cookie for
    /// the host of `url`
    pub fn seed(&self, store: &str, url: &Url) {
        let host = url.host_str().unwrap_or("");
        for segment in store.split(';').map(str::trim) {
            if let Some((name, value)) = segment.split_once('=') {
                if !name.is_empty() {
                    self.add(Cookie::new(name, value).domain(host));
                }
            }
        }
    }

    /// Get the live cookies that match a URL
    pub fn get_cookies(&self, url: &Url) -> Vec<Cookie> {
        self.remove_expired();
        self.cookies
            .read()
            .iter()
            .filter(|c| c.matches(url))
            .cloned()
            .collect()
    }

    /// Get the Cookie header value for a URL
    pub fn get_cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.get_cookies(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(Cookie::to_pair)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.cookies.write().clear();
    }

    fn remove_expired(&self) {
        self.cookies.write().retain(|c| !c.is_expired());
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.read().len()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieJar {
    /// Render the script-visible cookies that apply to `url`, the way a
    /// page at that URL sees `document.cookie`
    pub fn cookie_string_for(&self, url: &Url) -> Option<String> {
        self.render(|c| c.matches(url))
    }

    /// A cookie source that only sees cookies for `url`
    pub fn scoped(&self, url: Url) -> ScopedCookieJar {
        ScopedCookieJar {
            jar: self.clone(),
            url,
        }
    }

    fn render(&self, keep: impl Fn(&Cookie) -> bool) -> Option<String> {
        self.remove_expired();
        let visible: Vec<String> = self
            .cookies
            .read()
            .iter()
            .filter(|c| !c.http_only && keep(c))
            .map(Cookie::to_pair)
            .collect();

        if visible.is_empty() {
            None
        } else {
            Some(visible.join("; "))
        }
    }
}

/// Renders every script-visible cookie in the jar, whatever its domain
impl CookieSource for CookieJar {
    fn cookie_string(&self) -> Option<String> {
        self.render(|_| true)
    }
}

/// A [`CookieJar`] view limited to the cookies of one URL
#[derive(Debug, Clone)]
pub struct ScopedCookieJar {
    jar: CookieJar,
    url: Url,
}

impl ScopedCookieJar {
    /// The URL cookies are scoped to
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl CookieSource for ScopedCookieJar {
    fn cookie_string(&self) -> Option<String> {
        self.jar.cookie_string_for(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_among_others() {
        let store = "sessionid=xyz;  csrftoken=abc123 ;theme=dark";
        assert_eq!(read_cookie(Some(store), "csrftoken"), Some("abc123".to_string()));
        assert_eq!(read_cookie(Some(store), "sessionid"), Some("xyz".to_string()));
        assert_eq!(read_cookie(Some(store), "theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_read_cookie_empty_store() {
        assert_eq!(read_cookie(None, "csrftoken"), None);
        assert_eq!(read_cookie(Some(""), "csrftoken"), None);
        assert_eq!(read_cookie(Some("   "), "csrftoken"), None);
    }

    #[test]
    fn test_read_cookie_missing_name() {
        assert_eq!(read_cookie(Some("sessionid=xyz"), "csrftoken"), None);
    }

    #[test]
    fn test_read_cookie_first_match_wins() {
        let store = "csrftoken=first; csrftoken=second";
        assert_eq!(read_cookie(Some(store), "csrftoken"), Some("first".to_string()));
    }

    #[test]
    fn test_read_cookie_requires_exact_name() {
        // "csrftoken2" and "xcsrftoken" must not satisfy "csrftoken"
        let store = "csrftoken2=nope; xcsrftoken=nope";
        assert_eq!(read_cookie(Some(store), "csrftoken"), None);
        assert_eq!(read_cookie(Some("csrftoken"), "csrftoken"), None);
    }

    #[test]
    fn test_read_cookie_url_decodes() {
        let store = "greeting=hello%20world%21; plus=a+b; utf8=caf%C3%A9";
        assert_eq!(read_cookie(Some(store), "greeting"), Some("hello world!".to_string()));
        assert_eq!(read_cookie(Some(store), "plus"), Some("a+b".to_string()));
        assert_eq!(read_cookie(Some(store), "utf8"), Some("café".to_string()));
    }

    #[test]
    fn test_read_cookie_undecodable_value_is_raw() {
        assert_eq!(read_cookie(Some("bad=%FF%FE"), "bad"), Some("%FF%FE".to_string()));
    }

    #[test]
    fn test_read_cookie_name_is_literal() {
        let store = "a.b=dot; a*b=star; axb=plain";
        assert_eq!(read_cookie(Some(store), "a.b"), Some("dot".to_string()));
        assert_eq!(read_cookie(Some(store), "a*b"), Some("star".to_string()));
        assert_eq!(read_cookie(Some("a%20b=enc"), "a b"), None);
    }

    #[test]
    fn test_read_cookie_keeps_equals_in_value() {
        assert_eq!(read_cookie(Some("token=a=b=c"), "token"), Some("a=b=c".to_string()));
        assert_eq!(read_cookie(Some("token="), "token"), Some(String::new()));
    }

    #[test]
    fn test_get_cookie_from_source() {
        let source = StaticCookies::new("csrftoken=abc123; sessionid=xyz");
        assert_eq!(get_cookie(&source, "csrftoken"), Some("abc123".to_string()));
        assert_eq!(get_cookie(&StaticCookies::none(), "csrftoken"), None);
    }

    #[test]
    fn test_cookie_parsing() {
        let url = Url::parse("https://app.example.com/login").unwrap();
        let header = "csrftoken=tok; expires=Sat, 16 Oct 2100 10:00:00 GMT; Path=/; SameSite=Lax";
        let cookie = Cookie::parse(header, &url).unwrap();

        assert_eq!(cookie.name, "csrftoken");
        assert_eq!(cookie.value, "tok");
        assert_eq!(cookie.domain, "app.example.com");
        assert_eq!(cookie.path, "/");
        assert!(cookie.expires.is_some());
        assert!(!cookie.is_expired());
        assert!(!cookie.http_only);

        let session = Cookie::parse("sessionid=s; HttpOnly; Secure", &url).unwrap();
        assert!(session.http_only);
        assert!(session.secure);

        assert!(Cookie::parse("novalue", &url).is_none());
        assert!(Cookie::parse("=orphan", &url).is_none());
    }

    #[test]
    fn test_jar_renders_visible_cookies_in_order() {
        let jar = CookieJar::new();
        let url = Url::parse("https://app.example.com/").unwrap();

        assert_eq!(jar.cookie_string(), None);

        jar.add_from_header("csrftoken=abc123; Path=/", &url);
        jar.add_from_header("sessionid=secret; HttpOnly", &url);
        jar.add_from_header("theme=dark", &url);

        assert_eq!(jar.len(), 3);
        assert_eq!(jar.cookie_string().as_deref(), Some("csrftoken=abc123; theme=dark"));
        assert_eq!(get_cookie(&jar, "csrftoken"), Some("abc123".to_string()));
        assert_eq!(get_cookie(&jar, "sessionid"), None);
    }

    #[test]
    fn test_jar_replaces_in_place() {
        let jar = CookieJar::new();
        let url = Url::parse("https://app.example.com/").unwrap();

        jar.add_from_header("csrftoken=old", &url);
        jar.add_from_header("theme=dark", &url);
        jar.add_from_header("csrftoken=new", &url);

        assert_eq!(jar.len(), 2);
        assert_eq!(jar.cookie_string().as_deref(), Some("csrftoken=new; theme=dark"));
    }

    #[test]
    fn test_jar_drops_expired_cookies() {
        let jar = CookieJar::new();
        let url = Url::parse("https://app.example.com/").unwrap();

        jar.add_from_header("csrftoken=abc", &url);
        jar.add_from_header("csrftoken=abc; Max-Age=0", &url);

        assert_eq!(jar.cookie_string(), None);
        assert!(jar.get_cookies(&url).is_empty());
    }

    #[test]
    fn test_jar_cookie_header_matching() {
        let jar = CookieJar::new();
        let url = Url::parse("https://app.example.com/api/items").unwrap();

        jar.add(Cookie::new("csrftoken", "abc").domain("example.com"));
        jar.add(Cookie::new("admin", "1").domain("example.com").path("/admin"));
        jar.add(Cookie::new("other", "x").domain("other.org"));

        assert_eq!(jar.get_cookie_header(&url).as_deref(), Some("csrftoken=abc"));

        let elsewhere = Url::parse("https://unrelated.net/").unwrap();
        assert_eq!(jar.get_cookie_header(&elsewhere), None);
    }

    #[test]
    fn test_cookie_path_boundary() {
        let admin = Cookie::new("a", "1").path("/admin");
        let url = |p: &str| Url::parse(&format!("https://example.com{}", p)).unwrap();

        assert!(admin.matches(&url("/admin")));
        assert!(admin.matches(&url("/admin/users")));
        assert!(!admin.matches(&url("/administrator")));
        assert!(!admin.matches(&url("/")));

        let trailing = Cookie::new("b", "2").path("/api/");
        assert!(trailing.matches(&url("/api/items")));
        assert!(!trailing.matches(&url("/api")));
    }

    #[test]
    fn test_scoped_jar_only_sees_its_host() {
        let jar = CookieJar::new();
        let other = Url::parse("https://other.org/").unwrap();
        let app = Url::parse("https://app.example.com/").unwrap();

        jar.add_from_header("csrftoken=attacker", &other);
        jar.add_from_header("csrftoken=good", &app);

        let scoped = jar.scoped(app.clone());
        assert_eq!(scoped.url(), &app);
        assert_eq!(get_cookie(&scoped, "csrftoken"), Some("good".to_string()));
        assert_eq!(
            get_cookie(&jar.scoped(other), "csrftoken"),
            Some("attacker".to_string())
        );
        assert_eq!(
            jar.cookie_string_for(&Url::parse("https://third.net/").unwrap()),
            None
        );
    }

    #[test]
    fn test_jar_seed() {
        let jar = CookieJar::new();
        let url = Url::parse("http://localhost:8000/").unwrap();

        jar.seed("csrftoken=abc123; sessionid=xyz; junk", &url);

        assert_eq!(jar.len(), 2);
        assert_eq!(
            jar.get_cookie_header(&url).as_deref(),
            Some("csrftoken=abc123; sessionid=xyz")
        );
        jar.clear();
        assert!(jar.is_empty());
    }
}
