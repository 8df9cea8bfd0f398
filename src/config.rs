// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! AJAX client configuration

use url::Url;

use crate::error::{Error, Result};
use crate::http::{
    DEFAULT_CONTENT_TYPE, DEFAULT_CSRF_COOKIE, DEFAULT_CSRF_HEADER, DEFAULT_REQUESTED_WITH,
    DEFAULT_USER_AGENT,
};

/// Configuration for [`AjaxClient`](crate::AjaxClient) and its transport
#[derive(Debug, Clone)]
pub struct AjaxConfig {
    /// Cookie holding the CSRF token
    pub csrf_cookie_name: String,
    /// Header the token is echoed in
    pub csrf_header_name: String,
    /// Value of the `Content-Type` default header
    pub content_type: String,
    /// Value of the `X-Requested-With` default header
    pub requested_with: String,
    /// Origin the client talks to. Relative addresses resolve against it.
    pub base_url: Option<Url>,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// User agent string
    pub user_agent: String,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for AjaxConfig {
    fn default() -> Self {
        Self {
            csrf_cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            csrf_header_name: DEFAULT_CSRF_HEADER.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            requested_with: DEFAULT_REQUESTED_WITH.to_string(),
            base_url: None,
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl AjaxConfig {
    /// Create a new config with Django defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CSRF cookie name
    pub fn csrf_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie_name = name.into();
        self
    }

    /// Set the CSRF header name
    pub fn csrf_header_name(mut self, name: impl Into<String>) -> Self {
        self.csrf_header_name = name.into();
        self
    }

    /// Set the default content type
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the base URL, e.g. `https://app.example.com/`
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(base_url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be a base URL", url)));
        }
        self.base_url = Some(url);
        Ok(self)
    }

    /// Set the redirect limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_django_defaults() {
        let config = AjaxConfig::default();
        assert_eq!(config.csrf_cookie_name, "csrftoken");
        assert_eq!(config.csrf_header_name, "X-CSRFToken");
        assert_eq!(config.content_type, "application/json");
        assert_eq!(config.requested_with, "XMLHttpRequest");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url() {
        let config = AjaxConfig::new().base_url("https://app.example.com/").unwrap();
        assert_eq!(
            config.base_url.as_ref().map(|u| u.as_str()),
            Some("https://app.example.com/")
        );

        assert!(AjaxConfig::new().base_url("mailto:someone@example.com").is_err());
        assert!(AjaxConfig::new().base_url("/relative").is_err());
    }
}
