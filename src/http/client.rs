// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSRF-aware request dispatcher

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use reqwest::Method;
use serde::Serialize;

use super::cookie::{get_cookie, CookieJar, CookieSource};
use super::headers::{default_headers, HeaderSet};
use super::request::RequestOptions;
use super::response::Response;
use super::transport::{ReqwestTransport, Transport};
use crate::config::AjaxConfig;
use crate::error::Result;

/// Dispatches AJAX requests with the CSRF token and standard headers attached
///
/// # Example
///
/// ```rust,no_run
/// use csrf_fetch::{AjaxClient, AjaxConfig, RequestOptions};
/// use reqwest::Method;
///
/// # async fn run() -> csrf_fetch::Result<()> {
/// let config = AjaxConfig::new().base_url("http://localhost:8000/")?;
/// let client = AjaxClient::with_config(config)?;
///
/// // Django sets the csrftoken cookie on the first page load
/// client.fetch("/collector/", RequestOptions::new()).await?;
///
/// let response = client
///     .fetch(
///         "/api/routes/",
///         RequestOptions::new().method(Method::POST).body(r#"{"route": 7}"#),
///     )
///     .await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AjaxClient {
    config: AjaxConfig,
    cookies: Arc<dyn CookieSource>,
    transport: Arc<dyn Transport>,
    cookie_jar: Option<CookieJar>,
}

impl AjaxClient {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(AjaxConfig::default())
    }

    /// Create a reqwest-backed client. Cookies set by responses are kept
    /// in a jar and the CSRF token is read from it. With a base URL only the
    /// cookies of that origin are visible, like `document.cookie` on a page
    /// served from it.
    pub fn with_config(config: AjaxConfig) -> Result<Self> {
        let cookie_jar = CookieJar::new();
        let transport = ReqwestTransport::new(&config, cookie_jar.clone())?;
        let cookies: Arc<dyn CookieSource> = match &config.base_url {
            Some(base) => Arc::new(cookie_jar.scoped(base.clone())),
            None => Arc::new(cookie_jar.clone()),
        };

        Ok(Self {
            config,
            cookies,
            transport: Arc::new(transport),
            cookie_jar: Some(cookie_jar),
        })
    }

    /// Create a client from an explicit cookie source and transport
    pub fn with_parts(
        config: AjaxConfig,
        cookies: Arc<dyn CookieSource>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            cookies,
            transport,
            cookie_jar: None,
        }
    }

    /// The cookie jar, when the client owns one
    pub fn cookie_jar(&self) -> Option<&CookieJar> {
        self.cookie_jar.as_ref()
    }

    /// Get client configuration
    pub fn config(&self) -> &AjaxConfig {
        &self.config
    }

    /// Read a cookie from the client's cookie source
    pub fn get_cookie(&self, name: &str) -> Option<String> {
        get_cookie(self.cookies.as_ref(), name)
    }

    /// Current CSRF token, if the cookie is set
    pub fn csrf_token(&self) -> Option<String> {
        self.get_cookie(&self.config.csrf_cookie_name)
    }

    /// The default AJAX headers as of now
    pub fn ajax_headers(&self) -> HeaderSet {
        default_headers(&self.config, self.cookies.as_ref())
    }

    /// Effective options for a request: caller headers overlaid on the
    /// default headers, every other field unchanged
    pub fn prepare(&self, options: RequestOptions) -> RequestOptions {
        options.with_default_headers(&self.ajax_headers())
    }

    /// Send a request to `address`.
    ///
    /// Headers are computed when this is called; the returned future is the
    /// transport's, so its errors reach the caller as the transport reports
    /// them.
    pub fn fetch(
        &self,
        address: impl Into<String>,
        options: RequestOptions,
    ) -> BoxFuture<'static, Result<Response>> {
        let address = address.into();
        let effective = self.prepare(options);
        let method = effective.method.clone().unwrap_or(Method::GET);

        tracing::debug!(
            %method,
            address = %address,
            csrf_token = self.has_token(&effective),
            "Dispatching request"
        );

        let transport = Arc::clone(&self.transport);
        async move { transport.send(&address, effective).await }.boxed()
    }

    /// GET `address`
    pub fn get(&self, address: impl Into<String>) -> BoxFuture<'static, Result<Response>> {
        self.fetch(address, RequestOptions::new().method(Method::GET))
    }

    /// POST `data` as JSON to `address`
    pub fn post_json<T: Serialize>(
        &self,
        address: impl Into<String>,
        data: &T,
    ) -> Result<BoxFuture<'static, Result<Response>>> {
        let options = RequestOptions::new().method(Method::POST).json(data)?;
        Ok(self.fetch(address, options))
    }

    fn has_token(&self, options: &RequestOptions) -> bool {
        options
            .headers
            .as_ref()
            .and_then(|h| h.get(&self.config.csrf_header_name))
            .is_some()
    }
}
