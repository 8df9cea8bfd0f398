// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transports carry a prepared request to the network

use async_trait::async_trait;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, StatusCode};
use url::Url;

use super::cookie::CookieJar;
use super::header_names::{COOKIE, SET_COOKIE};
use super::request::{CredentialsMode, RequestMode, RequestOptions};
use super::response::Response;
use crate::config::AjaxConfig;
use crate::error::{Error, Result};

/// The HTTP client a dispatcher delegates to.
///
/// Implementations own every network concern: address resolution, cookies,
/// redirects and error reporting. Whatever `send` resolves to is what the
/// caller of the dispatcher sees.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request to `address` with the effective options
    async fn send(&self, address: &str, options: RequestOptions) -> Result<Response>;
}

/// reqwest-backed transport sharing a [`CookieJar`] with the header builder
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    cookie_jar: CookieJar,
    base_url: Option<Url>,
    max_redirects: usize,
}

impl ReqwestTransport {
    /// Create a transport for `config` that stores cookies in `cookie_jar`
    pub fn new(config: &AjaxConfig, cookie_jar: CookieJar) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .redirect(Policy::none())
            .cookie_store(false); // The jar is ours

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(Self {
            client: builder.build()?,
            cookie_jar,
            base_url: config.base_url.clone(),
            max_redirects: config.max_redirects,
        })
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Resolve an address against the base URL, if one is configured
    pub fn resolve(&self, address: &str) -> Result<Url> {
        match self.base_url {
            Some(ref base) => Ok(base.join(address)?),
            None => Ok(Url::parse(address)?),
        }
    }

    // Without a configured origin every target counts as same-origin.
    fn is_same_origin(&self, url: &Url) -> bool {
        self.base_url
            .as_ref()
            .map_or(true, |base| base.origin() == url.origin())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, address: &str, options: RequestOptions) -> Result<Response> {
        let start_url = self.resolve(address)?;
        let headers = match options.headers {
            Some(ref headers) => headers.to_header_map()?,
            None => HeaderMap::new(),
        };
        let credentials = options.credentials.unwrap_or_default();

        let mut url = start_url.clone();
        let mut method = options.method.unwrap_or(Method::GET);
        let mut body = options.body;
        let mut hops = 0;

        // Redirects are followed here so every hop's cookies reach the jar
        loop {
            let same_origin = self.is_same_origin(&url);
            if options.mode == Some(RequestMode::SameOrigin) && !same_origin {
                let origin = self
                    .base_url
                    .as_ref()
                    .map(|base| base.origin().ascii_serialization())
                    .unwrap_or_default();
                return Err(Error::cross_origin(url.as_str(), origin));
            }

            let mut builder = self
                .client
                .request(method.clone(), url.clone())
                .headers(headers.clone());

            let send_cookies = match credentials {
                CredentialsMode::Include => true,
                CredentialsMode::SameOrigin => same_origin,
                CredentialsMode::Omit => false,
            };
            if send_cookies {
                if let Some(cookie_header) = self.cookie_jar.get_cookie_header(&url) {
                    builder = builder.header(COOKIE, cookie_header);
                }
            }

            if let Some(ref body) = body {
                builder = builder.body(body.clone());
            }

            let response = builder.send().await?;
            let status = response.status();
            let response_headers = response.headers().clone();

            for cookie in response_headers.get_all(SET_COOKIE) {
                if let Ok(cookie_str) = cookie.to_str() {
                    self.cookie_jar.add_from_header(cookie_str, &url);
                }
            }

            let next = status
                .is_redirection()
                .then(|| response_headers.get(LOCATION))
                .flatten()
                .and_then(|location| location.to_str().ok())
                .map(|location| url.join(location))
                .transpose()?;

            let Some(next) = next else {
                let redirected = hops > 0;
                tracing::debug!(%method, %url, status = status.as_u16(), redirected, "Response received");

                let body = response.bytes().await?;
                return Ok(Response::new(status, response_headers, body, url, redirected));
            };

            hops += 1;
            if hops > self.max_redirects {
                return Err(Error::TooManyRedirects {
                    url: start_url.to_string(),
                    max: self.max_redirects,
                });
            }

            // 303, and 301/302 after POST, continue as a bodiless GET
            if status == StatusCode::SEE_OTHER
                || (method == Method::POST
                    && matches!(status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND))
            {
                if method != Method::HEAD {
                    method = Method::GET;
                }
                body = None;
            }

            tracing::trace!(from = %url, to = %next, status = status.as_u16(), "Following redirect");
            url = next;
        }
    }
}
