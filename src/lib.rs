// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # csrf-fetch - CSRF-aware AJAX requests
//!
//! Servers such as Django hand out an anti-forgery token in a `csrftoken`
//! cookie and expect it echoed back in an `X-CSRFToken` header on every
//! state-changing request. This crate reads the token, attaches it together
//! with the standard AJAX headers and merges caller options on top.
//!
//! ## Layers
//!
//! - Cookie reader: [`read_cookie`] / [`get_cookie`] over an injected [`CookieSource`]
//! - Header builder: [`ajax_headers`] / [`default_headers`] producing a [`HeaderSet`]
//! - Dispatcher: [`AjaxClient::fetch`] overlaying [`RequestOptions`] headers
//!   on the defaults and delegating to a [`Transport`]
//!
//! ## Example
//!
//! ```rust
//! use csrf_fetch::{ajax_headers, StaticCookies};
//!
//! let headers = ajax_headers(&StaticCookies::new("csrftoken=abc123; sessionid=xyz"));
//!
//! assert_eq!(headers.get("Content-Type"), Some("application/json"));
//! assert_eq!(headers.get("X-CSRFToken"), Some("abc123"));
//! assert_eq!(headers.get("X-Requested-With"), Some("XMLHttpRequest"));
//! ```

pub mod config;
pub mod error;
pub mod http;

// Re-exports for convenience

// Configuration
pub use config::AjaxConfig;

// Errors
pub use error::{Error, Result};

// Cookies
pub use http::{
    get_cookie, read_cookie, Cookie, CookieJar, CookieSource, ScopedCookieJar, StaticCookies,
};

// Headers
pub use http::{ajax_headers, default_headers, HeaderSet};

// Requests
pub use http::{AjaxClient, CredentialsMode, RequestMode, RequestOptions, Response};
pub use http::{ReqwestTransport, Transport};

/// csrf-fetch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
