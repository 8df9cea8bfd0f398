// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for csrf-fetch
//!
//! Cookie reading, the default AJAX header set, request options and the
//! dispatcher that merges them before handing off to a transport.

mod client;
mod cookie;
mod headers;
mod request;
mod response;
mod transport;

pub use client::AjaxClient;
pub use cookie::{
    get_cookie, read_cookie, Cookie, CookieJar, CookieSource, ScopedCookieJar,
    StaticCookies,
};
pub use headers::{ajax_headers, default_headers, HeaderSet};
pub use request::{CredentialsMode, RequestMode, RequestOptions};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("csrf-fetch/", env!("CARGO_PKG_VERSION"));

/// Cookie Django stores the CSRF token in
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Header Django expects the CSRF token in
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Default request content type
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Marks a request as AJAX
pub const DEFAULT_REQUESTED_WITH: &str = "XMLHttpRequest";

/// Common HTTP header names
pub mod header_names {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const X_REQUESTED_WITH: &str = "X-Requested-With";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
}
