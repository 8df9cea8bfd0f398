// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request options passed to the dispatcher

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;

use super::headers::HeaderSet;
use crate::error::{Error, Result};

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send cookies only to the configured origin
    #[default]
    SameOrigin,
    /// Always send cookies
    Include,
    /// Never send cookies
    Omit,
}

impl FromStr for CredentialsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "same-origin" => Ok(Self::SameOrigin),
            "include" => Ok(Self::Include),
            "omit" => Ok(Self::Omit),
            other => Err(Error::Config(format!("Unknown credentials mode: {}", other))),
        }
    }
}

/// Request mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// Cross-origin requests allowed
    #[default]
    Cors,
    /// Cross-origin requests are an error
    SameOrigin,
    /// Opaque cross-origin requests
    NoCors,
    /// Top-level navigation
    Navigate,
}

/// Caller options for a single request.
///
/// Every field is optional. `headers` is overlaid on the default AJAX
/// headers by the dispatcher; all other fields reach the transport as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Request method (transport default: GET)
    pub method: Option<Method>,
    /// Request body
    pub body: Option<Bytes>,
    /// Credentials mode
    pub credentials: Option<CredentialsMode>,
    /// Request mode
    pub mode: Option<RequestMode>,
    /// Headers overriding the defaults
    pub headers: Option<HeaderSet>,
}

impl RequestOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `data` as the JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = Some(Bytes::from(serde_json::to_vec(data)?));
        Ok(self)
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = Some(mode);
        self
    }

    /// Set request mode
    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set one header override
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(HeaderSet::new).set(name, value);
        self
    }

    /// Replace all header overrides
    pub fn headers(mut self, headers: impl Into<HeaderSet>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Effective options: `self` with its headers overlaid on `defaults`
    pub fn with_default_headers(mut self, defaults: &HeaderSet) -> Self {
        let merged = match &self.headers {
            Some(overrides) => defaults.merge(overrides),
            None => defaults.clone(),
        };
        self.headers = Some(merged);
        self
    }
}

impl From<HashMap<String, String>> for RequestOptions {
    fn from(headers: HashMap<String, String>) -> Self {
        Self::new().headers(headers)
    }
}
