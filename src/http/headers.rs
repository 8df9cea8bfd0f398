// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header sets and the default AJAX headers

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::cookie::{get_cookie, CookieSource};
use crate::config::AjaxConfig;
use crate::error::{Error, Result};

/// Ordered mapping from header name to value.
///
/// Names compare case-insensitively. A `None` value is a header that is
/// present in the set but carries no value, e.g. a CSRF token that was not
/// found; it is not written to the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, Option<String>)>,
}

impl HeaderSet {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header. An existing header with the same name is replaced in
    /// place and takes the new spelling of the name.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx] = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    /// Insert a header with a value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name, Some(value.into()));
    }

    /// Builder form of [`HeaderSet::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Get a header value. `None` when the header is missing or has no value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|idx| self.entries[idx].1.as_deref())
    }

    /// Check whether the header is in the set, with or without a value
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove a header, returning its value
    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Overlay `overrides` on top of `self`, one level deep.
    ///
    /// Every header in `overrides` replaces the same-named header here; the
    /// headers it does not name are kept untouched.
    pub fn merge(&self, overrides: &HeaderSet) -> HeaderSet {
        let mut merged = self.clone();
        for (name, value) in &overrides.entries {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a wire header map, skipping headers without a value
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let Some(value) = value else { continue };
            let header_name =
                HeaderName::try_from(name.as_str()).map_err(|e| Error::invalid_header(name, e))?;
            let header_value =
                HeaderValue::try_from(value.as_str()).map_err(|e| Error::invalid_header(name, e))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

impl From<HashMap<String, String>> for HeaderSet {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl Serialize for HeaderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Build the AJAX headers for `config`.
///
/// Always exactly three entries: content type, CSRF token and
/// `X-Requested-With`. The token is whatever the cookie holds; when the
/// cookie is missing the header is present with no value.
pub fn default_headers(config: &AjaxConfig, cookies: &dyn CookieSource) -> HeaderSet {
    let mut headers = HeaderSet::new();
    headers.set(super::header_names::CONTENT_TYPE, config.content_type.as_str());
    headers.insert(
        config.csrf_header_name.as_str(),
        get_cookie(cookies, &config.csrf_cookie_name),
    );
    headers.set(super::header_names::X_REQUESTED_WITH, config.requested_with.as_str());
    headers
}

/// The Django AJAX headers: `Content-Type: application/json`,
/// `X-CSRFToken` from the `csrftoken` cookie and
/// `X-Requested-With: XMLHttpRequest`.
pub fn ajax_headers(cookies: &dyn CookieSource) -> HeaderSet {
    default_headers(&AjaxConfig::default(), cookies)
}
