/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use http::header::{AsHeaderName, Entry};
use http::{HeaderMap, HeaderName};

use super::HttpHeaderValue;

/// Request header fields keyed by lowercase name.
///
/// Each name holds a single value: repeated fields are merged into the
/// existing value with a comma, and names are kept in arrival order.
#[derive(Debug, Default, Clone)]
pub struct HttpHeaderMap {
    inner: HeaderMap<HttpHeaderValue>,
}

impl HttpHeaderMap {
    /// Store the field, joining it to any value already present for `name`.
    pub fn merge(&mut self, name: HeaderName, value: HttpHeaderValue) -> &HttpHeaderValue {
        match self.inner.entry(name) {
            Entry::Occupied(o) => {
                let v = o.into_mut();
                v.join(&value);
                v
            }
            Entry::Vacant(v) => v.insert(value),
        }
    }

    #[inline]
    pub fn contains_key<K: AsHeaderName>(&self, name: K) -> bool {
        self.inner.contains_key(name)
    }

    #[inline]
    pub fn get<K: AsHeaderName>(&self, name: K) -> Option<&HttpHeaderValue> {
        self.inner.get(name)
    }

    /// Get the value of `name` if it is present, not empty and valid UTF-8.
    pub fn get_str<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.inner
            .get(name)
            .and_then(|v| v.to_str())
            .filter(|s| !s.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HttpHeaderValue)> {
        self.inner.iter()
    }

    pub fn for_each<F>(&self, mut call: F)
    where
        F: FnMut(&HeaderName, &HttpHeaderValue),
    {
        self.inner
            .iter()
            .for_each(|(name, value)| call(name, value));
    }
}
