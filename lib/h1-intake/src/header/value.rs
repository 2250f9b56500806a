/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use http::HeaderName;

use super::HttpOriginalHeaderName;

#[derive(Clone)]
pub struct HttpHeaderValue {
    inner: Bytes,
    original_name: Option<HttpOriginalHeaderName>,
}

impl HttpHeaderValue {
    pub fn from_static(value: &'static str) -> Self {
        HttpHeaderValue {
            inner: Bytes::from_static(value.as_bytes()),
            original_name: None,
        }
    }

    /// Build from the raw field value. Control characters other than HTAB
    /// are rejected, while obs-text bytes are kept as they are.
    pub fn from_bytes(value: &[u8]) -> Option<Self> {
        if !value.iter().all(|b| is_valid(*b)) {
            return None;
        }
        Some(HttpHeaderValue {
            inner: Bytes::copy_from_slice(value),
            original_name: None,
        })
    }

    pub fn set_original_name(&mut self, name: &str) {
        self.original_name = Some(HttpOriginalHeaderName::from(name));
    }

    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_ref()
    }

    /// The value as text, if it is valid UTF-8.
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(self.inner.as_ref()).ok()
    }

    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.inner.as_ref())
    }

    /// Merge a repeated field into this one, joined by a comma.
    pub fn join(&mut self, other: &HttpHeaderValue) {
        if other.inner.is_empty() {
            return;
        }
        if self.inner.is_empty() {
            self.inner = other.inner.clone();
            return;
        }
        let mut buf = BytesMut::with_capacity(self.inner.len() + 2 + other.inner.len());
        buf.put_slice(self.inner.as_ref());
        buf.put_slice(b", ");
        buf.put_slice(other.inner.as_ref());
        self.inner = buf.freeze();
    }

    pub fn write_to_buf(&self, name: &HeaderName, buf: &mut Vec<u8>) {
        if let Some(name) = self.original_name() {
            buf.put_slice(name.as_bytes());
        } else {
            buf.put_slice(name.as_ref());
        }
        buf.put_slice(b": ");
        buf.put_slice(self.inner.as_ref());
        buf.put_slice(b"\r\n");
    }
}

impl fmt::Debug for HttpHeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_str_lossy(), f)
    }
}

impl FromStr for HttpHeaderValue {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpHeaderValue::from_bytes(s.as_bytes()).ok_or(())
    }
}

#[inline]
fn is_valid(b: u8) -> bool {
    b >= 32 && b != 127 || b == b'\t'
}
