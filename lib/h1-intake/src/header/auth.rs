/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use base64::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpAuthParseError {
    #[error("no auth scheme found")]
    NoScheme,
    #[error("invalid base64 encoding")]
    InvalidBase64Encoding,
    #[error("invalid utf-8 encoding")]
    InvalidUtf8Encoding,
    #[error("no delimiter found")]
    NoDelimiterFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBasicAuth {
    pub username: String,
    pub password: String,
}

impl FromStr for HttpBasicAuth {
    type Err = HttpAuthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoded_value = s.trim(); // allow more space than RFC 7617

        let decoded = BASE64_STANDARD
            .decode(encoded_value)
            .map_err(|_| HttpAuthParseError::InvalidBase64Encoding)?;
        let value =
            std::str::from_utf8(&decoded).map_err(|_| HttpAuthParseError::InvalidUtf8Encoding)?;

        match memchr::memchr(b':', value.as_bytes()) {
            Some(i) => Ok(HttpBasicAuth {
                username: value[0..i].to_string(),
                password: value[i + 1..].to_string(),
            }),
            None => Err(HttpAuthParseError::NoDelimiterFound),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HttpAuth {
    #[default]
    None,
    Basic(HttpBasicAuth),
    /// Credentials of a scheme we do not decode, keeping the scheme name.
    Other(String),
}

impl HttpAuth {
    pub fn from_authorization(value: &str) -> Result<Self, HttpAuthParseError> {
        let value = value.trim();
        let (scheme, credentials) = match memchr::memchr(b' ', value.as_bytes()) {
            Some(i) => (&value[0..i], &value[i + 1..]),
            None if !value.is_empty() => (value, ""),
            None => return Err(HttpAuthParseError::NoScheme),
        };
        if scheme.eq_ignore_ascii_case("basic") {
            let basic = HttpBasicAuth::from_str(credentials)?;
            Ok(HttpAuth::Basic(basic))
        } else {
            Ok(HttpAuth::Other(scheme.to_string()))
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, HttpAuth::None)
    }
}
