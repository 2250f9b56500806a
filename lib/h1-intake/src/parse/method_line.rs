/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use atoi::FromRadix10;

use super::HttpLineParseError;
use crate::HttpVersion;

pub struct HttpMethodLine<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub version: HttpVersion,
}

impl<'a> HttpMethodLine<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<HttpMethodLine<'a>, HttpLineParseError> {
        let line = std::str::from_utf8(buf)?.trim_end_matches(['\r', '\n']);

        let mut fields = line.split_ascii_whitespace();
        let (Some(method), Some(uri), Some(version), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(HttpLineParseError::InvalidFieldCount(
                line.split_ascii_whitespace().count(),
            ));
        };

        if !is_token(method) {
            return Err(HttpLineParseError::InvalidMethod);
        }
        if uri.is_empty() {
            return Err(HttpLineParseError::EmptyRequestTarget);
        }
        let version = parse_version(version.as_bytes())?;

        Ok(HttpMethodLine {
            method,
            uri,
            version,
        })
    }
}

/// Parse the `HTTP/d.d` version token, which is always 8 bytes long.
fn parse_version(buf: &[u8]) -> Result<HttpVersion, HttpLineParseError> {
    const VERSION_LENGTH: usize = 8;

    if buf.len() != VERSION_LENGTH || !buf.starts_with(b"HTTP/") || buf[6] != b'.' {
        return Err(HttpLineParseError::InvalidVersion);
    }

    let (major, len) = u8::from_radix_10(&buf[5..6]);
    if len != 1 || major < 1 {
        return Err(HttpLineParseError::InvalidVersion);
    }
    let (minor, len) = u8::from_radix_10(&buf[7..8]);
    if len != 1 {
        return Err(HttpLineParseError::InvalidVersion);
    }

    Ok(HttpVersion::new(major, minor))
}

pub(crate) fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_tchar)
}

// tchar as defined in RFC 9110, Section 5.6.2
fn is_tchar(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~'
    ) || b.is_ascii_alphanumeric()
}
