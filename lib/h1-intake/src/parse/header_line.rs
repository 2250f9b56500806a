/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use super::HttpLineParseError;
use super::method_line::is_token;

pub struct HttpHeaderLine<'a> {
    pub name: &'a str,
    /// The raw field value, which may contain obs-text bytes
    pub value: &'a [u8],
}

impl<'a> HttpHeaderLine<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<HttpHeaderLine<'a>, HttpLineParseError> {
        let Some(p) = memchr::memchr(b':', buf) else {
            return Err(HttpLineParseError::NoDelimiterFound(':'));
        };
        if p == 0 {
            return Err(HttpLineParseError::LeadingColon);
        }

        let name = std::str::from_utf8(&buf[0..p])?.trim();
        if !is_token(name) {
            return Err(HttpLineParseError::InvalidHeaderName);
        }
        let value = buf[p + 1..].trim_ascii();

        Ok(HttpHeaderLine { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        let h = HttpHeaderLine::parse(b"Host: example.com\r\n").unwrap();
        assert_eq!(h.name, "Host");
        assert_eq!(h.value, b"example.com");

        let h = HttpHeaderLine::parse(b"X-Time:12:30:00").unwrap();
        assert_eq!(h.name, "X-Time");
        assert_eq!(h.value, b"12:30:00");
    }

    #[test]
    fn empty_value() {
        let h = HttpHeaderLine::parse(b"X-Empty:").unwrap();
        assert_eq!(h.name, "X-Empty");
        assert_eq!(h.value, b"");
    }

    #[test]
    fn invalid() {
        assert_eq!(
            HttpHeaderLine::parse(b"NoColonHere").err(),
            Some(HttpLineParseError::NoDelimiterFound(':'))
        );
        assert_eq!(
            HttpHeaderLine::parse(b": value").err(),
            Some(HttpLineParseError::LeadingColon)
        );
        assert_eq!(
            HttpHeaderLine::parse(b"Bad Name: value").err(),
            Some(HttpLineParseError::InvalidHeaderName)
        );
        assert_eq!(
            HttpHeaderLine::parse(b"  : value").err(),
            Some(HttpLineParseError::InvalidHeaderName)
        );
        assert!(matches!(
            HttpHeaderLine::parse(b"N\xffme: value"),
            Err(HttpLineParseError::InvalidUtf8Encoding(_))
        ));
    }

    #[test]
    fn obs_text_value() {
        let h = HttpHeaderLine::parse(b"X-Name: caf\xe9 \r\n").unwrap();
        assert_eq!(h.name, "X-Name");
        assert_eq!(h.value, b"caf\xe9");
    }
}
