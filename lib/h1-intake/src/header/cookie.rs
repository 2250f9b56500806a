/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpCookie {
    pub name: String,
    pub value: String,
    pub version: u32,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub port: Option<String>,
}

/// Parse the value of a request Cookie header.
///
/// Both the RFC 6265 form (`a=1; b=2`) and the RFC 2965 form with `$Version`,
/// `$Path`, `$Domain` and `$Port` attributes are accepted. An attribute applies
/// to the cookie just before it, except `$Version` which applies to all the
/// cookies after it.
pub fn parse_cookie_header(value: &str) -> Vec<HttpCookie> {
    let mut cookies = Vec::new();
    let mut current: Option<HttpCookie> = None;
    let mut version = 0u32;

    for s in value.split([';', ',']) {
        let s = s.trim();
        if s.is_empty() {
            continue;
        }

        let (name, v) = match s.split_once('=') {
            Some((name, v)) => (name.trim(), v.trim()),
            None => (s, ""),
        };

        if let Some(attr) = name.strip_prefix('$') {
            let v = unquote(v);
            if attr.eq_ignore_ascii_case("version") {
                version = v.parse().unwrap_or(0);
            } else if let Some(cookie) = current.as_mut() {
                if attr.eq_ignore_ascii_case("path") {
                    cookie.path = Some(v.to_string());
                } else if attr.eq_ignore_ascii_case("domain") {
                    cookie.domain = Some(v.to_string());
                } else if attr.eq_ignore_ascii_case("port") {
                    cookie.port = Some(v.to_string());
                }
            }
            continue;
        }
        if name.is_empty() {
            continue;
        }

        if let Some(cookie) = current.take() {
            cookies.push(cookie);
        }
        current = Some(HttpCookie {
            name: name.to_string(),
            value: v.to_string(),
            version,
            ..Default::default()
        });
    }
    if let Some(cookie) = current {
        cookies.push(cookie);
    }
    cookies
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple() {
        let cookies = parse_cookie_header("a=1; b=2;c");
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies[0].name, "a");
        assert_eq!(cookies[0].value, "1");
        assert_eq!(cookies[1].name, "b");
        assert_eq!(cookies[1].value, "2");
        assert_eq!(cookies[2].name, "c");
        assert_eq!(cookies[2].value, "");
        assert_eq!(cookies[2].version, 0);
    }

    #[test]
    fn with_attributes() {
        let cookies = parse_cookie_header(
            r#"$Version="1"; Customer="WILE_E_COYOTE"; $Path="/acme"; Part="Rocket"; $Domain=example.com; $Port="80""#,
        );
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name, "Customer");
        assert_eq!(cookies[0].value, r#""WILE_E_COYOTE""#);
        assert_eq!(cookies[0].version, 1);
        assert_eq!(cookies[0].path.as_deref(), Some("/acme"));
        assert!(cookies[0].domain.is_none());
        assert_eq!(cookies[1].name, "Part");
        assert_eq!(cookies[1].domain.as_deref(), Some("example.com"));
        assert_eq!(cookies[1].port.as_deref(), Some("80"));
    }

    #[test]
    fn empty() {
        assert!(parse_cookie_header("").is_empty());
        assert!(parse_cookie_header(" ; ,").is_empty());
        assert!(parse_cookie_header("$Path=/").is_empty());
    }
}
