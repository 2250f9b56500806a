/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use http::{Method, Uri, header};
use log::trace;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

use super::{HttpRequestParseError, HttpRequestRecvError, HttpServerRequest};
use crate::HttpVersion;

impl HttpServerRequest {
    /// Validate the request after all header lines have been ingested.
    ///
    /// The interim `100 Continue` response is written to `writer` if the
    /// client expects it. A failure recorded earlier is returned directly.
    pub async fn finish<W>(&mut self, writer: &mut W) -> Result<(), HttpRequestRecvError>
    where
        W: AsyncWrite + Unpin,
    {
        if let Some(e) = self.failure() {
            return Err(e.clone().into());
        }
        if self.url.is_some() {
            return Ok(());
        }

        let url = self.check_and_fix().map_err(|e| self.fail(e))?;

        if self.version() > HttpVersion::HTTP_10 {
            if let Some(expect) = self.headers().get(header::EXPECT) {
                if !expect.as_bytes().eq_ignore_ascii_case(b"100-continue") {
                    return Err(self.fail(HttpRequestParseError::InvalidExpect).into());
                }
                writer.write_all(crate::header::continue_as_bytes()).await?;
                writer.flush().await?;
                trace!("[{}] sent 100 continue", self.trace_id());
            }
        }

        self.url = Some(url);
        Ok(())
    }

    fn check_and_fix(&mut self) -> Result<Url, HttpRequestParseError> {
        if self.version() > HttpVersion::HTTP_10 && self.headers().get_str(header::HOST).is_none() {
            return Err(HttpRequestParseError::MissedHost);
        }

        let url = self.build_url()?;

        if let Some(te) = self.headers().get(header::TRANSFER_ENCODING) {
            if self.version() < HttpVersion::HTTP_11 {
                return Err(HttpRequestParseError::TransferEncodingNotAllowed(
                    self.version(),
                ));
            }
            if !te.as_bytes().eq_ignore_ascii_case(b"chunked") {
                return Err(HttpRequestParseError::UnsupportedTransferEncoding(
                    te.to_str_lossy().into_owned(),
                ));
            }
            self.chunked = true;
            if self.content_length().is_some() {
                // according to rfc9112 Section 6.1
                self.keep_alive_disabled = true;
            }
        }

        if self.content_length().is_none()
            && !self.chunked
            && matches!(self.method(), &Method::POST | &Method::PUT)
        {
            return Err(HttpRequestParseError::MissedContentLength);
        }

        Ok(url)
    }

    fn build_url(&self) -> Result<Url, HttpRequestParseError> {
        let raw_url = self.raw_url();
        let (uri_authority, path) = if raw_url == "*" {
            (None, "/".to_string())
        } else if raw_url.starts_with('/') {
            (None, raw_url.to_string())
        } else {
            // absolute-form
            let uri = Uri::from_str(raw_url).map_err(|_| HttpRequestParseError::InvalidRequestUrl)?;
            let (Some(_), Some(authority)) = (uri.scheme(), uri.authority()) else {
                return Err(HttpRequestParseError::InvalidRequestUrl);
            };
            let path = uri
                .path_and_query()
                .map(|v| v.as_str())
                .unwrap_or("/")
                .to_string();
            (
                Some((authority.host().to_string(), authority.port_u16())),
                path,
            )
        };
        if !path.starts_with('/') {
            return Err(HttpRequestParseError::InvalidRequestUrl);
        }

        let (host, port) = match uri_authority {
            Some((host, port)) => (url_host(&host)?, port),
            None => match self.headers().get_str(header::HOST) {
                Some(authority) => {
                    let (host, port) = split_host_port(authority)?;
                    (url_host(host)?, port)
                }
                None => {
                    let host = match self.local_addr().ip() {
                        IpAddr::V4(ip4) => ip4.to_string(),
                        IpAddr::V6(ip6) => format!("[{ip6}]"),
                    };
                    (host, None)
                }
            },
        };
        let scheme = match (self.is_websocket_request(), self.is_secure()) {
            (true, true) => "wss",
            (true, false) => "ws",
            (false, true) => "https",
            (false, false) => "http",
        };
        let port = port.unwrap_or_else(|| self.local_addr().port());

        Url::parse(&format!("{scheme}://{host}:{port}{path}"))
            .map_err(|_| HttpRequestParseError::InvalidRequestUrl)
    }
}

/// Split `host[:port]`. An empty port is the same as no port.
fn split_host_port(authority: &str) -> Result<(&str, Option<u16>), HttpRequestParseError> {
    let (host, port) = if authority.starts_with('[') {
        match authority.find(']') {
            Some(p) => {
                let (host, left) = authority.split_at(p + 1);
                match left.strip_prefix(':') {
                    Some(port) => (host, port),
                    None if left.is_empty() => (host, ""),
                    None => return Err(HttpRequestParseError::InvalidRequestUrl),
                }
            }
            None => (authority, ""),
        }
    } else {
        match authority.rsplit_once(':') {
            Some((h, port)) if !h.contains(':') => (h, port),
            _ => (authority, ""),
        }
    };
    if port.is_empty() {
        return Ok((host, None));
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HttpRequestParseError::InvalidRequestUrl);
    }
    let port = u16::from_str(port).map_err(|_| HttpRequestParseError::InvalidRequestUrl)?;
    Ok((host, Some(port)))
}

fn url_host(host: &str) -> Result<String, HttpRequestParseError> {
    if host.is_empty()
        || host
            .bytes()
            .any(|b| matches!(b, b'/' | b'?' | b'#' | b'@' | b'\\') || b.is_ascii_whitespace())
    {
        return Err(HttpRequestParseError::InvalidRequestUrl);
    }
    if let Ok(ip6) = Ipv6Addr::from_str(host) {
        Ok(format!("[{ip6}]"))
    } else {
        Ok(host.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HttpBodyType;
    use crate::server::request::tests::build_request;

    async fn finish(req: &mut HttpServerRequest) -> (Result<(), HttpRequestRecvError>, Vec<u8>) {
        let mut output = Vec::new();
        let r = req.finish(&mut output).await;
        (r, output)
    }

    fn parse_error(r: Result<(), HttpRequestRecvError>) -> HttpRequestParseError {
        match r {
            Err(HttpRequestRecvError::InvalidRequest(e)) => e,
            r => panic!("unexpected result {r:?}"),
        }
    }

    #[tokio::test]
    async fn simple_get() {
        let mut req = build_request("GET /a/b?c=d HTTP/1.1", &["Host: example.com"]);
        let (r, output) = finish(&mut req).await;
        r.unwrap();
        assert!(output.is_empty());
        assert_eq!(
            req.url().unwrap().as_str(),
            "http://example.com:8080/a/b?c=d"
        );
        assert_eq!(req.body_type(), None);
    }

    #[tokio::test]
    async fn missed_host() {
        let mut req = build_request("GET / HTTP/1.1", &[]);
        let (r, _) = finish(&mut req).await;
        assert_eq!(parse_error(r), HttpRequestParseError::MissedHost);
        assert!(req.url().is_none());

        let mut req = build_request("GET / HTTP/1.1", &["Host:"]);
        let (r, _) = finish(&mut req).await;
        assert_eq!(parse_error(r), HttpRequestParseError::MissedHost);

        // the local address is used for HTTP/1.0
        let mut req = build_request("GET /x HTTP/1.0", &[]);
        let (r, _) = finish(&mut req).await;
        r.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://10.0.0.1:8080/x");
    }

    #[tokio::test]
    async fn url_host_port() {
        let mut req = build_request("GET / HTTP/1.1", &["Host: example.com:9999"]);
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://example.com:9999/");

        let mut req = build_request("GET / HTTP/1.1", &["Host: [2001:db8::1]:9999"]);
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://[2001:db8::1]:9999/");

        let mut req = build_request("GET / HTTP/1.1", &["Host: [2001:db8::1]"]);
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://[2001:db8::1]:8080/");

        // the local port is used if the host has none
        let mut req = build_request("OPTIONS * HTTP/1.1", &["Host: example.com"]);
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://example.com:8080/");

        let mut req = build_request("GET / HTTP/1.1", &["Host: example.com:"]);
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://example.com:8080/");

        // the default port of the scheme is not shown
        let mut req = build_request("GET / HTTP/1.1", &["Host: example.com:80"]);
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://example.com/");
        assert_eq!(req.url().unwrap().port_or_known_default(), Some(80));
    }

    #[tokio::test]
    async fn url_absolute_form() {
        let mut req = build_request(
            "GET http://other.example.net:81/p?q=1 HTTP/1.1",
            &["Host: example.com"],
        );
        finish(&mut req).await.0.unwrap();
        assert_eq!(
            req.url().unwrap().as_str(),
            "http://other.example.net:81/p?q=1"
        );

        let mut req = build_request("GET http://other.example.net HTTP/1.1", &["Host: a"]);
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().as_str(), "http://other.example.net:8080/");
    }

    #[tokio::test]
    async fn url_invalid() {
        for (target, host) in [
            ("index.html", "example.com"),
            ("example.com:443", "example.com"),
            ("/", "evil.com/path"),
            ("/", "user@example.com"),
            ("/", "example.com:http"),
            ("/", "example.com:65536"),
            ("/", "[2001:db8::1]x"),
        ] {
            let host_line = format!("Host: {host}");
            let mut req = build_request(&format!("GET {target} HTTP/1.1"), &[host_line.as_str()]);
            let (r, _) = finish(&mut req).await;
            assert_eq!(parse_error(r), HttpRequestParseError::InvalidRequestUrl);
            assert!(req.url().is_none());
        }
    }

    #[tokio::test]
    async fn url_scheme() {
        let mut req = build_request(
            "GET /chat HTTP/1.1",
            &["Host: example.com", "Upgrade: websocket", "Connection: Upgrade"],
        );
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.url().unwrap().scheme(), "ws");
    }

    #[tokio::test]
    async fn transfer_encoding() {
        let mut req = build_request(
            "POST / HTTP/1.1",
            &["Host: example.com", "Transfer-Encoding: Chunked"],
        );
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.body_type(), Some(HttpBodyType::Chunked));
        assert!(req.has_body());
        assert!(req.keep_alive());

        let mut req = build_request(
            "POST / HTTP/1.1",
            &["Host: example.com", "Transfer-Encoding: gzip"],
        );
        let e = parse_error(finish(&mut req).await.0);
        assert_eq!(
            e,
            HttpRequestParseError::UnsupportedTransferEncoding("gzip".to_string())
        );
        assert_eq!(e.status_code(), http::StatusCode::NOT_IMPLEMENTED);

        let mut req = build_request(
            "POST / HTTP/1.1",
            &[
                "Host: example.com",
                "Transfer-Encoding: gzip",
                "Transfer-Encoding: chunked",
            ],
        );
        assert!(matches!(
            parse_error(finish(&mut req).await.0),
            HttpRequestParseError::UnsupportedTransferEncoding(_)
        ));

        let mut req = build_request("POST / HTTP/1.0", &["Transfer-Encoding: chunked"]);
        assert_eq!(
            parse_error(finish(&mut req).await.0),
            HttpRequestParseError::TransferEncodingNotAllowed(HttpVersion::HTTP_10)
        );
    }

    #[tokio::test]
    async fn transfer_encoding_with_content_length() {
        let mut req = build_request(
            "POST / HTTP/1.1",
            &[
                "Host: example.com",
                "Content-Length: 10",
                "Transfer-Encoding: chunked",
            ],
        );
        finish(&mut req).await.0.unwrap();
        assert_eq!(req.body_type(), Some(HttpBodyType::Chunked));
        assert!(!req.keep_alive());
    }

    #[tokio::test]
    async fn length_required() {
        for method in ["POST", "PUT"] {
            let mut req = build_request(&format!("{method} / HTTP/1.1"), &["Host: example.com"]);
            let e = parse_error(finish(&mut req).await.0);
            assert_eq!(e, HttpRequestParseError::MissedContentLength);
            assert_eq!(e.status_code(), http::StatusCode::LENGTH_REQUIRED);
        }

        let mut req = build_request("DELETE / HTTP/1.1", &["Host: example.com"]);
        finish(&mut req).await.0.unwrap();

        let mut req = build_request("POST / HTTP/1.1", &["Host: example.com", "Content-Length: 0"]);
        finish(&mut req).await.0.unwrap();
        assert!(!req.has_body());
    }

    #[tokio::test]
    async fn expect_continue() {
        let mut req = build_request(
            "POST /upload HTTP/1.1",
            &["Host: example.com", "Content-Length: 5", "Expect: 100-Continue"],
        );
        let (r, output) = finish(&mut req).await;
        r.unwrap();
        assert_eq!(output.as_slice(), b"HTTP/1.1 100 Continue\r\n\r\n");

        // no more bytes on a second call
        let (r, output) = finish(&mut req).await;
        r.unwrap();
        assert!(output.is_empty());

        let mut req = build_request(
            "POST /upload HTTP/1.1",
            &["Host: example.com", "Content-Length: 5", "Expect: foo"],
        );
        let (r, output) = finish(&mut req).await;
        assert_eq!(parse_error(r), HttpRequestParseError::InvalidExpect);
        assert!(output.is_empty());
        assert!(req.url().is_none());

        // ignored for HTTP/1.0
        let mut req = build_request(
            "POST /upload HTTP/1.0",
            &["Content-Length: 5", "Expect: foo"],
        );
        let (r, output) = finish(&mut req).await;
        r.unwrap();
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn expect_write_failed() {
        let mut req = build_request(
            "POST /upload HTTP/1.1",
            &["Host: example.com", "Content-Length: 5", "Expect: 100-continue"],
        );
        let mut writer = tokio_test::io::Builder::new()
            .write_error(std::io::Error::other("broken pipe"))
            .build();
        let r = req.finish(&mut writer).await;
        assert!(matches!(r, Err(HttpRequestRecvError::IoFailed(_))));
    }

    #[tokio::test]
    async fn recorded_failure() {
        let mut req = build_request(
            "POST / HTTP/1.1",
            &["Content-Length: abc", "Transfer-Encoding: gzip"],
        );
        let (r, _) = finish(&mut req).await;
        assert_eq!(parse_error(r), HttpRequestParseError::InvalidContentLength);
        assert_eq!(req.failure(), Some(&HttpRequestParseError::InvalidContentLength));
    }
}
