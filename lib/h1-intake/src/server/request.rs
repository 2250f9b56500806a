/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::OnceLock;

use bytes::BufMut;
use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use http::{HeaderName, Method, header};
use log::debug;
use url::Url;
use uuid::Uuid;

use super::HttpRequestParseError;
use crate::header::{
    HttpAuth, HttpCookie, HttpHeaderMap, HttpHeaderValue, connection_keep_alive,
    content_type_charset, parse_cookie_header, resolve_charset, split_accept_languages,
    split_quoted_list, upgrade_has_protocol,
};
use crate::parse::{HttpHeaderLine, HttpLineParseError, HttpMethodLine};
use crate::{
    HttpBodyType, HttpConnectionInfo, HttpIntakeConfig, HttpRequestBody, HttpServerConnection,
    HttpVersion, generate_trace_id,
};

/// A request received on a client connection.
///
/// It is built from the request line, fed with header lines one by one and
/// then finished. After that it is read only.
#[derive(Debug)]
pub struct HttpServerRequest {
    method: Method,
    raw_url: String,
    version: HttpVersion,
    headers: HttpHeaderMap,
    conn_info: HttpConnectionInfo,
    trace_id: Uuid,
    create_time: DateTime<Utc>,
    content_length: Option<u64>,
    pub(super) chunked: bool,
    content_encoding: Option<&'static Encoding>,
    referer: Option<Url>,
    accept_types: Option<Vec<String>>,
    accept_languages: Option<Vec<String>>,
    auth: HttpAuth,
    user: Option<String>,
    pub(super) url: Option<Url>,
    pub(super) keep_alive_disabled: bool,
    body_taken: bool,
    cookies: OnceLock<Vec<HttpCookie>>,
    query_params: OnceLock<Vec<(String, String)>>,
    websocket: OnceLock<bool>,
    failure: Option<HttpRequestParseError>,
}

impl HttpServerRequest {
    fn new(method: Method, raw_url: &str, version: HttpVersion, conn_info: HttpConnectionInfo) -> Self {
        let create_time = Utc::now();
        HttpServerRequest {
            method,
            raw_url: raw_url.to_string(),
            version,
            headers: HttpHeaderMap::default(),
            conn_info,
            trace_id: generate_trace_id(&create_time),
            create_time,
            content_length: None,
            chunked: false,
            content_encoding: None,
            referer: None,
            accept_types: None,
            accept_languages: None,
            auth: HttpAuth::None,
            user: None,
            url: None,
            keep_alive_disabled: false,
            body_taken: false,
            cookies: OnceLock::new(),
            query_params: OnceLock::new(),
            websocket: OnceLock::new(),
            failure: None,
        }
    }

    /// Create the request from the request line.
    pub fn parse_request_line(
        line_buf: &[u8],
        conn_info: HttpConnectionInfo,
    ) -> Result<Self, HttpRequestParseError> {
        let line =
            HttpMethodLine::parse(line_buf).map_err(HttpRequestParseError::InvalidMethodLine)?;
        let method = Method::from_str(line.method).map_err(|_| {
            HttpRequestParseError::InvalidMethodLine(HttpLineParseError::InvalidMethod)
        })?;
        Ok(HttpServerRequest::new(method, line.uri, line.version, conn_info))
    }

    /// Record the failure unless one has been recorded already.
    pub(super) fn fail(&mut self, e: HttpRequestParseError) -> HttpRequestParseError {
        if self.failure.is_none() {
            debug!("[{}] invalid request: {e}", self.trace_id);
            self.failure = Some(e.clone());
        }
        e
    }

    /// The first failure found in this request.
    #[inline]
    pub fn failure(&self) -> Option<&HttpRequestParseError> {
        self.failure.as_ref()
    }

    /// Ingest one header line.
    ///
    /// The error is recorded in the request, and later lines can still be
    /// ingested.
    pub fn ingest_header_line(&mut self, line_buf: &[u8]) -> Result<(), HttpRequestParseError> {
        self.handle_header_line(line_buf).map_err(|e| self.fail(e))
    }

    fn handle_header_line(&mut self, line_buf: &[u8]) -> Result<(), HttpRequestParseError> {
        let header = HttpHeaderLine::parse(line_buf).map_err(|e| match e {
            HttpLineParseError::InvalidHeaderName => HttpRequestParseError::InvalidHeaderName,
            e => HttpRequestParseError::InvalidHeaderField(e),
        })?;
        let name = HeaderName::from_str(header.name)
            .map_err(|_| HttpRequestParseError::InvalidHeaderName)?;
        let mut value = HttpHeaderValue::from_bytes(header.value)
            .ok_or_else(|| HttpRequestParseError::InvalidHeaderValue(header.name.to_string()))?;
        value.set_original_name(header.name);

        let merged = self.headers.merge(name.clone(), value);
        match name.as_str() {
            "accept" => {
                self.accept_types = Some(split_quoted_list(&merged.to_str_lossy()));
            }
            "accept-language" => {
                self.accept_languages = Some(split_accept_languages(&merged.to_str_lossy()));
            }
            "content-length" => self.parse_header_content_length(header.value)?,
            "content-type" => {
                self.parse_header_content_type(&String::from_utf8_lossy(header.value))?
            }
            "referer" => {
                let referer = std::str::from_utf8(header.value)
                    .ok()
                    .and_then(|v| Url::parse(v).ok())
                    .ok_or(HttpRequestParseError::InvalidReferer)?;
                self.referer = Some(referer);
            }
            "authorization" => {
                match HttpAuth::from_authorization(&String::from_utf8_lossy(header.value)) {
                    Ok(auth) => self.auth = auth,
                    Err(e) => debug!("[{}] ignored authorization header: {e}", self.trace_id),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn parse_header_content_length(&mut self, value: &[u8]) -> Result<(), HttpRequestParseError> {
        if value.is_empty() || !value.iter().all(|b| b.is_ascii_digit()) {
            return Err(HttpRequestParseError::InvalidContentLength);
        }
        let content_length = std::str::from_utf8(value)
            .ok()
            .and_then(|v| u64::from_str(v).ok())
            .ok_or(HttpRequestParseError::InvalidContentLength)?;
        match self.content_length {
            Some(v) if v != content_length => Err(HttpRequestParseError::InvalidContentLength),
            _ => {
                self.content_length = Some(content_length);
                Ok(())
            }
        }
    }

    fn parse_header_content_type(&mut self, value: &str) -> Result<(), HttpRequestParseError> {
        let Some(charset) = content_type_charset(value) else {
            return Ok(());
        };
        let encoding = resolve_charset(&charset)
            .ok_or(HttpRequestParseError::InvalidContentType(charset))?;
        self.content_encoding = Some(encoding);
        Ok(())
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request target as sent on the request line.
    #[inline]
    pub fn raw_url(&self) -> &str {
        &self.raw_url
    }

    /// The absolute url, only available after the request is finished.
    #[inline]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    #[inline]
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    #[inline]
    pub fn headers(&self) -> &HttpHeaderMap {
        &self.headers
    }

    #[inline]
    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    #[inline]
    pub fn create_time(&self) -> &DateTime<Utc> {
        &self.create_time
    }

    #[inline]
    pub fn conn_info(&self) -> &HttpConnectionInfo {
        &self.conn_info
    }

    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.conn_info.local_addr()
    }

    #[inline]
    pub fn remote_addr(&self) -> SocketAddr {
        self.conn_info.remote_addr()
    }

    #[inline]
    pub fn is_local(&self) -> bool {
        self.conn_info.is_local()
    }

    #[inline]
    pub fn is_secure(&self) -> bool {
        self.conn_info.is_secure()
    }

    /// The local endpoint the request is sent to.
    pub fn user_host_address(&self) -> String {
        self.conn_info.local_addr().to_string()
    }

    /// The host name, and maybe port, the client asks for.
    pub fn user_host_name(&self) -> Option<&str> {
        self.headers.get_str(header::HOST)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get_str(header::USER_AGENT)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get_str(header::CONTENT_TYPE)
    }

    #[inline]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// The content length, or -1 if it is unknown.
    pub fn content_length64(&self) -> i64 {
        self.content_length
            .and_then(|v| i64::try_from(v).ok())
            .unwrap_or(-1)
    }

    /// The charset of the body, default to UTF-8.
    pub fn content_encoding(&self) -> &'static Encoding {
        self.content_encoding.unwrap_or(encoding_rs::UTF_8)
    }

    #[inline]
    pub fn referer(&self) -> Option<&Url> {
        self.referer.as_ref()
    }

    #[inline]
    pub fn accept_types(&self) -> Option<&[String]> {
        self.accept_types.as_deref()
    }

    #[inline]
    pub fn accept_languages(&self) -> Option<&[String]> {
        self.accept_languages.as_deref()
    }

    pub fn cookies(&self) -> &[HttpCookie] {
        self.cookies.get_or_init(|| {
            self.headers
                .get_str(header::COOKIE)
                .map(parse_cookie_header)
                .unwrap_or_default()
        })
    }

    pub fn query_params(&self) -> &[(String, String)] {
        self.query_params.get_or_init(|| {
            let query = match &self.url {
                Some(url) => url.query(),
                None => self.raw_url.split_once('?').map(|(_, q)| q),
            };
            match query {
                Some(q) => url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect(),
                None => Vec::new(),
            }
        })
    }

    #[inline]
    pub fn auth(&self) -> &HttpAuth {
        &self.auth
    }

    /// Attach the identity checked by the server.
    pub fn set_authenticated_user(&mut self, user: String) {
        self.user = Some(user);
    }

    #[inline]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn client_certificate(&self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "client certificate is not supported",
        ))
    }

    pub fn client_certificate_error(&self) -> i32 {
        0
    }

    /// Whether this is a GET request asking to upgrade to websocket.
    pub fn is_websocket_request(&self) -> bool {
        *self.websocket.get_or_init(|| {
            self.method == Method::GET
                && self.version > HttpVersion::HTTP_10
                && self.is_upgrade_request("websocket")
        })
    }

    pub fn is_upgrade_request(&self, protocol: &str) -> bool {
        self.headers
            .get_str(header::UPGRADE)
            .map(|v| upgrade_has_protocol(v, protocol))
            .unwrap_or(false)
    }

    #[inline]
    pub fn disable_keep_alive(&mut self) {
        self.keep_alive_disabled = true;
    }

    pub fn keep_alive(&self) -> bool {
        if self.keep_alive_disabled {
            return false;
        }
        if let Some(keep_alive) = self
            .headers
            .get_str(header::CONNECTION)
            .and_then(connection_keep_alive)
        {
            return keep_alive;
        }
        if self.version >= HttpVersion::HTTP_11 {
            true
        } else {
            self.headers.contains_key("keep-alive")
        }
    }

    /// Content length is greater than 0, or chunked encoding is used.
    pub fn has_body(&self) -> bool {
        self.body_type().is_some()
    }

    pub fn body_type(&self) -> Option<HttpBodyType> {
        if self.chunked {
            Some(HttpBodyType::Chunked)
        } else {
            match self.content_length {
                Some(0) | None => None,
                Some(len) => Some(HttpBodyType::ContentLength(len)),
            }
        }
    }

    /// Get the body reader of this request from the connection.
    ///
    /// The body is handed out only once. Later calls return `None`, as the
    /// framing state lives in the first reader and the connection may already
    /// be positioned at the next request.
    pub fn body<'a, C>(
        &mut self,
        conn: &'a mut C,
        config: &HttpIntakeConfig,
    ) -> Option<HttpRequestBody<&'a mut C::Reader>>
    where
        C: HttpServerConnection,
    {
        if self.body_taken {
            return None;
        }
        self.body_taken = true;
        Some(conn.request_body(self.body_type(), config))
    }

    /// Render the request line and all headers, ending with an empty line.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::<u8>::with_capacity(1024);
        buf.put_slice(self.method.as_str().as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.raw_url.as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.version.to_string().as_bytes());
        buf.put_slice(b"\r\n");
        self.headers
            .for_each(|name, value| value.write_to_buf(name, &mut buf));
        buf.put_slice(b"\r\n");
        buf
    }
}

impl fmt::Display for HttpServerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.raw_url, self.version)?;
        for (name, value) in self.headers.iter() {
            let name = value.original_name().unwrap_or(name.as_str());
            write!(f, "{name}: {}\r\n", value.to_str_lossy())?;
        }
        f.write_str("\r\n")
    }
}
