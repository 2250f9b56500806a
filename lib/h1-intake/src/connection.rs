/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::SocketAddr;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::{HttpBodyType, HttpIntakeConfig, HttpRequestBody};

/// Addresses and transport facts of an accepted client connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpConnectionInfo {
    local_addr: SocketAddr,
    remote_addr: SocketAddr,
    secure: bool,
}

impl HttpConnectionInfo {
    pub fn new(local_addr: SocketAddr, remote_addr: SocketAddr, secure: bool) -> Self {
        HttpConnectionInfo {
            local_addr,
            remote_addr,
            secure,
        }
    }

    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    #[inline]
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Whether the connection runs over TLS.
    #[inline]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Whether the client is on the same host.
    pub fn is_local(&self) -> bool {
        let remote = self.remote_addr.ip().to_canonical();
        remote.is_loopback() || remote == self.local_addr.ip().to_canonical()
    }
}

/// The client connection a request is read from.
///
/// The TLS layer, if any, is already terminated in the reader and writer.
pub trait HttpServerConnection {
    type Reader: AsyncBufRead + Unpin;
    type Writer: AsyncWrite + Unpin;

    fn info(&self) -> &HttpConnectionInfo;

    fn reader(&mut self) -> &mut Self::Reader;

    fn writer(&mut self) -> &mut Self::Writer;

    /// Create the body reader for a request whose head has been read.
    fn request_body(
        &mut self,
        body_type: Option<HttpBodyType>,
        config: &HttpIntakeConfig,
    ) -> HttpRequestBody<&mut Self::Reader> {
        HttpRequestBody::new(self.reader(), body_type, config)
    }
}

pub struct HttpClientConnection<R, W> {
    info: HttpConnectionInfo,
    reader: R,
    writer: W,
}

impl<R, W> HttpClientConnection<R, W> {
    pub fn new(info: HttpConnectionInfo, reader: R, writer: W) -> Self {
        HttpClientConnection {
            info,
            reader,
            writer,
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R, W> HttpServerConnection for HttpClientConnection<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    type Reader = R;
    type Writer = W;

    fn info(&self) -> &HttpConnectionInfo {
        &self.info
    }

    fn reader(&mut self) -> &mut R {
        &mut self.reader
    }

    fn writer(&mut self) -> &mut W {
        &mut self.writer
    }
}
