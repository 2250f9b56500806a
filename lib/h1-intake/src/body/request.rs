/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use log::trace;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncReadExt, Empty, ReadBuf};

use super::{HttpBodyDecodeReader, HttpBodyType};
use crate::HttpIntakeConfig;

const DRAIN_BUFFER_SIZE: u64 = 2048;

/// Body of a request, sourced from the client connection.
///
/// The decode reader is created on first access to the stream, and is
/// reused by every later access.
pub struct HttpRequestBody<R> {
    body_type: Option<HttpBodyType>,
    body_line_max_size: usize,
    drain_read_timeout: Duration,
    source: Option<R>,
    decoder: Option<HttpBodyDecodeReader<R>>,
}

pub enum HttpRequestBodyStream<'a, R> {
    Empty(Empty),
    Decoder(&'a mut HttpBodyDecodeReader<R>),
}

impl<R> AsyncRead for HttpRequestBodyStream<'_, R>
where
    R: AsyncBufRead + Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            HttpRequestBodyStream::Empty(e) => Pin::new(e).poll_read(cx, buf),
            HttpRequestBodyStream::Decoder(d) => Pin::new(&mut **d).poll_read(cx, buf),
        }
    }
}

impl<R> HttpRequestBody<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(source: R, body_type: Option<HttpBodyType>, config: &HttpIntakeConfig) -> Self {
        let body_type = match body_type {
            Some(HttpBodyType::ContentLength(0)) => None,
            t => t,
        };
        HttpRequestBody {
            body_type,
            body_line_max_size: config.body_line_max_size(),
            drain_read_timeout: config.body_drain_read_timeout(),
            source: Some(source),
            decoder: None,
        }
    }

    #[inline]
    pub fn body_type(&self) -> Option<HttpBodyType> {
        self.body_type
    }

    /// Content length is greater than 0, or chunked encoding is used.
    #[inline]
    pub fn has_body(&self) -> bool {
        self.body_type.is_some()
    }

    /// Whether all the body has been read out of the source.
    pub fn finished(&self) -> bool {
        match &self.decoder {
            Some(decoder) => decoder.finished(),
            None => self.body_type.is_none(),
        }
    }

    /// Get the body stream. A request without body gets an always empty stream.
    pub fn stream(&mut self) -> HttpRequestBodyStream<'_, R> {
        if self.decoder.is_none() {
            if let Some(body_type) = self.body_type {
                if let Some(source) = self.source.take() {
                    self.decoder = Some(HttpBodyDecodeReader::new(
                        source,
                        body_type,
                        self.body_line_max_size,
                    ));
                }
            }
        }
        match self.decoder.as_mut() {
            Some(decoder) => HttpRequestBodyStream::Decoder(decoder),
            None => HttpRequestBodyStream::Empty(tokio::io::empty()),
        }
    }

    /// Read and discard what is left of the body.
    ///
    /// Each single read is bounded by the drain read timeout. Return `true` if
    /// the end of the body is reached.
    pub async fn drain(&mut self) -> bool {
        let buf_size = match self.body_type {
            None => return true,
            Some(HttpBodyType::ContentLength(len)) => len.min(DRAIN_BUFFER_SIZE),
            Some(HttpBodyType::Chunked) => DRAIN_BUFFER_SIZE,
        };
        let mut buf = vec![0u8; buf_size as usize];
        let read_timeout = self.drain_read_timeout;

        let mut stream = self.stream();
        loop {
            match tokio::time::timeout(read_timeout, stream.read(&mut buf)).await {
                Ok(Ok(0)) => {
                    trace!("request body drained");
                    return true;
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    trace!("failed to drain request body: {e}");
                    return false;
                }
                Err(_) => {
                    trace!("timed out to drain request body");
                    return false;
                }
            }
        }
    }

    /// Take back the source, with any body data not read left in it.
    pub fn into_source(self) -> Option<R> {
        match self.decoder {
            Some(decoder) => Some(decoder.into_inner()),
            None => self.source,
        }
    }
}
