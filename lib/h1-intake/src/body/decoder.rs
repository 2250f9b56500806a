/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

use super::{ChunkedDecodeReader, HttpBodyType};

enum HttpBodyDecodeState<R> {
    ReadFixedLength(R, u64),
    Chunked(ChunkedDecodeReader<R>),
}

/// Read the body of a request, the framing removed.
pub struct HttpBodyDecodeReader<R> {
    finished: bool,
    total_read: u64,
    decode_state: HttpBodyDecodeState<R>,
}

impl<R> HttpBodyDecodeReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R, body_type: HttpBodyType, body_line_max_size: usize) -> Self {
        match body_type {
            HttpBodyType::ContentLength(size) => Self::new_fixed_length(reader, size),
            HttpBodyType::Chunked => Self::new_chunked(reader, body_line_max_size),
        }
    }

    pub fn new_fixed_length(reader: R, content_length: u64) -> Self {
        HttpBodyDecodeReader {
            finished: content_length == 0,
            total_read: 0,
            decode_state: HttpBodyDecodeState::ReadFixedLength(reader, content_length),
        }
    }

    pub fn new_chunked(reader: R, body_line_max_size: usize) -> Self {
        HttpBodyDecodeReader {
            finished: false,
            total_read: 0,
            decode_state: HttpBodyDecodeState::Chunked(ChunkedDecodeReader::new(
                reader,
                body_line_max_size,
            )),
        }
    }

    /// All body data, and the trailer if chunked, has been read.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Decoded bytes returned so far.
    pub fn total_read(&self) -> u64 {
        self.total_read
    }

    pub fn into_inner(self) -> R {
        match self.decode_state {
            HttpBodyDecodeState::ReadFixedLength(r, _) => r,
            HttpBodyDecodeState::Chunked(c) => c.into_reader(),
        }
    }
}

impl<R> AsyncRead for HttpBodyDecodeReader<R>
where
    R: AsyncBufRead + Unpin,
{
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.finished {
            return Poll::Ready(Ok(()));
        }
        if buf.remaining() == 0 {
            // invalid read action
            return Poll::Ready(Ok(()));
        }

        let me = &mut *self;
        let total_read = me.total_read;
        match &mut me.decode_state {
            HttpBodyDecodeState::ReadFixedLength(r, max_len) => {
                let max_read = *max_len;
                let left = max_read - total_read;
                let to_read = left.min(buf.remaining() as u64) as usize;
                let mut new_buf = ReadBuf::new(buf.initialize_unfilled_to(to_read));
                ready!(Pin::new(r).poll_read(cx, &mut new_buf))?;
                let nr = new_buf.filled().len();
                if nr == 0 {
                    return Poll::Ready(Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("EOF after read {total_read} of {max_read} body"),
                    )));
                }
                buf.advance(nr);
                me.total_read += nr as u64;
                if me.total_read == max_read {
                    me.finished = true;
                }
            }
            HttpBodyDecodeState::Chunked(c) => {
                let prev_len = buf.filled().len();
                let mut pin_c = Pin::new(c);
                ready!(pin_c.as_mut().poll_read(cx, buf))?;
                if pin_c.finished() {
                    me.finished = true;
                }
                let nr = buf.filled().len() - prev_len;
                me.total_read += nr as u64;
            }
        }
        Poll::Ready(Ok(()))
    }
}
