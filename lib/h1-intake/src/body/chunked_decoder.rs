/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::BufMut;
use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

use crate::parse::HttpChunkedLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChunkedDecodeState {
    ChunkSizeLine,
    ChunkData(u64),
    ChunkDataEnd,
    Trailer,
    Finished,
}

struct ChunkedDecodeReaderInternal {
    body_line_max_size: usize,
    line: Vec<u8>,
    state: ChunkedDecodeState,
    /// error found after some data has been returned in the same read
    delayed_error: Option<io::Error>,
}

impl ChunkedDecodeReaderInternal {
    fn new(body_line_max_size: usize) -> Self {
        ChunkedDecodeReaderInternal {
            body_line_max_size,
            line: Vec::with_capacity(32),
            state: ChunkedDecodeState::ChunkSizeLine,
            delayed_error: None,
        }
    }

    /// Fill `self.line` until a LF is found, the LF included.
    fn poll_line<R>(&mut self, cx: &mut Context<'_>, mut reader: Pin<&mut R>) -> Poll<io::Result<()>>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            let r_buf = ready!(reader.as_mut().poll_fill_buf(cx))?;
            if r_buf.is_empty() {
                return Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "reader closed while reading chunk line",
                )));
            }

            let (len, found) = match memchr::memchr(b'\n', r_buf) {
                Some(p) => (p + 1, true),
                None => (r_buf.len(), false),
            };
            if self.line.len() + len > self.body_line_max_size {
                return Poll::Ready(Err(io::Error::other(format!(
                    "chunk line too long (> {})",
                    self.body_line_max_size
                ))));
            }
            self.line.put_slice(&r_buf[..len]);
            reader.as_mut().consume(len);
            if found {
                return Poll::Ready(Ok(()));
            }
        }
    }

    fn line_is_empty(&self) -> bool {
        matches!(self.line.as_slice(), b"\r\n" | b"\n")
    }

    fn poll_decode<R>(
        &mut self,
        cx: &mut Context<'_>,
        mut reader: Pin<&mut R>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            match self.state {
                ChunkedDecodeState::ChunkSizeLine => {
                    ready!(self.poll_line(cx, reader.as_mut()))?;
                    let chunk_size = HttpChunkedLine::parse(&self.line)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
                        .chunk_size;
                    self.line.clear();
                    if chunk_size == 0 {
                        self.state = ChunkedDecodeState::Trailer;
                    } else {
                        self.state = ChunkedDecodeState::ChunkData(chunk_size);
                    }
                }
                ChunkedDecodeState::ChunkData(left) => {
                    let buf_remaining = buf.remaining();
                    if buf_remaining == 0 {
                        return Poll::Ready(Ok(()));
                    }

                    let to_read = usize::try_from(left)
                        .unwrap_or(usize::MAX)
                        .min(buf_remaining);
                    let mut new_buf = ReadBuf::new(buf.initialize_unfilled_to(to_read));
                    ready!(reader.as_mut().poll_read(cx, &mut new_buf))?;
                    let nr = new_buf.filled().len();
                    if nr == 0 {
                        return Poll::Ready(Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "reader closed while reading chunk data",
                        )));
                    }
                    buf.advance(nr);
                    let left = left - nr as u64;
                    if left == 0 {
                        self.state = ChunkedDecodeState::ChunkDataEnd;
                    } else {
                        self.state = ChunkedDecodeState::ChunkData(left);
                    }
                }
                ChunkedDecodeState::ChunkDataEnd => {
                    ready!(self.poll_line(cx, reader.as_mut()))?;
                    if !self.line_is_empty() {
                        return Poll::Ready(Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "no line ending found after chunk data",
                        )));
                    }
                    self.line.clear();
                    self.state = ChunkedDecodeState::ChunkSizeLine;
                }
                ChunkedDecodeState::Trailer => {
                    ready!(self.poll_line(cx, reader.as_mut()))?;
                    // trailer fields are not forwarded
                    if self.line_is_empty() {
                        self.state = ChunkedDecodeState::Finished;
                    }
                    self.line.clear();
                }
                ChunkedDecodeState::Finished => return Poll::Ready(Ok(())),
            }
        }
    }
}

/// Decode a chunked body, discarding chunk extensions and trailer fields.
pub struct ChunkedDecodeReader<R> {
    reader: R,
    internal: ChunkedDecodeReaderInternal,
}

impl<R> ChunkedDecodeReader<R> {
    pub fn new(reader: R, body_line_max_size: usize) -> Self {
        ChunkedDecodeReader {
            reader,
            internal: ChunkedDecodeReaderInternal::new(body_line_max_size),
        }
    }

    pub fn finished(&self) -> bool {
        self.internal.state == ChunkedDecodeState::Finished
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}

impl<R> AsyncRead for ChunkedDecodeReader<R>
where
    R: AsyncBufRead + Unpin,
{
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let me = &mut *self;
        if let Some(e) = me.internal.delayed_error.take() {
            return Poll::Ready(Err(e));
        }

        let old_remaining = buf.remaining();
        match me.internal.poll_decode(cx, Pin::new(&mut me.reader), buf) {
            Poll::Pending => {
                if old_remaining > buf.remaining() {
                    Poll::Ready(Ok(()))
                } else {
                    Poll::Pending
                }
            }
            Poll::Ready(Err(e)) if old_remaining > buf.remaining() => {
                me.internal.delayed_error = Some(e);
                Poll::Ready(Ok(()))
            }
            Poll::Ready(r) => Poll::Ready(r),
        }
    }
}
