/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::future::Future;
use std::io;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::AsyncBufRead;

pub struct LimitedReadUntil<'a, R: ?Sized> {
    reader: &'a mut R,
    delimiter: u8,
    buf: &'a mut Vec<u8>,
    read: usize,
    limit: usize,
}

impl<'a, R> LimitedReadUntil<'a, R>
where
    R: AsyncBufRead + ?Sized + Unpin,
{
    pub(super) fn new(reader: &'a mut R, delimiter: u8, max_len: usize, buf: &'a mut Vec<u8>) -> Self {
        LimitedReadUntil {
            reader,
            delimiter,
            buf,
            read: 0,
            limit: max_len,
        }
    }
}

fn read_until_internal<R: AsyncBufRead + ?Sized>(
    mut reader: Pin<&mut R>,
    cx: &mut Context<'_>,
    delimiter: u8,
    buf: &mut Vec<u8>,
    read: &mut usize,
    limit: usize,
) -> Poll<io::Result<(bool, usize)>> {
    loop {
        let (done, used) = {
            let available = ready!(reader.as_mut().poll_fill_buf(cx))?;
            let left = limit - *read;
            let available = if available.len() > left {
                &available[..left]
            } else {
                available
            };
            if let Some(i) = memchr::memchr(delimiter, available) {
                buf.extend_from_slice(&available[..=i]);
                (true, i + 1)
            } else {
                buf.extend_from_slice(available);
                (false, available.len())
            }
        };
        reader.as_mut().consume(used);
        *read += used;
        if done {
            return Poll::Ready(Ok((true, mem::replace(read, 0))));
        }
        if used == 0 || *read >= limit {
            return Poll::Ready(Ok((false, mem::replace(read, 0))));
        }
    }
}

impl<R: AsyncBufRead + ?Sized + Unpin> Future for LimitedReadUntil<'_, R> {
    type Output = io::Result<(bool, usize)>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Self {
            reader,
            delimiter,
            buf,
            read,
            limit,
        } = &mut *self;
        read_until_internal(Pin::new(reader), cx, *delimiter, buf, read, *limit)
    }
}

#[cfg(test)]
mod tests {
    use super::super::LimitedBufReadExt;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn found() {
        let stream = tokio_test::io::Builder::new()
            .read(b"GET / HT")
            .read(b"TP/1.1\r\nHost: a\r\n")
            .build();
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        let (found, nr) = reader.limited_read_until(b'\n', 1024, &mut buf).await.unwrap();
        assert!(found);
        assert_eq!(nr, 16);
        assert_eq!(buf.as_slice(), b"GET / HTTP/1.1\r\n");

        buf.clear();
        let (found, nr) = reader.limited_read_until(b'\n', 1024, &mut buf).await.unwrap();
        assert!(found);
        assert_eq!(nr, 9);
        assert_eq!(buf.as_slice(), b"Host: a\r\n");
    }

    #[tokio::test]
    async fn limit_reached() {
        let stream = tokio_test::io::Builder::new().read(b"0123456789\n").build();
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        let (found, nr) = reader.limited_read_until(b'\n', 4, &mut buf).await.unwrap();
        assert!(!found);
        assert_eq!(nr, 4);
        assert_eq!(buf.as_slice(), b"0123");

        buf.clear();
        let (found, nr) = reader.limited_read_until(b'\n', 16, &mut buf).await.unwrap();
        assert!(found);
        assert_eq!(nr, 7);
    }

    #[tokio::test]
    async fn closed() {
        let stream = tokio_test::io::Builder::new().read(b"abc").build();
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        let (found, nr) = reader.limited_read_until(b'\n', 16, &mut buf).await.unwrap();
        assert!(!found);
        assert_eq!(nr, 3);

        buf.clear();
        let (found, nr) = reader.limited_read_until(b'\n', 16, &mut buf).await.unwrap();
        assert!(!found);
        assert_eq!(nr, 0);
    }
}
