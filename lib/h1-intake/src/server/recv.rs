/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use log::debug;

use super::{HttpRequestRecvError, HttpServerRequest};
use crate::io::LimitedBufReadExt;
use crate::{HttpIntakeConfig, HttpServerConnection};

fn is_empty_line(line_buf: &[u8]) -> bool {
    matches!(line_buf, b"\n" | b"\r\n")
}

async fn read_line<C>(
    conn: &mut C,
    line_buf: &mut Vec<u8>,
    header_size: &mut usize,
    max_header_size: usize,
) -> Result<(), HttpRequestRecvError>
where
    C: HttpServerConnection,
{
    if *header_size >= max_header_size {
        return Err(HttpRequestRecvError::TooLargeHeader(max_header_size));
    }
    line_buf.clear();
    let max_len = max_header_size - *header_size;
    let (found, nr) = conn
        .reader()
        .limited_read_until(b'\n', max_len, line_buf)
        .await?;
    if nr == 0 {
        return Err(HttpRequestRecvError::ClientClosed);
    }
    if !found {
        return if nr < max_len {
            Err(HttpRequestRecvError::ClientClosed)
        } else {
            Err(HttpRequestRecvError::TooLargeHeader(max_header_size))
        };
    }
    *header_size += nr;
    Ok(())
}

impl HttpServerRequest {
    /// Receive the request head from the connection.
    ///
    /// All header lines are read even if some of them are invalid, and the
    /// first failure is returned after that.
    pub async fn recv<C>(conn: &mut C, config: &HttpIntakeConfig) -> Result<Self, HttpRequestRecvError>
    where
        C: HttpServerConnection,
    {
        let max_header_size = config.req_hdr_max_size();
        let mut line_buf = Vec::<u8>::with_capacity(1024);
        let mut header_size: usize = 0;

        // empty lines before the request line should be ignored, see rfc9112 Section 2.2
        loop {
            read_line(conn, &mut line_buf, &mut header_size, max_header_size).await?;
            if !is_empty_line(&line_buf) {
                break;
            }
        }

        let mut req = HttpServerRequest::parse_request_line(&line_buf, *conn.info())?;

        loop {
            read_line(conn, &mut line_buf, &mut header_size, max_header_size).await?;
            if is_empty_line(&line_buf) {
                // header end line
                break;
            }
            // recorded in req, and returned by finish
            let _ = req.ingest_header_line(&line_buf);
        }

        if let Err(e) = req.finish(conn.writer()).await {
            debug!(
                "[{}] {} {} rejected: {e}",
                req.trace_id(),
                req.method(),
                req.raw_url()
            );
            return Err(e);
        }
        Ok(req)
    }
}
