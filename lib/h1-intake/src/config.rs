/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

const DEFAULT_REQ_HDR_MAX_SIZE: usize = 64 * 1024;
const DEFAULT_BODY_LINE_MAX_SIZE: usize = 8 * 1024;
const DEFAULT_BODY_DRAIN_READ_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HttpIntakeConfig {
    req_hdr_max_size: usize,
    body_line_max_size: usize,
    body_drain_read_timeout: Duration,
}

impl Default for HttpIntakeConfig {
    fn default() -> Self {
        HttpIntakeConfig {
            req_hdr_max_size: DEFAULT_REQ_HDR_MAX_SIZE,
            body_line_max_size: DEFAULT_BODY_LINE_MAX_SIZE,
            body_drain_read_timeout: DEFAULT_BODY_DRAIN_READ_TIMEOUT,
        }
    }
}

impl HttpIntakeConfig {
    /// Set the max size of the request line and all header lines together.
    pub fn set_req_hdr_max_size(&mut self, size: usize) {
        self.req_hdr_max_size = size;
    }

    #[inline]
    pub fn req_hdr_max_size(&self) -> usize {
        self.req_hdr_max_size
    }

    /// Set the max length of a chunk size line or a trailer line.
    pub fn set_body_line_max_size(&mut self, size: usize) {
        self.body_line_max_size = size;
    }

    #[inline]
    pub fn body_line_max_size(&self) -> usize {
        self.body_line_max_size
    }

    /// Set the timeout for each single read while draining a request body.
    pub fn set_body_drain_read_timeout(&mut self, timeout: Duration) {
        self.body_drain_read_timeout = timeout;
    }

    #[inline]
    pub fn body_drain_read_timeout(&self) -> Duration {
        self.body_drain_read_timeout
    }
}
