/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod chunked_decoder;
pub use chunked_decoder::ChunkedDecodeReader;

mod decoder;
pub use decoder::HttpBodyDecodeReader;

mod request;
pub use request::{HttpRequestBody, HttpRequestBodyStream};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpBodyType {
    ContentLength(u64),
    Chunked,
}
