/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::Utf8Error;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpLineParseError {
    #[error("invalid utf-8 encoding: {0}")]
    InvalidUtf8Encoding(#[from] Utf8Error),
    #[error("no delimiter '{0}' found")]
    NoDelimiterFound(char),
    #[error("expected 3 fields but found {0}")]
    InvalidFieldCount(usize),
    #[error("invalid method")]
    InvalidMethod,
    #[error("empty request target")]
    EmptyRequestTarget,
    #[error("header field starts with ':'")]
    LeadingColon,
    #[error("invalid header name")]
    InvalidHeaderName,
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid chunk size")]
    InvalidChunkSize,
}
