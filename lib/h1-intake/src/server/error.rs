/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use http::StatusCode;
use thiserror::Error;

use crate::HttpVersion;
use crate::parse::HttpLineParseError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpRequestParseError {
    #[error("invalid method line: {0}")]
    InvalidMethodLine(HttpLineParseError),
    #[error("invalid header field: {0}")]
    InvalidHeaderField(HttpLineParseError),
    #[error("invalid header name")]
    InvalidHeaderName,
    #[error("invalid value for header {0}")]
    InvalidHeaderValue(String),
    #[error("invalid content length")]
    InvalidContentLength,
    #[error("unsupported content type charset {0}")]
    InvalidContentType(String),
    #[error("invalid referer")]
    InvalidReferer,
    #[error("missed host header")]
    MissedHost,
    #[error("invalid request url")]
    InvalidRequestUrl,
    #[error("transfer-encoding is not allowed in {0}")]
    TransferEncodingNotAllowed(HttpVersion),
    #[error("unsupported transfer-encoding {0}")]
    UnsupportedTransferEncoding(String),
    #[error("missed content length")]
    MissedContentLength,
    #[error("invalid expect header")]
    InvalidExpect,
}

impl HttpRequestParseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpRequestParseError::UnsupportedTransferEncoding(_) => StatusCode::NOT_IMPLEMENTED,
            HttpRequestParseError::MissedContentLength => StatusCode::LENGTH_REQUIRED,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Error)]
pub enum HttpRequestRecvError {
    #[error("client closed")]
    ClientClosed,
    #[error("too large header, should be less than {0}")]
    TooLargeHeader(usize),
    #[error("io failed: {0:?}")]
    IoFailed(#[from] io::Error),
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] HttpRequestParseError),
}

impl HttpRequestRecvError {
    /// The status code of the error response, if one should be sent.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            HttpRequestRecvError::ClientClosed | HttpRequestRecvError::IoFailed(_) => None,
            HttpRequestRecvError::TooLargeHeader(_) => {
                Some(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE)
            }
            HttpRequestRecvError::InvalidRequest(e) => Some(e.status_code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status() {
        assert_eq!(
            HttpRequestParseError::UnsupportedTransferEncoding("gzip".to_string()).status_code(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            HttpRequestParseError::MissedContentLength.status_code(),
            StatusCode::LENGTH_REQUIRED
        );
        assert_eq!(
            HttpRequestParseError::MissedHost.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HttpRequestParseError::InvalidMethodLine(HttpLineParseError::InvalidVersion)
                .status_code(),
            StatusCode::BAD_REQUEST
        );

        assert_eq!(HttpRequestRecvError::ClientClosed.status_code(), None);
        assert_eq!(
            HttpRequestRecvError::TooLargeHeader(1024).status_code(),
            Some(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE)
        );
        assert_eq!(
            HttpRequestRecvError::from(HttpRequestParseError::MissedContentLength).status_code(),
            Some(StatusCode::LENGTH_REQUIRED)
        );
    }
}
