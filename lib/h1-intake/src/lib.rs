/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod config;
pub use config::HttpIntakeConfig;

mod connection;
pub use connection::{HttpClientConnection, HttpConnectionInfo, HttpServerConnection};

mod version;
pub use version::HttpVersion;

mod trace;
pub use trace::generate_trace_id;

pub mod body;
pub mod header;
pub mod io;
pub mod parse;
pub mod server;

pub use body::{HttpBodyType, HttpRequestBody};
pub use server::{HttpRequestParseError, HttpRequestRecvError, HttpServerRequest};
