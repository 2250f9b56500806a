/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod name;
pub use name::HttpOriginalHeaderName;

mod value;
pub use value::HttpHeaderValue;

mod map;
pub use map::HttpHeaderMap;

mod accept;
pub use accept::{split_accept_languages, split_quoted_list};

mod auth;
pub use auth::{HttpAuth, HttpAuthParseError, HttpBasicAuth};

mod connection;
pub use connection::connection_keep_alive;

mod content;
pub use content::{content_type_charset, resolve_charset};

mod cookie;
pub use cookie::{HttpCookie, parse_cookie_header};

mod upgrade;
pub use upgrade::upgrade_has_protocol;

pub const fn continue_as_bytes() -> &'static [u8] {
    b"HTTP/1.1 100 Continue\r\n\r\n"
}
