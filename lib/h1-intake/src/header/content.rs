/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use encoding_rs::Encoding;
use mime::Mime;

/// Get the charset parameter of a Content-Type value.
///
/// If the value is not a valid media type, the `;` separated fields are
/// still searched for a `charset=` parameter.
pub fn content_type_charset(value: &str) -> Option<String> {
    match Mime::from_str(value) {
        Ok(mime) => mime
            .get_param(mime::CHARSET)
            .map(|v| v.as_str().trim_matches('"').to_string()),
        Err(_) => value.split(';').find_map(|field| {
            let (name, v) = field.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                Some(v.trim().trim_matches('"').to_string())
            } else {
                None
            }
        }),
    }
}

pub fn resolve_charset(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}
