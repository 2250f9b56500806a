/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Check the persistence options in a Connection header value.
///
/// Returns `Some(false)` if `close` is present, `Some(true)` if `keep-alive`
/// is present, and `None` if neither is found.
pub fn connection_keep_alive(value: &str) -> Option<bool> {
    let mut keep_alive = None;
    for v in value.split(',') {
        let v = v.trim();
        if v.eq_ignore_ascii_case("close") {
            return Some(false);
        } else if v.eq_ignore_ascii_case("keep-alive") {
            keep_alive = Some(true);
        }
    }
    keep_alive
}
