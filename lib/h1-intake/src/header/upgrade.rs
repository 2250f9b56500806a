/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Check whether an Upgrade header value offers `protocol`.
///
/// Tokens are compared case-insensitively, and a `/version` suffix on a token
/// is ignored unless `protocol` carries a version itself.
pub fn upgrade_has_protocol(value: &str, protocol: &str) -> bool {
    let protocol = protocol.trim();
    if protocol.is_empty() {
        return false;
    }
    let with_version = protocol.contains('/');

    value.split(',').map(str::trim).any(|token| {
        if with_version {
            return token.eq_ignore_ascii_case(protocol);
        }
        let name = match token.split_once('/') {
            Some((name, _)) => name,
            None => token,
        };
        name.eq_ignore_ascii_case(protocol)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn websocket() {
        assert!(upgrade_has_protocol("websocket", "websocket"));
        assert!(upgrade_has_protocol("WebSocket", "websocket"));
        assert!(upgrade_has_protocol("h2c, websocket", "websocket"));
        assert!(!upgrade_has_protocol("h2c", "websocket"));
        assert!(!upgrade_has_protocol("websockets", "websocket"));
    }

    #[test]
    fn versioned() {
        assert!(upgrade_has_protocol("HTTP/2.0, SHTTP/1.3", "http"));
        assert!(upgrade_has_protocol("HTTP/2.0, SHTTP/1.3", "shttp/1.3"));
        assert!(!upgrade_has_protocol("HTTP/2.0", "http/1.1"));
        assert!(!upgrade_has_protocol("websocket", ""));
    }
}
