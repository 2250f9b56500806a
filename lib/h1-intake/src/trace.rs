/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use uuid::{ContextV1, Timestamp, Uuid};

static UUID_CONTEXT: OnceLock<ContextV1> = OnceLock::new();
static UUID_NODE_ID: OnceLock<[u8; 6]> = OnceLock::new();

pub fn generate_trace_id(time: &DateTime<Utc>) -> Uuid {
    let context = UUID_CONTEXT.get_or_init(|| ContextV1::new(rand::random()));
    let node_id = UUID_NODE_ID.get_or_init(rand::random);

    let ts = Timestamp::from_unix(
        context,
        time.timestamp() as u64,
        time.timestamp_subsec_nanos().min(999_999_999), // ignore leap second
    );
    Uuid::new_v1(ts, node_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique() {
        let now = Utc::now();
        let a = generate_trace_id(&now);
        let b = generate_trace_id(&now);
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 1);
    }
}
