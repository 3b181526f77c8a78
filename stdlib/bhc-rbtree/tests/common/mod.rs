//! Shared helpers for the integration tests.

#![allow(dead_code)]

use bhc_rbtree::{OrdMap, OrdSet};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness. Set `RUST_LOG=trace`
/// to see the bulk-operation events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn entries(m: &OrdMap<i32, i32>) -> Vec<(i32, i32)> {
    m.iter().map(|(k, v)| (*k, *v)).collect()
}

pub fn elements(s: &OrdSet<i32>) -> Vec<i32> {
    s.iter().copied().collect()
}

pub fn map_of(pairs: &[(i32, i32)]) -> OrdMap<i32, i32> {
    OrdMap::from_entries(pairs.iter().copied())
}
