// src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

pub static FETCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gmx_funding_fetches_total", "Funding source fetches", &["outcome"] // ok|error
    ).unwrap()
});

pub static PARSE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gmx_funding_parse_failures_total", "Funding responses rejected as malformed"
    ).unwrap()
});

pub static RECORDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gmx_funding_records_total", "Opportunity records emitted", &["side"] // long|short
    ).unwrap()
});

/// Text exposition of everything registered in the default registry.
pub fn gather_text() -> String {
    use prometheus::Encoder;
    let mut buf = Vec::new();
    if let Err(e) = prometheus::TextEncoder::new().encode(&prometheus::gather(), &mut buf) {
        tracing::warn!("metrics encode failed: {e:?}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}
