use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Encoder, Histogram,
    IntCounterVec, IntGauge, TextEncoder,
};

pub static CYCLES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "showcase_cycles_total",
        "Showcase render cycles grouped by outcome",
        &["outcome"]
    )
    .expect("showcase cycles total")
});

pub static CACHE_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "showcase_cache_lookups_total",
        "Repository cache lookups grouped by result",
        &["result"]
    )
    .expect("showcase cache lookups")
});

pub static FETCH_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "showcase_fetch_requests_total",
        "Repository list fetches grouped by outcome",
        &["outcome"]
    )
    .expect("showcase fetch requests")
});

pub static FETCH_LATENCY_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "showcase_fetch_latency_seconds",
        "Latency of repository list fetches"
    )
    .expect("showcase fetch latency")
});

pub static GRID_CARDS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "showcase_grid_cards",
        "Cards rendered into the grid by the most recent cycle"
    )
    .expect("showcase grid cards")
});

pub static LAST_RENDER_TIMESTAMP: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "showcase_last_render_timestamp_seconds",
        "Unix timestamp of the most recent successful render"
    )
    .expect("showcase last render timestamp")
});

/// Prometheus text exposition of the default registry.
pub fn encode_text() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
