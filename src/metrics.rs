// src/metrics.rs

#[cfg(feature = "observability")]
use ::metrics::{describe_counter, describe_gauge, gauge, increment_counter};

// NOTE: When observability feature is disabled, the macros below only borrow their arguments
#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! gauge {
    ($name:expr, $value:expr $(, $label:expr => $label_value:expr)* $(,)?) => {{
        let _ = (&$name, &$value);
        $( let _ = (&$label, &$label_value); )*
    }};
}

#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! increment_counter {
    ($name:expr $(, $label:expr => $label_value:expr)* $(,)?) => {{
        let _ = &$name;
        $( let _ = (&$label, &$label_value); )*
    }};
}

#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! describe_counter {
    ($name:expr, $unit:expr, $desc:expr) => {{
        let _ = (&$name, &$unit, &$desc);
    }};
    ($name:expr, $desc:expr) => {{
        let _ = (&$name, &$desc);
    }};
}

#[cfg(not(feature = "observability"))]
#[macro_export]
macro_rules! describe_gauge {
    ($name:expr, $desc:expr) => {{
        let _ = (&$name, &$desc);
    }};
}

#[cfg(not(feature = "observability"))]
use crate::{describe_counter, describe_gauge, gauge, increment_counter};

/// Initializes the descriptions for all the metrics in the crate.
/// This should be called once at startup.
pub fn describe_metrics() {
    describe_counter!(
        "virtual_pool_snapshots_built_total",
        "Virtual pool snapshots built from a metadata batch."
    );
    describe_gauge!("virtual_pool_count", "Virtual pools listed by the current snapshot.");
    describe_gauge!(
        "virtual_pool_linear_pools_skipped",
        "Linear pools of the last batch that could not be attached to a phantom pool."
    );
    describe_counter!(
        "virtual_pool_swap_plans_total",
        "Swap plan compilations, labelled by result."
    );
    describe_counter!(
        "virtual_pool_liquidity_rejections_total",
        "Quote requests rejected by the liquidity gate."
    );
}

pub fn record_snapshot_built(virtual_pools: usize, skipped_linear_pools: usize) {
    increment_counter!("virtual_pool_snapshots_built_total");
    gauge!("virtual_pool_count", virtual_pools as f64);
    gauge!("virtual_pool_linear_pools_skipped", skipped_linear_pools as f64);
}

pub fn record_swap_plan(result: &'static str) {
    increment_counter!("virtual_pool_swap_plans_total", "result" => result);
}

pub fn record_liquidity_rejection() {
    increment_counter!("virtual_pool_liquidity_rejections_total");
}

/// Installs the Prometheus exporter on `addr`. Must run inside a tokio runtime.
#[cfg(feature = "observability")]
pub fn install_prometheus_exporter(addr: std::net::SocketAddr) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    describe_metrics();
    Ok(())
}
