//! 路由指标收集模块
//!
//! 基于 RouteOutcome 收集每次请求的路由与分发指标。

use contracts::RouteOutcome;
use metrics::{counter, gauge, histogram};

/// 从 RouteOutcome 记录指标
///
/// 每次请求路由完成后调用此函数来记录指标。
pub fn record_route_outcome(strategy: &str, outcome: &RouteOutcome) {
    // 请求计数器
    counter!("event_relay_requests_total", "strategy" => strategy.to_string()).increment(1);

    let selected = outcome.outcomes.values().filter(|o| o.selected).count();
    let skipped = outcome.outcomes.len() - selected;
    let failed_deliveries = outcome
        .outcomes
        .values()
        .filter(|o| o.delivered == Some(false))
        .count();

    gauge!("event_relay_last_request_destinations").set(outcome.outcomes.len() as f64);
    counter!("event_relay_destinations_selected_total").increment(selected as u64);
    counter!("event_relay_destinations_skipped_total").increment(skipped as u64);

    if failed_deliveries > 0 {
        counter!("event_relay_deliveries_failed_total").increment(failed_deliveries as u64);
    }
}

/// 记录单个目的地的投递结果
pub fn record_delivery(destination: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "event_relay_deliveries_total",
        "destination" => destination.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// 记录请求端到端延迟
pub fn record_route_latency_ms(latency_ms: f64) {
    histogram!("event_relay_route_latency_ms").record(latency_ms);
}
