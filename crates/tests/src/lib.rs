//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 配置到路由的完整链路测试
//! - HTTP 投递与失败隔离测试（一次性 axum 接收端）
//! - 结果与输入顺序无关性的验证

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::FALLBACK_STRATEGY;
    }
}

#[cfg(test)]
mod support {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;

    /// Payloads received by the throwaway hook server
    pub type Received = Arc<Mutex<Vec<Value>>>;

    /// Spawn a single-route receiver answering `status` for POST /hook
    pub async fn spawn_hook_server(status: StatusCode) -> (SocketAddr, Received) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let state = (received.clone(), status);

        async fn hook(
            State((received, status)): State<(Received, StatusCode)>,
            Json(body): Json<Value>,
        ) -> StatusCode {
            received.lock().unwrap().push(body);
            status
        }

        let app = Router::new().route("/hook", post(hook)).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (addr, received)
    }

    /// A localhost port nothing listens on
    pub fn dead_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::BTreeMap;
    use std::time::{Duration, Instant};

    use axum::http::StatusCode;
    use serde_json::json;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{Destination, EventRequest, HttpMethod, RoutingIntent, Transport};
    use dispatcher::{DispatchConfig, TransportDispatcher};
    use registry::{MemoryAuditSink, MemoryRegistry};
    use router::EventRouter;

    use crate::support::{dead_port, spawn_hook_server};

    fn router_for(
        registry: MemoryRegistry,
        audit: MemoryAuditSink,
        timeout: Duration,
    ) -> EventRouter<MemoryRegistry, MemoryAuditSink> {
        let dispatcher = TransportDispatcher::new(DispatchConfig { timeout }).unwrap();
        EventRouter::new(registry, audit, dispatcher)
    }

    fn request(strategy: &str, intents: Vec<RoutingIntent>) -> EventRequest {
        EventRequest {
            payload: json!({"event": "signup", "user": 42}),
            routing_intents: intents,
            strategy: Some(strategy.to_string()),
        }
    }

    fn http_destination(name: &str, port: u16) -> Destination {
        Destination::new(
            name,
            Transport::Http {
                method: HttpMethod::Post,
                url: format!("http://127.0.0.1:{port}/hook"),
            },
        )
    }

    /// End-to-end: TOML config -> registry -> router -> outcome map
    #[tokio::test]
    async fn test_e2e_from_config() {
        let content = r#"
[[destinations]]
name = "d1"
transport = "log.info"

[[destinations]]
name = "d2"
transport = "log.warn"

[settings]
default_strategy = "IMPORTANT"
"#;
        let blueprint = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap();
        let registry = MemoryRegistry::from_blueprint(&blueprint);
        let audit = MemoryAuditSink::new();
        let router = router_for(registry, audit.clone(), Duration::from_secs(1));

        // No explicit strategy - the configured default (IMPORTANT) applies
        let outcome = router
            .route(EventRequest {
                payload: json!({}),
                routing_intents: vec![
                    RoutingIntent::new("d1", true, 10),
                    RoutingIntent::new("d2", false, 10),
                ],
                strategy: None,
            })
            .await
            .unwrap();

        let expected: BTreeMap<String, bool> =
            [("d1".to_string(), true), ("d2".to_string(), false)].into();
        assert_eq!(outcome.selected_map(), expected);
        assert_eq!(audit.len(), 1);
    }

    /// HTTP delivery actually reaches the destination with the payload body
    #[tokio::test]
    async fn test_http_delivery_carries_payload() {
        let (addr, received) = spawn_hook_server(StatusCode::OK).await;

        let registry = MemoryRegistry::new();
        registry.upsert(http_destination("hook", addr.port())).await;
        let router = router_for(registry, MemoryAuditSink::new(), Duration::from_secs(2));

        let outcome = router
            .route(request("ALL", vec![RoutingIntent::new("hook", true, 10)]))
            .await
            .unwrap();

        assert_eq!(outcome.outcomes["hook"].delivered, Some(true));
        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0], json!({"event": "signup", "user": 42}));
    }

    /// One failing destination must not prevent the others from dispatching
    #[tokio::test]
    async fn test_failure_isolation_across_destinations() {
        let (ok_addr, ok_received) = spawn_hook_server(StatusCode::OK).await;
        let (err_addr, _) = spawn_hook_server(StatusCode::INTERNAL_SERVER_ERROR).await;

        let registry = MemoryRegistry::new();
        registry.upsert(http_destination("dead", dead_port())).await;
        registry
            .upsert(http_destination("failing", err_addr.port()))
            .await;
        registry.upsert(http_destination("healthy", ok_addr.port())).await;

        let router = router_for(registry, MemoryAuditSink::new(), Duration::from_secs(2));

        let outcome = router
            .route(request(
                "ALL",
                vec![
                    RoutingIntent::new("dead", true, 10),
                    RoutingIntent::new("failing", true, 10),
                    RoutingIntent::new("healthy", true, 10),
                ],
            ))
            .await
            .unwrap();

        // Selection drives the legacy booleans for all three
        assert!(outcome.selected_map().values().all(|v| *v));

        // Delivery reality differs per destination
        assert_eq!(outcome.outcomes["dead"].delivered, Some(false));
        assert_eq!(outcome.outcomes["failing"].delivered, Some(false));
        assert_eq!(outcome.outcomes["healthy"].delivered, Some(true));

        // The healthy destination was reached exactly once
        assert_eq!(ok_received.lock().unwrap().len(), 1);
    }

    /// A slow destination is bounded by the dispatch timeout
    #[tokio::test]
    async fn test_slow_destination_is_bounded_by_timeout() {
        use axum::routing::post;
        use axum::Router;

        async fn slow_hook() -> StatusCode {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }

        let app = Router::new().route("/hook", post(slow_hook));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let registry = MemoryRegistry::new();
        registry.upsert(http_destination("slow", addr.port())).await;
        registry
            .upsert(Destination::new(
                "after",
                Transport::Log {
                    level: contracts::LogLevel::Info,
                },
            ))
            .await;

        let router = router_for(registry, MemoryAuditSink::new(), Duration::from_millis(250));

        let started = Instant::now();
        let outcome = router
            .route(request(
                "ALL",
                vec![
                    RoutingIntent::new("slow", true, 10),
                    RoutingIntent::new("after", true, 10),
                ],
            ))
            .await
            .unwrap();

        assert!(
            started.elapsed() < Duration::from_secs(3),
            "request stalled on a slow destination: {:?}",
            started.elapsed()
        );
        assert_eq!(outcome.outcomes["slow"].delivered, Some(false));
        assert_eq!(outcome.outcomes["after"].delivered, Some(true));
    }

    /// Outcome map contents do not depend on intent order
    #[tokio::test]
    async fn test_outcome_map_order_independence() {
        let (addr, _) = spawn_hook_server(StatusCode::OK).await;

        let registry = MemoryRegistry::new();
        registry.upsert(http_destination("h1", addr.port())).await;
        registry
            .upsert(Destination::new(
                "l1",
                Transport::Log {
                    level: contracts::LogLevel::Debug,
                },
            ))
            .await;

        let router = router_for(registry, MemoryAuditSink::new(), Duration::from_secs(2));

        let intents = vec![
            RoutingIntent::new("h1", false, 100),
            RoutingIntent::new("l1", true, 5000),
            RoutingIntent::new("missing", true, 1),
        ];
        let mut permuted = intents.clone();
        permuted.rotate_left(1);

        let first = router
            .route(request("SMALL", intents))
            .await
            .unwrap();
        let second = router
            .route(request("SMALL", permuted))
            .await
            .unwrap();

        assert_eq!(first.outcomes, second.outcomes);
        // SMALL admits only h1 (100 < 1024); missing stays unknown
        assert_eq!(first.outcomes["h1"].selected, true);
        assert_eq!(first.outcomes["l1"].selected, false);
        assert_eq!(first.outcomes["missing"].selected, false);
    }

    /// Malformed request: validation failure, no audit record, no dispatch
    #[tokio::test]
    async fn test_malformed_request_short_circuits() {
        let (addr, received) = spawn_hook_server(StatusCode::OK).await;

        let registry = MemoryRegistry::new();
        registry.upsert(http_destination("hook", addr.port())).await;
        let audit = MemoryAuditSink::new();
        let router = router_for(registry, audit.clone(), Duration::from_secs(2));

        let result = router
            .route(request("ALL", vec![RoutingIntent::new("", true, 10)]))
            .await;

        assert!(matches!(
            result,
            Err(contracts::RelayError::Validation { .. })
        ));
        assert!(audit.is_empty());
        assert!(received.lock().unwrap().is_empty());
    }
}
