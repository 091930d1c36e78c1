pub mod api;
pub mod ui;

use axum::{Router, routing::get};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::handle_dashboard))
        .route("/api/health", get(api::handle_health))
        .route("/api/metrics", get(api::handle_metrics))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ClusterReader;
    use crate::clients::aggregator::fixtures::{node, pod, service};
    use crate::config::Config;
    use crate::error::{AppError, Result};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use k8s_openapi::api::core::v1::{Node, Pod, Service};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Default)]
    struct FakeReader {
        pods: Vec<Pod>,
        services: Vec<Service>,
        nodes: Vec<Node>,
        failure: Option<String>,
    }

    impl FakeReader {
        fn failing(msg: &str) -> Self {
            Self {
                failure: Some(msg.to_string()),
                ..Default::default()
            }
        }

        fn check(&self) -> Result<()> {
            match &self.failure {
                Some(msg) => Err(AppError::ClusterUnavailable(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ClusterReader for FakeReader {
        async fn list_pods(&self) -> Result<Vec<Pod>> {
            self.check()?;
            Ok(self.pods.clone())
        }

        async fn list_services(&self) -> Result<Vec<Service>> {
            self.check()?;
            Ok(self.services.clone())
        }

        async fn list_nodes(&self) -> Result<Vec<Node>> {
            self.check()?;
            Ok(self.nodes.clone())
        }

        async fn probe(&self) -> Result<()> {
            self.check()
        }
    }

    fn router(reader: FakeReader) -> Router {
        build_router(AppState {
            reader: Arc::new(reader),
            config: Arc::new(Config::default()),
        })
    }

    fn populated() -> FakeReader {
        FakeReader {
            pods: vec![
                pod("a", "Running", &[0]),
                pod("b", "Running", &[2]),
                pod("c", "Failed", &[5]),
            ],
            services: vec![
                service("web", Some("LoadBalancer"), &[80]),
                service("db", Some("ClusterIP"), &[5432]),
            ],
            nodes: vec![node("n1", Some("True")), node("n2", Some("False"))],
            failure: None,
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = get_json(router(FakeReader::default()), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn health_failure_keeps_200() {
        let app = router(FakeReader::failing("connection refused"));
        let (status, body) = get_json(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "status": "unhealthy", "error": "connection refused" })
        );
    }

    #[tokio::test]
    async fn metrics_nested_counts() {
        let (status, body) = get_json(router(populated()), "/api/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "pods": {
                    "total": 3,
                    "status": { "Running": 2, "Pending": 0, "Failed": 1, "Unknown": 0 }
                },
                "services": {
                    "total": 2,
                    "types": { "LoadBalancer": 1, "ClusterIP": 1 }
                },
                "nodes": { "ready": 1, "not_ready": 1 }
            })
        );
    }

    #[tokio::test]
    async fn metrics_empty_cluster() {
        let (_, body) = get_json(router(FakeReader::default()), "/api/metrics").await;
        assert_eq!(body["pods"]["total"], 0);
        assert_eq!(body["pods"]["status"]["Running"], 0);
        assert_eq!(body["services"]["types"], json!({}));
        assert_eq!(body["nodes"], json!({ "ready": 0, "not_ready": 0 }));
    }

    #[tokio::test]
    async fn metrics_failure_is_error_body_with_200() {
        let app = router(FakeReader::failing("Unauthorized"));
        let (status, body) = get_json(app, "/api/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn dashboard_renders_html() {
        let (status, body) = get(router(populated()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("kubernetes cluster dashboard"));
        assert!(body.contains("66%"));
        assert!(body.contains("LoadBalancer"));
    }

    #[tokio::test]
    async fn dashboard_failure_is_server_error() {
        let (status, _) = get(router(FakeReader::failing("timed out")), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _) = get(router(FakeReader::default()), "/api/pods").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
