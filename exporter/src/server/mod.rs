//! Metrics endpoint

use crate::metrics::GaugeSet;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::error;

/// Router serving the gauges at `metrics_path` and a landing page at `/`
pub fn build_router(gauges: GaugeSet, metrics_path: &str) -> Router {
    let router = Router::new()
        .route(metrics_path, get(metrics))
        .with_state(gauges);

    if metrics_path == "/" {
        return router;
    }

    let page = landing_page(metrics_path);
    router.route("/", get(move || async move { Html(page) }))
}

/// GET <metrics_path>
async fn metrics(State(gauges): State<GaugeSet>) -> Response {
    match gauges.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn landing_page(metrics_path: &str) -> String {
    format!(
        "<html>\n<head><title>Speedtest Exporter</title></head>\n<body>\n\
         <h1>Speedtest Exporter</h1>\n<p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n</html>\n",
        path = metrics_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use protocol::{parse, Outcome, MOCK_RESPONSE};
    use tower::ServiceExt;

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_metrics_endpoint_serves_gauges() {
        let gauges = GaugeSet::new().unwrap();
        let Outcome::Success(result) = parse(MOCK_RESPONSE).unwrap() else {
            panic!("mock response must parse as a result");
        };
        gauges.publish(&result);

        let (status, body) = get_body(build_router(gauges, "/metrics"), "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("# TYPE speedtest_ping_latency gauge"));
        assert!(body.contains("speedtest_ping_latency 3.222"));
        assert!(body.contains("speedtest_download_bandwidth 53038114"));
    }

    #[tokio::test]
    async fn test_custom_metrics_path() {
        let router = build_router(GaugeSet::new().unwrap(), "/probe");

        let (status, body) = get_body(router.clone(), "/probe").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("speedtest_upload_bytes 0"));

        let (status, _) = get_body(router, "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_landing_page_links_metrics() {
        let router = build_router(GaugeSet::new().unwrap(), "/metrics");
        let (status, body) = get_body(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<a href=\"/metrics\">"));
    }
}
