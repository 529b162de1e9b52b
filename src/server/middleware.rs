// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use crate::config::CorsConfig;
use crate::error::ApiError;
use crate::metrics;
use axum::body::HttpBody;
use axum::extract::{ConnectInfo, MatchedPath, Request};
use axum::http::header::{CONTENT_LENGTH, REFERER, USER_AGENT};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use std::any::Any;
use std::net::{IpAddr, SocketAddr};
use std::time::Instant;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// Hardening headers added to every response unless a handler set them.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'self';base-uri 'self';font-src 'self' https: data:;form-action 'self';\
         frame-ancestors 'self';img-src 'self' data:;object-src 'none';script-src 'self';\
         script-src-attr 'none';style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests",
    ),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

pub fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SECURITY_HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

/// CORS with credentials. A wildcard configuration mirrors the caller's
/// origin, since browsers refuse a literal `*` on credentialed requests.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = match config.origins() {
        None => AllowOrigin::mirror_request(),
        Some(origins) => AllowOrigin::list(origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| warn!("Ignoring invalid CORS origin: {}", origin))
                .ok()
        })),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Peer address, present when the server runs with connect info.
pub fn peer_ip(request: &Request) -> Option<IpAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// Emits one Apache combined-format line per request under the
/// `access_log` target.
pub async fn access_log(request: Request, next: Next) -> Response {
    let remote = peer_ip(&request)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "-".to_string());
    let request_line = format!(
        "{} {} {:?}",
        request.method(),
        request.uri(),
        request.version()
    );
    let referer = header_or_dash(&request, REFERER);
    let user_agent = header_or_dash(&request, USER_AGENT);

    let response = next.run(request).await;

    // Content-Length is usually filled in by hyper later; fall back to the body's exact size.
    let bytes = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| response.body().size_hint().exact().map(|n| n.to_string()))
        .unwrap_or_else(|| "-".to_string());

    info!(
        target: "access_log",
        "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
        remote,
        Utc::now().format("%d/%b/%Y:%H:%M:%S %z"),
        request_line,
        response.status().as_u16(),
        bytes,
        referer,
        user_agent
    );

    response
}

fn header_or_dash(request: &Request, name: HeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

/// Records request count and latency per matched route.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = method_label(request.method());
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    metrics::record_request(
        &method,
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

/// Bounded label for the request method; extension methods share one series.
fn method_label(method: &Method) -> String {
    const STANDARD: [Method; 9] = [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
        Method::CONNECT,
        Method::TRACE,
    ];

    if STANDARD.contains(method) {
        method.to_string()
    } else {
        "OTHER".to_string()
    }
}

/// Last-resort handler for panics escaping a request handler.
pub fn panic_response(
    expose_details: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |panic| {
        let detail = if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic".to_string()
        };

        ApiError::Internal(format!("handler panicked: {}", detail)).render(expose_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use http_body_util::BodyExt;
    use std::io;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Collects formatted tracing output in memory.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_panic_response_hides_detail() {
        let handler = panic_response(false);
        let response = handler(Box::new("boom") as Box<dyn Any + Send>);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Internal server error");
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_panic_response_exposes_detail_in_development() {
        let handler = panic_response(true);
        let json = body_json(handler(Box::new(String::from("boom")) as Box<dyn Any + Send>)).await;
        assert!(json["message"].as_str().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_access_log_writes_combined_line() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app: Router = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(access_log));

        let mut request = axum::http::Request::builder()
            .uri("/ping?verbose=1")
            .header(REFERER, "https://semey.kz/")
            .header(USER_AGENT, "curl/8.0")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let output = logs.contents();
        assert!(output.contains("access_log:"), "{}", output);
        assert!(output.contains("127.0.0.1 - - ["), "{}", output);
        assert!(
            output.contains(
                "\"GET /ping?verbose=1 HTTP/1.1\" 200 4 \"https://semey.kz/\" \"curl/8.0\""
            ),
            "{}",
            output
        );
    }

    #[tokio::test]
    async fn test_access_log_dashes_missing_headers() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app: Router = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(access_log));

        let request = axum::http::Request::builder()
            .uri("/ping")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap();

        let output = logs.contents();
        assert!(output.contains("- - - ["), "{}", output);
        assert!(output.contains("200 4 \"-\" \"-\""), "{}", output);
    }

    #[test]
    fn test_method_label_is_bounded() {
        assert_eq!(method_label(&Method::GET), "GET");
        assert_eq!(method_label(&Method::DELETE), "DELETE");
        let custom = Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(method_label(&custom), "OTHER");
    }

    #[test]
    fn test_security_header_names_are_valid() {
        for (name, value) in SECURITY_HEADERS {
            assert!(HeaderName::from_bytes(name.as_bytes()).is_ok(), "{}", name);
            assert!(HeaderValue::from_str(value).is_ok(), "{}", name);
        }
    }
}
