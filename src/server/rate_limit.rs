// Fixed-window rate limiting for the /api surface
// Author: kelexine (https://github.com/kelexine)

use super::middleware::peer_ip;
use super::routes::AppState;
use crate::config::RateLimitConfig;
use crate::error::ApiError;
use crate::metrics;
use axum::extract::{Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::warn;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Expired windows are swept once the table grows past this many clients.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

/// Outcome of one `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the client's window resets.
    pub reset_after: Duration,
}

/// Per-client request counter over fixed windows.
///
/// Rejected requests still count against the window, so a client that keeps
/// hammering stays limited until the window rolls over.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn applies_to(&self, path: &str) -> bool {
        self.config.enabled && path.starts_with(&self.config.path_prefix)
    }

    pub fn check(&self, client: &str) -> RateLimitStatus {
        self.check_at(client, Instant::now())
    }

    pub fn check_at(&self, client: &str, now: Instant) -> RateLimitStatus {
        let window_len = Duration::from_secs(self.config.window_seconds);
        let mut windows = self.windows.lock();

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started) < window_len);
        }

        let window = windows.entry(client.to_string()).or_insert(Window {
            started: now,
            hits: 0,
        });
        if now.duration_since(window.started) >= window_len {
            *window = Window {
                started: now,
                hits: 0,
            };
        }
        window.hits = window.hits.saturating_add(1);

        let limit = self.config.max_requests;
        RateLimitStatus {
            allowed: window.hits <= limit,
            limit,
            remaining: limit.saturating_sub(window.hits),
            reset_after: window_len.saturating_sub(now.duration_since(window.started)),
        }
    }

    /// Identifies the caller: the first `X-Forwarded-For` hop when proxies
    /// are trusted, else the peer address.
    pub fn client_id(&self, request: &Request) -> String {
        if self.config.trust_forwarded_for {
            let forwarded = request
                .headers()
                .get(X_FORWARDED_FOR)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());
            if let Some(client) = forwarded {
                return client.to_string();
            }
        }

        peer_ip(request)
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn insert_limit_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(status.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(status.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(reset_seconds(status)));
}

fn reset_seconds(status: &RateLimitStatus) -> u64 {
    // Round up so clients never retry a moment too early.
    let millis = status.reset_after.as_millis() as u64;
    millis.div_ceil(1000)
}

/// Middleware rejecting clients over their budget with 429.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limiter = &state.limiter;
    if !limiter.applies_to(request.uri().path()) {
        return next.run(request).await;
    }

    let client = limiter.client_id(&request);
    let status = limiter.check(&client);

    let mut response = if status.allowed {
        next.run(request).await
    } else {
        warn!("Rate limit exceeded for {} on {}", client, request.uri().path());
        metrics::record_rate_limited();
        let mut response = ApiError::TooManyRequests.into_response();
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(reset_seconds(&status)));
        response
    };

    insert_limit_headers(response.headers_mut(), &status);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window_seconds: 60,
            ..Default::default()
        })
    }

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = limiter(3);
        let now = Instant::now();

        for expected_remaining in [2, 1, 0] {
            let status = limiter.check_at("10.0.0.1", now);
            assert!(status.allowed);
            assert_eq!(status.remaining, expected_remaining);
        }

        let status = limiter.check_at("10.0.0.1", now);
        assert!(!status.allowed);
        assert_eq!(status.remaining, 0);
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = limiter(1);
        let now = Instant::now();

        assert!(limiter.check_at("a", now).allowed);
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
    }

    #[test]
    fn test_window_resets() {
        let limiter = limiter(1);
        let start = Instant::now();

        assert!(limiter.check_at("a", start).allowed);
        assert!(!limiter.check_at("a", start + Duration::from_secs(30)).allowed);

        let status = limiter.check_at("a", start + Duration::from_secs(60));
        assert!(status.allowed);
        assert_eq!(status.reset_after, Duration::from_secs(60));
    }

    #[test]
    fn test_reset_after_counts_down() {
        let limiter = limiter(5);
        let start = Instant::now();
        limiter.check_at("a", start);

        let status = limiter.check_at("a", start + Duration::from_millis(10_500));
        assert_eq!(status.reset_after, Duration::from_millis(49_500));
        assert_eq!(reset_seconds(&status), 50);
    }

    #[test]
    fn test_prefix_and_toggle() {
        let enabled = limiter(1);
        assert!(enabled.applies_to("/api/v1/projects"));
        assert!(!enabled.applies_to("/health"));
        assert!(!enabled.applies_to("/apis"));

        let disabled = RateLimiter::new(RateLimitConfig {
            enabled: false,
            ..Default::default()
        });
        assert!(!disabled.applies_to("/api/v1/projects"));
    }
}
