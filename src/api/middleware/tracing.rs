//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Which part of the service a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Api,
    Health,
    Redirect,
}

impl RouteKind {
    pub fn of(path: &str) -> Self {
        if path == "/api" || path.starts_with("/api/") {
            RouteKind::Api
        } else if path == "/health" || path.starts_with("/health/") {
            RouteKind::Health
        } else {
            RouteKind::Redirect
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Api => "api",
            RouteKind::Health => "health",
            RouteKind::Redirect => "redirect",
        }
    }
}

/// Slug addressed by a redirect path, if any.
fn redirect_slug(path: &str) -> Option<&str> {
    let slug = path.trim_start_matches('/').trim_end_matches('/');
    (!slug.is_empty()).then_some(slug)
}

/// Opens one `http` span per request, tagged with the route kind and, for
/// redirects, the requested slug.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteSpan;

impl<B> MakeSpan<B> for RouteSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let path = request.uri().path();
        let kind = RouteKind::of(path);

        let span = tracing::info_span!(
            "http",
            method = %request.method(),
            path = %path,
            route = kind.as_str(),
            slug = tracing::field::Empty,
        );

        if kind == RouteKind::Redirect {
            if let Some(slug) = redirect_slug(path) {
                span.record("slug", slug);
            }
        }

        span
    }
}

/// Creates the tracing middleware for the router.
///
/// Responses are logged at `INFO` with status and latency in milliseconds:
///
/// ```text
/// INFO http{method=GET path=/promo2025 route=redirect slug=promo2025}: finished processing request latency=3 ms status=302
/// INFO http{method=POST path=/api/shorten route=api}: finished processing request latency=12 ms status=201
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RouteSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RouteSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
