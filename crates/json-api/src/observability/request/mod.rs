//! Request logging middleware. Wraps every request except probes in an
//! `http.request` span, which the auth hoop later tags with the caller's uuid.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Scrapes and liveness checks, polled often enough to drown real traffic.
const PROBE_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if is_probe(req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.otel_path,
        path = %path,
        remote_addr = %req.remote_addr(),
        user = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!(%source, "failed to attach remote parent to request span");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);

    metrics::observe_request(&method, &names.otel_path, status.as_u16(), elapsed.as_secs_f64());

    record_outcome(&span, status, elapsed);
}

fn is_probe(path: &str) -> bool {
    PROBE_PATHS.contains(&path)
}

/// Records status and latency on `span` and logs the completion line inside it.
fn record_outcome(span: &Span, status: StatusCode, elapsed: Duration) {
    let status = status.as_u16();
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("status", status);
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        match status {
            500.. => error!(status, duration_ms, "request failed"),
            400..500 => warn!(status, duration_ms, "request rejected"),
            _ => info!(status, duration_ms, "request completed"),
        }

        if duration_ms > threshold_ms {
            warn!(duration_ms, threshold_ms, "slow request");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_skip_request_logging() {
        assert!(is_probe("/metrics"));
        assert!(is_probe("/healthcheck"));
        assert!(!is_probe("/rentals/me"));
        assert!(!is_probe("/healthcheck/deep"));
    }
}
