//! Tracing setup and per-request correlation IDs.
//!
//! A [`TraceContext`] travels with each request through tokio task-local
//! storage so error responses can echo the same trace ID that appears in
//! the logs. [`init_tracing`] installs the global subscriber and the
//! `log` -> `tracing` bridge; it is safe to call more than once.

use std::any::type_name_of_val;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use log::LevelFilter;
use thiserror::Error;
use tokio::task_local;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};
use uuid::Uuid;

use crate::config::AppConfig;

/// Correlation metadata for one request.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: String,
}

impl TraceContext {
    /// Mint a fresh context with a short `corr-` correlation ID.
    pub fn mint() -> Self {
        Self {
            trace_id: format!("corr-{}", &Uuid::new_v4().simple().to_string()[..8]),
        }
    }
}

task_local! {
    static ACTIVE_TRACE_CONTEXT: TraceContext;
}

#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("failed to install log tracer bridge: {0}")]
    LogTracer(#[from] log::SetLoggerError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

static TELEMETRY_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Install the global subscriber. Repeat calls (tests, embedded use) are
/// no-ops; an already-installed subscriber is tolerated with a warning.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if TELEMETRY_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(());
    }

    install_log_bridge();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let fmt_layer = match config.log_format.as_str() {
        "pretty" => fmt::layer().pretty().boxed(),
        _ => fmt::layer().json().boxed(),
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
    if let Err(err) = installed {
        TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
        eprintln!("warning: global tracing subscriber not replaced: {err}");
    }

    Ok(())
}

/// Route legacy `log::` macros into tracing. A second registration attempt
/// fails; that is fine when the existing logger is already a `LogTracer`.
fn install_log_bridge() {
    let result = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();
    if let Err(err) = result {
        if !type_name_of_val(log::logger()).contains("LogTracer") {
            eprintln!("warning: log bridge not installed ({err}); `log::` macros stay unstructured");
        }
    }
}

/// Run `future` with `context` as the task-local trace context.
pub async fn with_trace_context<Fut, R>(context: TraceContext, future: Fut) -> R
where
    Fut: Future<Output = R>,
{
    ACTIVE_TRACE_CONTEXT.scope(context, future).await
}

/// Trace ID of the running task, if the request middleware set one.
pub fn current_trace_id() -> Option<String> {
    ACTIVE_TRACE_CONTEXT
        .try_with(|ctx| ctx.trace_id.clone())
        .ok()
}

/// Request middleware: mint a trace context, expose it to extractors and
/// to [`current_trace_id`], and echo the ID back in `X-Trace-Id`.
pub async fn trace_middleware(mut request: Request, next: Next) -> Response {
    let context = TraceContext::mint();
    let trace_id = context.trace_id.clone();
    request.extensions_mut().insert(context.clone());

    let mut response = with_trace_context(context, next.run(request)).await;
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert("x-trace-id", value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_trace_ids_are_short_and_prefixed() {
        let context = TraceContext::mint();
        assert!(context.trace_id.starts_with("corr-"));
        assert_eq!(context.trace_id.len(), 13);
    }

    #[tokio::test]
    async fn trace_id_is_visible_only_inside_the_scope() {
        assert!(current_trace_id().is_none());

        let context = TraceContext {
            trace_id: "corr-deadbeef".to_string(),
        };
        let seen = with_trace_context(context, async { current_trace_id() }).await;
        assert_eq!(seen.as_deref(), Some("corr-deadbeef"));

        assert!(current_trace_id().is_none());
    }
}
