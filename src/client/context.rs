//! Request descriptors and the context map carried through `web_request`.
//!
//! Zellij answers a web request asynchronously with a `WebRequestResult`
//! event that echoes back the string map passed as context. That map is the
//! only link between a response and the request that produced it, so it
//! carries the season and request id used for stale-response suppression,
//! plus the OpenTelemetry identifiers needed to continue the trace.

use crate::domain::{PitwallError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SEASON_KEY: &str = "pitwall.season";
const REQUEST_ID_KEY: &str = "pitwall.request_id";
const TRACE_ID_KEY: &str = "pitwall.trace_id";
const PARENT_SPAN_ID_KEY: &str = "pitwall.parent_span_id";

/// Distributed tracing context for spans that cross the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when tracing is not initialized or the span is not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of spans created while the guard lives.
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Identity of one season fetch, echoed back with its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchContext {
    /// Season the request was issued for.
    pub season: i32,

    /// Generation number assigned by the season store.
    pub request_id: u64,

    /// Trace context of the span that issued the request.
    pub trace_context: Option<TraceContext>,
}

impl FetchContext {
    /// Serializes the context into the string map Zellij round-trips.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(SEASON_KEY.to_string(), self.season.to_string());
        map.insert(REQUEST_ID_KEY.to_string(), self.request_id.to_string());
        if let Some(trace) = &self.trace_context {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Rebuilds a context from a `WebRequestResult` context map.
    ///
    /// # Errors
    ///
    /// Returns [`PitwallError::Context`] when the season or request id is
    /// missing or not a number, which means the result does not belong to a
    /// season fetch.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let season = map
            .get(SEASON_KEY)
            .ok_or_else(|| PitwallError::Context(format!("missing {SEASON_KEY}")))?
            .parse::<i32>()
            .map_err(|e| PitwallError::Context(format!("invalid {SEASON_KEY}: {e}")))?;

        let request_id = map
            .get(REQUEST_ID_KEY)
            .ok_or_else(|| PitwallError::Context(format!("missing {REQUEST_ID_KEY}")))?
            .parse::<u64>()
            .map_err(|e| PitwallError::Context(format!("invalid {REQUEST_ID_KEY}: {e}")))?;

        let trace_context = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            season,
            request_id,
            trace_context,
        })
    }
}

/// A season fetch ready to be handed to the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Fully joined request URL.
    pub url: String,

    /// Context to send along with the request.
    pub context: FetchContext,
}

impl FetchRequest {
    /// Creates a request for `season`, capturing the current trace context.
    #[must_use]
    pub fn new(url: String, season: i32, request_id: u64) -> Self {
        Self {
            url,
            context: FetchContext {
                season,
                request_id,
                trace_context: TraceContext::from_current(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_map_round_trip_with_trace() {
        let context = FetchContext {
            season: 2024,
            request_id: 7,
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        let restored = FetchContext::from_map(&context.to_map()).unwrap();
        assert_eq!(restored, context);
    }

    #[test]
    fn test_context_without_trace_ids() {
        let context = FetchContext {
            season: -3,
            request_id: 1,
            trace_context: None,
        };

        let map = context.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(FetchContext::from_map(&map).unwrap(), context);
    }

    #[test]
    fn test_foreign_context_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("other_plugin".to_string(), "x".to_string());
        assert!(matches!(FetchContext::from_map(&map), Err(PitwallError::Context(_))));

        map.insert(SEASON_KEY.to_string(), "twenty".to_string());
        map.insert(REQUEST_ID_KEY.to_string(), "1".to_string());
        assert!(matches!(FetchContext::from_map(&map), Err(PitwallError::Context(_))));
    }

    #[test]
    fn test_new_request_without_tracing_has_no_trace_context() {
        let request = FetchRequest::new("/api/season/summary?season=2024".to_string(), 2024, 1);
        assert_eq!(request.context.season, 2024);
        assert_eq!(request.context.request_id, 1);
        assert!(request.context.trace_context.is_none());
    }
}
