//! Continuing a caller's trace from W3C trace-context headers.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::HeaderMap;

/// The only headers a caller can use to attach our request span to its trace.
const TRACE_HEADERS: [&str; 2] = ["traceparent", "tracestate"];

pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| caller_context(propagator, headers))
}

fn caller_context(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    // Start from an empty context so a request without trace headers does not
    // pick up whatever span is active on this task.
    let context = propagator.extract_with_context(&Context::new(), &TraceHeaders(headers));

    let has_caller_span = context.span().span_context().is_valid();

    has_caller_span.then_some(context)
}

struct TraceHeaders<'a>(&'a HeaderMap);

impl Extractor for TraceHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        if !TRACE_HEADERS.contains(&key) {
            return None;
        }

        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        TRACE_HEADERS
            .into_iter()
            .filter(|name| self.0.contains_key(*name))
            .collect()
    }
}
