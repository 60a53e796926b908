// src/application/context.rs
use tracing::Span;

/// Per-call handle passed into every service operation: the forwarded
/// credential, a request id for correlation and the span the operation's
/// events attach to.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    authorization: Option<String>,
    span: Span,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>, authorization: Option<String>) -> Self {
        let request_id = request_id.into();
        let span = tracing::info_span!("rpc", request_id = %request_id, method = tracing::field::Empty);
        Self {
            request_id,
            authorization: authorization.filter(|value| !value.trim().is_empty()),
            span,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// Span for one named operation, child of the request span.
    pub fn operation_span(&self, method: &'static str) -> Span {
        self.span.record("method", method);
        tracing::info_span!(parent: &self.span, "operation", method)
    }
}
