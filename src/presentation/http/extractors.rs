// src/presentation/http/extractors.rs
use crate::application::RequestContext;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::HttpError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Call metadata of one RPC: the forwarded credential and a request id taken
/// from `x-request-id` or generated.
#[derive(Debug, Clone)]
pub struct CallContext(pub RequestContext);

fn header_value(headers: &HeaderMap, name: impl axum::http::header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for CallContext
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = header_value(&parts.headers, REQUEST_ID_HEADER)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let authorization = header_value(&parts.headers, AUTHORIZATION);

        Ok(Self(RequestContext::new(request_id, authorization)))
    }
}

/// JSON body whose parse failures surface in the RPC error format.
#[derive(Debug, Clone)]
pub struct RpcJson<T>(pub T);

impl<S, T> FromRequest<S> for RpcJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError::malformed(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    format!("malformed request body: {}", rejection.body_text())
}
