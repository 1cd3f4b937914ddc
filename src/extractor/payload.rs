use std::marker::PhantomData;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use schemars::{schema_for, JsonSchema};
use serde_json::Value;

use crate::error::{
    ApiError, BodyError, ErrorVerbosity, ErrorVerbosityProvider, InternalServerError,
};

/// Extracts the request body as an untyped JSON payload, consuming the request.
///
/// An empty (or whitespace only) body is not a rejection: it yields `None` so that the
/// caller can report the payload as missing. Bodies that are not JSON are rejected with
/// a [`BodyError`] describing the schema of `T`.
///
/// The `Content-Type` header is not inspected.
pub struct ApiPayload<T> {
    payload: Option<Value>,
    _schema: PhantomData<fn() -> T>,
}

impl<T> ApiPayload<T> {
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

fn expected_schema<T: JsonSchema>(verbosity: ErrorVerbosity) -> Result<String, ApiError> {
    serde_yaml::to_string(&schema_for!(T))
        .map_err(|err| InternalServerError::from_generic_error(verbosity, err).into())
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiPayload<T>
where
    T: JsonSchema,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "payload_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(bytes_rejection) => {
                tracing::warn!(rejection=?bytes_rejection, "Rejection");

                return Err(BodyError::new(
                    verbosity,
                    bytes_rejection.body_text(),
                    expected_schema::<T>(verbosity)?,
                )
                .into());
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::trace!("Empty body");

            return Ok(ApiPayload {
                payload: None,
                _schema: PhantomData,
            });
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(payload) => {
                tracing::trace!(%payload, "Extracted");

                Ok(ApiPayload {
                    payload: Some(payload),
                    _schema: PhantomData,
                })
            }
            Err(err) => {
                tracing::warn!(%err, "Rejection");

                Err(BodyError::new(
                    verbosity,
                    format!("Failed to parse the request body as JSON: {err}"),
                    expected_schema::<T>(verbosity)?,
                )
                .into())
            }
        }
    }
}
