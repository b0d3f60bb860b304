//! JSON body extractor that reports every failure as a 400.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use hostel_core::error::AppError;

use crate::error::ApiError;

/// A deserialized and validated JSON body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::validation(format!("Invalid request body: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|e| AppError::validation(describe(&e)))?;

        Ok(Self(value))
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut messages: Vec<String> = fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Field '{field}' is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
