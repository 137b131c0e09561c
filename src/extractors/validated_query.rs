use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use tracing::warn;

use crate::{
    structs::sorting_and_order_arguments::SortingAndOrderArguments, utils::app_error::AppError,
};

/// Query arguments that already passed validation.
///
/// A request whose arguments break any constraint never reaches the handler:
/// it is answered with a 400 listing every violation.
pub struct ValidatedQuery(pub SortingAndOrderArguments);

#[async_trait]
impl<S> FromRequestParts<S> for ValidatedQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!("Cannot read query string of {} : {}", parts.uri, e.body_text());
                AppError::new(
                    hyper::StatusCode::BAD_REQUEST,
                    Some("Malformed query string."),
                )
            })?;

        SortingAndOrderArguments::from_params(&params)
            .map(ValidatedQuery)
            .map_err(AppError::validation_error)
    }
}
