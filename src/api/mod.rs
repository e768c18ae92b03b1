//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{error::AppError, pagination::Page};

/// Extractor for the `page` query parameter.
///
/// Never rejects: a missing or malformed parameter selects the first page.
/// When the parameter is repeated the first occurrence wins.
pub struct PageParam(pub Page);

#[async_trait]
impl<S> FromRequestParts<S> for PageParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let param = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(pairs)| pairs.into_iter().find(|(key, _)| key == "page"))
            .map(|(_, value)| value);
        Ok(PageParam(Page::from_param(param.as_deref())))
    }
}

/// True when `segment` is a run of ASCII digits, the only form of `{id}`
/// that routes to a book.
pub fn is_book_id(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Extractor for the integer `{id}` path segment.
///
/// A segment that is not an integer matches no route, so it is reported
/// as `NotFound` in the usual envelope. An integer too large for the id
/// column cannot name a stored book and is carried as `None`.
pub struct BookId(pub Option<i32>);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;
        if !is_book_id(&segment) {
            return Err(AppError::NotFound(format!("No route for book id {:?}", segment)));
        }
        Ok(BookId(segment.parse::<i32>().ok()))
    }
}

/// Decode a JSON request body; an empty or malformed body yields `None`.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Option<T> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring malformed JSON body: {}", e);
            None
        }
    }
}

/// Handler for a known path requested with an unsupported method
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Fallback for `/books/{id}`: a non-integer id matches no route at all
pub async fn book_method_not_allowed(Path(segment): Path<String>) -> AppError {
    if is_book_id(&segment) {
        AppError::MethodNotAllowed
    } else {
        AppError::NotFound(format!("No route for book id {:?}", segment))
    }
}

/// Handler for paths that match no route
pub async fn not_found() -> AppError {
    AppError::NotFound("No route".to_string())
}
