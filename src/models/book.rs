//! Book model and request payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub rating: Option<i32>,
}

/// Fields of a book about to be inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub rating: Option<i32>,
}

/// Body of `POST /books`: either a search or a new book
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookPayload {
    /// Search term; when non-empty the request is a search
    pub search: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    /// Integer, or any value convertible to one
    #[schema(value_type = Option<i32>)]
    pub rating: Option<Value>,
}

impl BookPayload {
    /// Non-empty search term, if this payload is a search
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// Body of `PATCH /books/{id}`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RatingPatch {
    #[schema(value_type = Option<i32>)]
    pub rating: Option<Value>,
}

/// Pagination query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, 1-based (default: 1)
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

/// Convert a JSON value to a rating the way an integer cast would.
///
/// Integers pass through, floats truncate toward zero, booleans become
/// 1 or 0 and strings must hold a decimal integer (surrounding whitespace
/// allowed). Everything else, including null, is rejected.
pub fn coerce_rating(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok()
            } else {
                let f = n.as_f64()?.trunc();
                if f.is_finite() && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                    Some(f as i32)
                } else {
                    None
                }
            }
        }
        Value::Bool(b) => Some(i32::from(*b)),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
