//! Book endpoints

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{coerce_rating, Book, BookPayload, NewBook, RatingPatch},
    services::books::Shelf,
    AppState,
};

use super::{parse_body, BookId, PageParam};

/// A page of books
#[derive(Debug, Serialize, ToSchema)]
pub struct ShelfResponse {
    pub success: bool,
    /// At most 8 books
    pub books: Vec<Book>,
    /// Size of the whole (unpaginated) collection
    pub total_books: usize,
}

impl From<Shelf> for ShelfResponse {
    fn from(shelf: Shelf) -> Self {
        Self {
            success: true,
            books: shelf.books,
            total_books: shelf.total_books,
        }
    }
}

/// A created book's id plus a page of all books
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i32,
    pub books: Vec<Book>,
    pub total_books: usize,
}

/// Response of `POST /books`, depending on whether it searched or created
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreateOrSearchResponse {
    Search(ShelfResponse),
    Created(CreatedResponse),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingUpdatedResponse {
    pub success: bool,
    pub id: i32,
}

/// A deleted book's id plus a page of the remaining books
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
    pub books: Vec<Book>,
    pub total_books: usize,
}

/// List books, 8 per page
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(crate::models::book::PageQuery),
    responses(
        (status = 200, description = "Page of books", body = ShelfResponse),
        (status = 404, description = "Page is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    PageParam(page): PageParam,
) -> AppResult<Json<ShelfResponse>> {
    let shelf = state.services.books.list(page).await?;
    Ok(Json(shelf.into()))
}

/// Search books, or create one when the body has no search term
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    params(crate::models::book::PageQuery),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Search results or created book", body = CreateOrSearchResponse),
        (status = 422, description = "Book could not be created", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_or_search_books(
    State(state): State<AppState>,
    PageParam(page): PageParam,
    body: Bytes,
) -> AppResult<Json<CreateOrSearchResponse>> {
    let payload: BookPayload = parse_body(&body)
        .ok_or_else(|| AppError::Unprocessable("Missing or malformed JSON body".to_string()))?;

    if let Some(term) = payload.search_term() {
        let shelf = state.services.books.search(term, page).await?;
        return Ok(Json(CreateOrSearchResponse::Search(shelf.into())));
    }

    let rating = match &payload.rating {
        Some(raw) => Some(
            coerce_rating(raw)
                .ok_or_else(|| AppError::Unprocessable(format!("Invalid rating {}", raw)))?,
        ),
        None => None,
    };
    let book = NewBook {
        title: payload.title,
        author: payload.author,
        rating,
    };

    let (created, shelf) = state.services.books.create(book, page).await?;
    Ok(Json(CreateOrSearchResponse::Created(CreatedResponse {
        success: true,
        created,
        books: shelf.books,
        total_books: shelf.total_books,
    })))
}

/// Update the rating of a book
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = RatingPatch,
    responses(
        (status = 200, description = "Rating updated", body = RatingUpdatedResponse),
        (status = 400, description = "Missing or invalid rating", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_rating(
    State(state): State<AppState>,
    BookId(id): BookId,
    body: Bytes,
) -> AppResult<Json<RatingUpdatedResponse>> {
    let id = id.ok_or_else(|| AppError::NotFound("Book id out of range".to_string()))?;
    let rating = parse_body::<RatingPatch>(&body).and_then(|patch| patch.rating);
    let id = state.services.books.update_rating(id, rating.as_ref()).await?;
    Ok(Json(RatingUpdatedResponse { success: true, id }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID"),
        crate::models::book::PageQuery
    ),
    responses(
        (status = 200, description = "Book deleted", body = DeletedResponse),
        (status = 422, description = "Book missing or not deleted", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    PageParam(page): PageParam,
) -> AppResult<Json<DeletedResponse>> {
    // Deleting a book that cannot exist is unprocessable, like any missing id
    let id = id.ok_or_else(|| AppError::Unprocessable("Book id out of range".to_string()))?;
    let shelf = state.services.books.delete(id, page).await?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
        books: shelf.books,
        total_books: shelf.total_books,
    }))
}
