//! Bookshelf service: persistence calls combined with pagination

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::book::{coerce_rating, Book, NewBook},
    pagination::Page,
    repository::Repository,
};

/// One page of books plus the size of the whole collection it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    pub books: Vec<Book>,
    pub total_books: usize,
}

impl Shelf {
    fn paginate(all: Vec<Book>, page: Page) -> Self {
        Self {
            books: page.slice(&all),
            total_books: all.len(),
        }
    }
}

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Page of all books; an empty page is `NotFound`
    pub async fn list(&self, page: Page) -> AppResult<Shelf> {
        let all = self.repository.books.list_all().await?;
        let shelf = Shelf::paginate(all, page);
        if shelf.books.is_empty() {
            return Err(AppError::NotFound(format!("Page {} is empty", page.number())));
        }
        Ok(shelf)
    }

    /// Page of books matching `term`; an empty page is a valid result
    pub async fn search(&self, term: &str, page: Page) -> AppResult<Shelf> {
        tracing::debug!("Searching books for {:?}", term);
        let matches = self
            .repository
            .books
            .search_by_title_or_author(term)
            .await
            .map_err(AppError::into_unprocessable)?;
        Ok(Shelf::paginate(matches, page))
    }

    /// Insert a book and return its id with a page of the updated collection
    pub async fn create(&self, book: NewBook, page: Page) -> AppResult<(i32, Shelf)> {
        let created = self
            .repository
            .books
            .insert(&book)
            .await
            .map_err(AppError::into_unprocessable)?;
        tracing::info!("Created book id={}", created.id);

        let all = self
            .repository
            .books
            .list_all()
            .await
            .map_err(AppError::into_unprocessable)?;
        Ok((created.id, Shelf::paginate(all, page)))
    }

    /// Set the rating of an existing book.
    ///
    /// The book must exist before the rating is looked at, so a missing
    /// book wins over a missing rating.
    pub async fn update_rating(&self, id: i32, rating: Option<&Value>) -> AppResult<i32> {
        let book = self
            .repository
            .books
            .get_by_id(id)
            .await
            .map_err(AppError::into_unprocessable)?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        let raw = rating.ok_or_else(|| AppError::BadRequest("Missing rating".to_string()))?;
        let rating = coerce_rating(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid rating {}", raw)))?;

        self.repository
            .books
            .update_rating(book.id, rating)
            .await
            .map_err(AppError::into_unprocessable)?;
        tracing::info!("Updated rating of book id={} to {}", book.id, rating);
        Ok(book.id)
    }

    /// Delete a book and return a page of the remaining collection.
    ///
    /// Deleting an unknown id is `Unprocessable`, not `NotFound`.
    pub async fn delete(&self, id: i32, page: Page) -> AppResult<Shelf> {
        let remaining = self
            .delete_and_relist(id)
            .await
            .map_err(AppError::into_unprocessable)?;
        tracing::info!("Deleted book id={}", id);
        Ok(Shelf::paginate(remaining, page))
    }

    async fn delete_and_relist(&self, id: i32) -> AppResult<Vec<Book>> {
        let books = &self.repository.books;
        if books.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        books.delete_by_id(id).await?;
        books.list_all().await
    }
}
