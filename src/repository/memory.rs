//! In-memory book store used by the router tests

use std::sync::Mutex;

use async_trait::async_trait;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

#[derive(Default)]
pub struct InMemoryBookStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    books: Vec<Book>,
    next_id: i32,
}

impl InMemoryBookStore {
    /// Store pre-filled with `count` books titled "Book 1", "Book 2", ...
    pub fn with_books(count: usize) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            for n in 1..=count {
                state.next_id += 1;
                let id = state.next_id;
                state.books.push(Book {
                    id,
                    title: Some(format!("Book {}", n)),
                    author: Some(format!("Author {}", n)),
                    rating: Some(3),
                });
            }
        }
        store
    }

    pub fn get(&self, id: i32) -> Option<Book> {
        let state = self.state.lock().unwrap();
        state.books.iter().find(|b| b.id == id).cloned()
    }
}

fn contains_ignore_case(field: &Option<String>, needle: &str) -> bool {
    field
        .as_deref()
        .map(|value| value.to_lowercase().contains(needle))
        .unwrap_or(false)
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn ensure_schema(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.state.lock().unwrap().books.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.get(id))
    }

    async fn search_by_title_or_author(&self, term: &str) -> AppResult<Vec<Book>> {
        let needle = term.to_lowercase();
        let state = self.state.lock().unwrap();
        Ok(state
            .books
            .iter()
            .filter(|b| contains_ignore_case(&b.title, &needle) || contains_ignore_case(&b.author, &needle))
            .cloned()
            .collect())
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Book {
            id: state.next_id,
            title: book.title.clone(),
            author: book.author.clone(),
            rating: book.rating,
        };
        state.books.push(created.clone());
        Ok(created)
    }

    async fn update_rating(&self, id: i32, rating: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let book = state
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        book.rating = Some(rating);
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.books.len();
        state.books.retain(|b| b.id != id);
        if state.books.len() == before {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
