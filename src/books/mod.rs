// src/books/mod.rs

//! Book recommendations for a matched genre.

mod ebooks;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

pub use ebooks::{EbooksCatalog, parse_listing};

use crate::models::{book::Book, personality::Genre};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("request to book catalog failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid book catalog url: {0}")]
    Url(#[from] url::ParseError),
}

/// Source of book recommendations.
///
/// Carried in `AppState` as `Arc<dyn BookSource>`.
#[async_trait]
pub trait BookSource: Send + Sync {
    async fn books_for(&self, genre: Genre) -> Result<Vec<Book>, BookError>;
}

/// Fixed book lists, for tests and offline runs.
#[derive(Debug, Default, Clone)]
pub struct StaticBooks {
    books: HashMap<Genre, Vec<Book>>,
}

impl StaticBooks {
    pub fn new(books: impl IntoIterator<Item = Book>) -> Self {
        let mut by_genre: HashMap<Genre, Vec<Book>> = HashMap::new();
        for book in books {
            by_genre.entry(book.genre).or_default().push(book);
        }
        Self { books: by_genre }
    }
}

#[async_trait]
impl BookSource for StaticBooks {
    async fn books_for(&self, genre: Genre) -> Result<Vec<Book>, BookError> {
        Ok(self.books.get(&genre).cloned().unwrap_or_default())
    }
}
