// src/models/book.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::personality::Genre;

/// A book recommendation taken from the catalog listing of a genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub description: String,

    /// Cover image URL.
    pub image: String,

    /// Absolute URL of the book page.
    pub link: String,

    pub genre: Genre,
}
