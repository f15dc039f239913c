// src/store/mod.rs

//! Respondent record storage.

mod memory;
mod postgres;

use async_trait::async_trait;

pub use memory::MemoryStudentStore;
pub use postgres::PgStudentStore;

use crate::{
    error::AppError,
    models::{
        question::QuestionSet,
        student::{AnswerSet, Student},
    },
};

/// Persistence for respondent records, keyed by normalized name.
///
/// Carried in `AppState` as `Arc<dyn StudentStore>`.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn find(&self, name: &str) -> Result<Option<Student>, AppError>;

    /// Creates the record with its question set.
    /// If the name already exists, the existing record is returned unchanged.
    /// The flag is `true` only when this call inserted the record.
    async fn create(
        &self,
        name: &str,
        questions: QuestionSet,
    ) -> Result<(Student, bool), AppError>;

    /// Replaces the whole answer set. Returns `None` when the name is unknown.
    async fn replace_answers(
        &self,
        name: &str,
        answers: &AnswerSet,
    ) -> Result<Option<Student>, AppError>;
}
