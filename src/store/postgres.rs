// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, prelude::FromRow, types::Json};

use super::StudentStore;
use crate::{
    error::AppError,
    models::{
        question::QuestionSet,
        student::{AnswerSet, Student},
    },
};

/// Represents the 'students' table in the database.
#[derive(Debug, FromRow)]
struct StudentRow {
    name: String,

    /// Sampled questions, options and weights included.
    /// Stored as a JSON array in the database.
    questions: Json<QuestionSet>,

    /// NULL until answers are submitted.
    answers: Option<Json<AnswerSet>>,

    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// Row returned by the create upsert.
#[derive(Debug, FromRow)]
struct CreatedRow {
    #[sqlx(flatten)]
    student: StudentRow,

    /// `xmax = 0` only for a freshly inserted tuple.
    inserted: bool,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            name: row.name,
            questions: row.questions.0,
            answers: row.answers.map(|a| a.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn find(&self, name: &str) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT name, questions, answers, created_at, updated_at
            FROM students
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch student: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(row.map(Student::from))
    }

    async fn create(
        &self,
        name: &str,
        questions: QuestionSet,
    ) -> Result<(Student, bool), AppError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, CreatedRow>(
            r#"
            INSERT INTO students (name, questions)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING name, questions, answers, created_at, updated_at,
                      (xmax = 0) AS inserted
            "#,
        )
        .bind(name)
        .bind(Json(questions))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create student: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok((row.student.into(), row.inserted))
    }

    async fn replace_answers(
        &self,
        name: &str,
        answers: &AnswerSet,
    ) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            UPDATE students
            SET answers = $2, updated_at = CURRENT_TIMESTAMP
            WHERE name = $1
            RETURNING name, questions, answers, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(Json(answers.clone()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update answers: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(row.map(Student::from))
    }
}
