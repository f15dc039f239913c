// src/store/memory.rs

use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StudentStore;
use crate::{
    error::AppError,
    models::{
        question::QuestionSet,
        student::{AnswerSet, Student},
    },
};

/// In-process store, used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: RwLock<HashMap<String, Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find(&self, name: &str) -> Result<Option<Student>, AppError> {
        Ok(self.students.read().await.get(name).cloned())
    }

    async fn create(
        &self,
        name: &str,
        questions: QuestionSet,
    ) -> Result<(Student, bool), AppError> {
        let mut students = self.students.write().await;
        match students.entry(name.to_string()) {
            Entry::Occupied(existing) => Ok((existing.get().clone(), false)),
            Entry::Vacant(slot) => Ok((slot.insert(Student::new(name, questions)).clone(), true)),
        }
    }

    async fn replace_answers(
        &self,
        name: &str,
        answers: &AnswerSet,
    ) -> Result<Option<Student>, AppError> {
        let mut students = self.students.write().await;
        Ok(students.get_mut(name).map(|student| {
            student.answers = Some(answers.clone());
            student.updated_at = chrono::Utc::now();
            student.clone()
        }))
    }
}
