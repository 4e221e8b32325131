// src/repository/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{QuestionRepository, generate_id};
use crate::{error::AppError, models::QuestionRecord};

/// Keeps questions in a map. Used by tests and by dry-run imports.
#[derive(Debug, Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<String, QuestionRecord>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.questions.read().await.is_empty()
    }
}

/// Copy as it would come back from storage: the transient flag is not kept.
fn detached(record: &QuestionRecord) -> QuestionRecord {
    let mut copy = record.clone();
    copy.preserve_timestamps(false);
    copy
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn insert(&self, record: &mut QuestionRecord) -> Result<String, AppError> {
        let mut questions = self.questions.write().await;

        let id = match record.id() {
            Some(id) if questions.contains_key(id) => {
                return Err(AppError::Conflict(format!("Question '{}' already exists", id)));
            }
            Some(id) => id.to_string(),
            None => generate_id(),
        };

        record.assign_id(id.clone());
        record.on_before_store();
        questions.insert(id.clone(), detached(record));

        Ok(id)
    }

    async fn update(&self, record: &mut QuestionRecord) -> Result<(), AppError> {
        let id = record
            .id()
            .ok_or_else(|| AppError::BadRequest("Cannot update a question without an id".to_string()))?
            .to_string();

        let mut questions = self.questions.write().await;
        let stored = questions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Question '{}' not found", id)))?;

        record.on_before_store();
        *stored = detached(record);

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<QuestionRecord>, AppError> {
        Ok(self.questions.read().await.get(id).cloned())
    }

    async fn find_by_session(
        &self,
        course_id: &str,
        feedback_session_name: &str,
    ) -> Result<Vec<QuestionRecord>, AppError> {
        let questions = self.questions.read().await;
        let mut found: Vec<QuestionRecord> = questions
            .values()
            .filter(|q| {
                q.course_id() == course_id && q.feedback_session_name() == feedback_session_name
            })
            .cloned()
            .collect();
        found.sort_by_key(|q| q.question_number());
        Ok(found)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.questions.write().await.remove(id).is_some())
    }
}
