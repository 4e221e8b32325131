// src/service.rs

use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::AppError,
    models::{FeedbackQuestion, QuestionDetails, QuestionRecord, UpdateQuestionRequest},
    repository::QuestionRepository,
    validation::validate_question,
};

/// Outcome of a bulk legacy import.
#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    pub imported: Vec<String>,
    /// Ids that were already present in the new store.
    pub already_present: Vec<String>,
    /// Ids that could not be imported, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Question operations used by the rest of the application.
///
/// Holds all validation; the repository only stores what it is given.
#[derive(Clone)]
pub struct QuestionService {
    repo: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repo: Arc<dyn QuestionRepository>) -> Self {
        Self { repo }
    }

    /// Validates and stores a new question. The store assigns the id.
    pub async fn create_question(&self, details: QuestionDetails) -> Result<QuestionRecord, AppError> {
        validate_question(&details)?;

        let mut record = QuestionRecord::new(details);
        let id = self.repo.insert(&mut record).await?;

        tracing::info!(
            "Created question {} (#{} of {}/{})",
            id,
            record.question_number(),
            record.course_id(),
            record.feedback_session_name()
        );
        Ok(record)
    }

    pub async fn get_question(&self, id: &str) -> Result<QuestionRecord, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question '{}' not found", id)))
    }

    pub async fn list_session_questions(
        &self,
        course_id: &str,
        feedback_session_name: &str,
    ) -> Result<Vec<QuestionRecord>, AppError> {
        self.repo.find_by_session(course_id, feedback_session_name).await
    }

    /// Applies a partial update. The result must still be a valid question.
    pub async fn update_question(
        &self,
        id: &str,
        payload: UpdateQuestionRequest,
    ) -> Result<QuestionRecord, AppError> {
        let mut record = self.get_question(id).await?;
        payload.apply_to(&mut record);
        validate_question(record.details())?;

        self.repo.update(&mut record).await?;
        tracing::info!("Updated question {}", id);
        Ok(record)
    }

    pub async fn delete_question(&self, id: &str) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Question '{}' not found", id)));
        }
        tracing::info!("Deleted question {}", id);
        Ok(())
    }

    /// Administrative path: copies a question from the previous store under
    /// its original id, keeping its audit timestamps untouched.
    ///
    /// No validation is applied; historical data is carried over as it was.
    pub async fn import_legacy_question(
        &self,
        legacy: &FeedbackQuestion,
    ) -> Result<QuestionRecord, AppError> {
        let mut record = QuestionRecord::from(legacy);
        record.preserve_timestamps(true);

        self.repo.insert(&mut record).await?;
        record.preserve_timestamps(false);

        tracing::debug!("Imported legacy question {}", legacy.id);
        Ok(record)
    }

    /// Imports every question, continuing past individual failures.
    pub async fn migrate_legacy_questions<'a, I>(&self, questions: I) -> MigrationReport
    where
        I: IntoIterator<Item = &'a FeedbackQuestion>,
    {
        let mut report = MigrationReport::default();

        for legacy in questions {
            match self.import_legacy_question(legacy).await {
                Ok(_) => report.imported.push(legacy.id.clone()),
                Err(AppError::Conflict(_)) => {
                    tracing::warn!("Question {} already migrated, skipping", legacy.id);
                    report.already_present.push(legacy.id.clone());
                }
                Err(e) => {
                    tracing::error!("Failed to migrate question {}: {}", legacy.id, e);
                    report.failed.push((legacy.id.clone(), e.to_string()));
                }
            }
        }

        tracing::info!(
            "Migration finished: {} imported, {} already present, {} failed",
            report.imported.len(),
            report.already_present.len(),
            report.failed.len()
        );
        report
    }
}
