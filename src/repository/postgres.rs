// src/repository/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, prelude::FromRow, types::Json};

use super::{QuestionRepository, generate_id};
use crate::{
    error::AppError,
    models::{FeedbackParticipantType, QuestionDetails, QuestionRecord},
};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, feedback_session_name, course_id, creator_email, question_metadata,
        question_number, question_type, giver_type, recipient_type,
        number_of_entities_to_give_feedback_to,
        show_responses_to, show_giver_name_to, show_recipient_name_to,
        created_at, updated_at
    FROM feedback_questions
"#;

/// Represents the 'feedback_questions' table in the database.
/// Kept apart from `QuestionRecord` so the record stays free of storage concerns.
#[derive(Debug, FromRow)]
struct QuestionRow {
    id: String,
    feedback_session_name: String,
    course_id: String,
    creator_email: String,
    question_metadata: String,
    question_number: i32,
    question_type: String,
    giver_type: String,
    recipient_type: String,
    number_of_entities_to_give_feedback_to: i32,
    show_responses_to: Json<Vec<FeedbackParticipantType>>,
    show_giver_name_to: Json<Vec<FeedbackParticipantType>>,
    show_recipient_name_to: Json<Vec<FeedbackParticipantType>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<QuestionRow> for QuestionRecord {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        // An unknown name here means the row was written by a newer schema.
        let corrupt = |e: AppError| {
            AppError::Internal(format!("Stored question '{}' is unreadable: {}", row.id, e))
        };

        let details = QuestionDetails {
            question_type: row.question_type.parse().map_err(corrupt)?,
            giver_type: row.giver_type.parse().map_err(corrupt)?,
            recipient_type: row.recipient_type.parse().map_err(corrupt)?,
            feedback_session_name: row.feedback_session_name,
            course_id: row.course_id,
            creator_email: row.creator_email,
            question_metadata: row.question_metadata,
            question_number: row.question_number,
            number_of_entities_to_give_feedback_to: row.number_of_entities_to_give_feedback_to,
            show_responses_to: row.show_responses_to.0,
            show_giver_name_to: row.show_giver_name_to.0,
            show_recipient_name_to: row.show_recipient_name_to.0,
        };

        Ok(QuestionRecord::from_parts(
            row.id,
            details,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// Postgres-backed question store.
#[derive(Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn insert(&self, record: &mut QuestionRecord) -> Result<String, AppError> {
        let id = record.id().map(str::to_string).unwrap_or_else(generate_id);

        // The caller's record only changes once the row is written.
        let mut staged = record.clone();
        staged.assign_id(id.clone());
        staged.on_before_store();

        let (created_at, updated_at) = staged.raw_timestamps();

        sqlx::query(
            r#"
            INSERT INTO feedback_questions
            (id, feedback_session_name, course_id, creator_email, question_metadata,
             question_number, question_type, giver_type, recipient_type,
             number_of_entities_to_give_feedback_to,
             show_responses_to, show_giver_name_to, show_recipient_name_to,
             created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(&id)
        .bind(staged.feedback_session_name())
        .bind(staged.course_id())
        .bind(staged.creator_email())
        .bind(staged.question_metadata())
        .bind(staged.question_number())
        .bind(staged.question_type().as_str())
        .bind(staged.giver_type().as_str())
        .bind(staged.recipient_type().as_str())
        .bind(staged.number_of_entities_to_give_feedback_to())
        .bind(Json(staged.show_responses_to()))
        .bind(Json(staged.show_giver_name_to()))
        .bind(Json(staged.show_recipient_name_to()))
        .bind(created_at)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict(format!("Question '{}' already exists", id)),
            other => {
                tracing::error!("Failed to insert question {}: {:?}", id, other);
                other
            }
        })?;

        *record = staged;
        Ok(id)
    }

    async fn update(&self, record: &mut QuestionRecord) -> Result<(), AppError> {
        let id = record
            .id()
            .ok_or_else(|| AppError::BadRequest("Cannot update a question without an id".to_string()))?
            .to_string();

        let mut staged = record.clone();
        staged.on_before_store();
        let (_, updated_at) = staged.raw_timestamps();

        let result = sqlx::query(
            r#"
            UPDATE feedback_questions SET
                feedback_session_name = $2,
                course_id = $3,
                creator_email = $4,
                question_metadata = $5,
                question_number = $6,
                question_type = $7,
                giver_type = $8,
                recipient_type = $9,
                number_of_entities_to_give_feedback_to = $10,
                show_responses_to = $11,
                show_giver_name_to = $12,
                show_recipient_name_to = $13,
                updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(&id)
        .bind(staged.feedback_session_name())
        .bind(staged.course_id())
        .bind(staged.creator_email())
        .bind(staged.question_metadata())
        .bind(staged.question_number())
        .bind(staged.question_type().as_str())
        .bind(staged.giver_type().as_str())
        .bind(staged.recipient_type().as_str())
        .bind(staged.number_of_entities_to_give_feedback_to())
        .bind(Json(staged.show_responses_to()))
        .bind(Json(staged.show_giver_name_to()))
        .bind(Json(staged.show_recipient_name_to()))
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update question {}: {:?}", id, e);
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Question '{}' not found", id)));
        }

        *record = staged;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<QuestionRecord>, AppError> {
        let query = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(QuestionRecord::try_from).transpose()
    }

    async fn find_by_session(
        &self,
        course_id: &str,
        feedback_session_name: &str,
    ) -> Result<Vec<QuestionRecord>, AppError> {
        let query = format!(
            "{} WHERE course_id = $1 AND feedback_session_name = $2 ORDER BY question_number",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(course_id)
            .bind(feedback_session_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list questions of {}/{}: {:?}", course_id, feedback_session_name, e);
                AppError::from(e)
            })?;

        rows.into_iter().map(QuestionRecord::try_from).collect()
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM feedback_questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
