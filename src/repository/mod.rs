// src/repository/mod.rs

use async_trait::async_trait;

use crate::{error::AppError, models::QuestionRecord};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryQuestionRepository;
pub use postgres::PgQuestionRepository;

/// Persistence boundary for feedback questions.
///
/// Every write calls [`QuestionRecord::on_before_store`] on the record just
/// before it is stored, so callers always see the `updated_at` that was written.
/// A failed write leaves the caller's record exactly as it was passed in.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Stores a new record and returns its id.
    ///
    /// A record without an id gets a fresh one. A record carrying an id keeps
    /// it, and the insert fails with `AppError::Conflict` if that id is taken.
    async fn insert(&self, record: &mut QuestionRecord) -> Result<String, AppError>;

    /// Overwrites an existing record. Fails with `NotFound` if it was never stored.
    async fn update(&self, record: &mut QuestionRecord) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<QuestionRecord>, AppError>;

    /// Questions of one session, ordered by question number.
    async fn find_by_session(
        &self,
        course_id: &str,
        feedback_session_name: &str,
    ) -> Result<Vec<QuestionRecord>, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
