// src/models/question.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    legacy::FeedbackQuestion, participant::FeedbackParticipantType,
    question_type::FeedbackQuestionType,
};

/// 2011-01-01T00:00:00Z, in seconds since the Unix epoch.
const DEFAULT_TIMESTAMP_SECS: i64 = 1_293_840_000;

/// Value reported for a timestamp that was never set, so comparisons stay total.
pub fn default_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_TIMESTAMP_SECS, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// The descriptive part of a feedback question: everything except identity
/// and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionDetails {
    #[validate(length(min = 1, max = 100))]
    pub feedback_session_name: String,
    #[validate(length(min = 1, max = 64))]
    pub course_id: String,
    #[validate(email)]
    pub creator_email: String,
    /// Serialized question configuration. Opaque to this layer.
    #[validate(length(min = 1))]
    pub question_metadata: String,
    #[validate(range(min = 1))]
    pub question_number: i32,
    pub question_type: FeedbackQuestionType,
    pub giver_type: FeedbackParticipantType,
    pub recipient_type: FeedbackParticipantType,
    pub number_of_entities_to_give_feedback_to: i32,
    pub show_responses_to: Vec<FeedbackParticipantType>,
    pub show_giver_name_to: Vec<FeedbackParticipantType>,
    pub show_recipient_name_to: Vec<FeedbackParticipantType>,
}

/// A persisted feedback question.
///
/// A plain value: it performs no validation and no I/O. The only behaviour
/// it owns is the timestamp discipline below, which repositories drive by
/// calling [`QuestionRecord::on_before_store`] right before every write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRecord {
    /// Assigned by the store on first insert, fixed afterwards.
    id: Option<String>,

    #[serde(flatten)]
    details: QuestionDetails,

    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,

    /// Transient. When set, `touch_updated` is a no-op.
    #[serde(skip)]
    keep_update_timestamp: bool,
}

impl QuestionRecord {
    /// Builds a fresh question. The id is left for the store to assign.
    pub fn new(details: QuestionDetails) -> Self {
        Self::build(None, details)
    }

    /// Builds a question that already owns an identifier, e.g. when
    /// re-persisting it under a new storage format.
    pub fn with_id(id: impl Into<String>, details: QuestionDetails) -> Self {
        Self::build(Some(id.into()), details)
    }

    fn build(id: Option<String>, details: QuestionDetails) -> Self {
        let mut record = Self {
            id,
            details,
            created_at: None,
            updated_at: None,
            keep_update_timestamp: false,
        };
        record.touch_created(Utc::now());
        record
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Only the store calls this, and only an unset id is ever filled.
    pub(crate) fn assign_id(&mut self, id: String) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    pub fn details(&self) -> &QuestionDetails {
        &self.details
    }

    // Timestamps

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at.unwrap_or_else(default_timestamp)
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or_else(default_timestamp)
    }

    /// Raw stored values, `None` when never set. Used by the row mapping.
    pub fn raw_timestamps(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (self.created_at, self.updated_at)
    }

    /// Sets the creation time and applies the same value as the update time.
    pub fn touch_created(&mut self, timestamp: DateTime<Utc>) {
        self.created_at = Some(timestamp);
        self.touch_updated(timestamp);
    }

    pub fn touch_updated(&mut self, timestamp: DateTime<Utc>) {
        if !self.keep_update_timestamp {
            self.updated_at = Some(timestamp);
        }
    }

    /// Must be called immediately before the record is written.
    pub fn on_before_store(&mut self) {
        self.touch_updated(Utc::now());
    }

    /// Administrative writes set this so bulk rewrites leave `updated_at` alone.
    pub fn preserve_timestamps(&mut self, keep: bool) {
        self.keep_update_timestamp = keep;
    }

    pub fn is_preserving_timestamps(&self) -> bool {
        self.keep_update_timestamp
    }

    // Accessors

    pub fn feedback_session_name(&self) -> &str {
        &self.details.feedback_session_name
    }

    pub fn set_feedback_session_name(&mut self, name: impl Into<String>) {
        self.details.feedback_session_name = name.into();
    }

    pub fn course_id(&self) -> &str {
        &self.details.course_id
    }

    pub fn set_course_id(&mut self, course_id: impl Into<String>) {
        self.details.course_id = course_id.into();
    }

    pub fn creator_email(&self) -> &str {
        &self.details.creator_email
    }

    pub fn set_creator_email(&mut self, email: impl Into<String>) {
        self.details.creator_email = email.into();
    }

    pub fn question_metadata(&self) -> &str {
        &self.details.question_metadata
    }

    pub fn set_question_metadata(&mut self, metadata: impl Into<String>) {
        self.details.question_metadata = metadata.into();
    }

    pub fn question_number(&self) -> i32 {
        self.details.question_number
    }

    pub fn set_question_number(&mut self, number: i32) {
        self.details.question_number = number;
    }

    pub fn question_type(&self) -> FeedbackQuestionType {
        self.details.question_type
    }

    pub fn set_question_type(&mut self, question_type: FeedbackQuestionType) {
        self.details.question_type = question_type;
    }

    pub fn giver_type(&self) -> FeedbackParticipantType {
        self.details.giver_type
    }

    pub fn set_giver_type(&mut self, giver_type: FeedbackParticipantType) {
        self.details.giver_type = giver_type;
    }

    pub fn recipient_type(&self) -> FeedbackParticipantType {
        self.details.recipient_type
    }

    pub fn set_recipient_type(&mut self, recipient_type: FeedbackParticipantType) {
        self.details.recipient_type = recipient_type;
    }

    pub fn number_of_entities_to_give_feedback_to(&self) -> i32 {
        self.details.number_of_entities_to_give_feedback_to
    }

    pub fn set_number_of_entities_to_give_feedback_to(&mut self, count: i32) {
        self.details.number_of_entities_to_give_feedback_to = count;
    }

    pub fn show_responses_to(&self) -> &[FeedbackParticipantType] {
        &self.details.show_responses_to
    }

    pub fn set_show_responses_to(&mut self, targets: Vec<FeedbackParticipantType>) {
        self.details.show_responses_to = targets;
    }

    pub fn show_giver_name_to(&self) -> &[FeedbackParticipantType] {
        &self.details.show_giver_name_to
    }

    pub fn set_show_giver_name_to(&mut self, targets: Vec<FeedbackParticipantType>) {
        self.details.show_giver_name_to = targets;
    }

    pub fn show_recipient_name_to(&self) -> &[FeedbackParticipantType] {
        &self.details.show_recipient_name_to
    }

    pub fn set_show_recipient_name_to(&mut self, targets: Vec<FeedbackParticipantType>) {
        self.details.show_recipient_name_to = targets;
    }

    /// Reassembles a record from storage without touching any timestamp.
    pub(crate) fn from_parts(
        id: String,
        details: QuestionDetails,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Some(id),
            details,
            created_at,
            updated_at,
            keep_update_timestamp: false,
        }
    }
}

/// Field-for-field copy of the legacy representation, id and timestamps included.
impl From<&FeedbackQuestion> for QuestionRecord {
    fn from(old: &FeedbackQuestion) -> Self {
        Self {
            id: Some(old.id.clone()),
            details: QuestionDetails {
                feedback_session_name: old.feedback_session_name.clone(),
                course_id: old.course_id.clone(),
                creator_email: old.creator_email.clone(),
                question_metadata: old.question_metadata.clone(),
                question_number: old.question_number,
                question_type: old.question_type,
                giver_type: old.giver_type,
                recipient_type: old.recipient_type,
                number_of_entities_to_give_feedback_to: old
                    .number_of_entities_to_give_feedback_to,
                show_responses_to: old.show_responses_to.clone(),
                show_giver_name_to: old.show_giver_name_to.clone(),
                show_recipient_name_to: old.show_recipient_name_to.clone(),
            },
            created_at: old.created_at,
            updated_at: old.updated_at,
            keep_update_timestamp: false,
        }
    }
}

/// DTO for a partial update. Absent fields are left as they are.
#[derive(Debug, Default)]
pub struct UpdateQuestionRequest {
    pub feedback_session_name: Option<String>,
    pub question_metadata: Option<String>,
    pub question_number: Option<i32>,
    pub question_type: Option<FeedbackQuestionType>,
    pub giver_type: Option<FeedbackParticipantType>,
    pub recipient_type: Option<FeedbackParticipantType>,
    pub number_of_entities_to_give_feedback_to: Option<i32>,
    pub show_responses_to: Option<Vec<FeedbackParticipantType>>,
    pub show_giver_name_to: Option<Vec<FeedbackParticipantType>>,
    pub show_recipient_name_to: Option<Vec<FeedbackParticipantType>>,
}

impl UpdateQuestionRequest {
    /// Applies every present field through the record's setters.
    pub fn apply_to(self, record: &mut QuestionRecord) {
        if let Some(name) = self.feedback_session_name {
            record.set_feedback_session_name(name);
        }
        if let Some(metadata) = self.question_metadata {
            record.set_question_metadata(metadata);
        }
        if let Some(number) = self.question_number {
            record.set_question_number(number);
        }
        if let Some(question_type) = self.question_type {
            record.set_question_type(question_type);
        }
        if let Some(giver_type) = self.giver_type {
            record.set_giver_type(giver_type);
        }
        if let Some(recipient_type) = self.recipient_type {
            record.set_recipient_type(recipient_type);
        }
        if let Some(count) = self.number_of_entities_to_give_feedback_to {
            record.set_number_of_entities_to_give_feedback_to(count);
        }
        if let Some(targets) = self.show_responses_to {
            record.set_show_responses_to(targets);
        }
        if let Some(targets) = self.show_giver_name_to {
            record.set_show_giver_name_to(targets);
        }
        if let Some(targets) = self.show_recipient_name_to {
            record.set_show_recipient_name_to(targets);
        }
    }
}
