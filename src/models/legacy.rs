// src/models/legacy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::{participant::FeedbackParticipantType, question_type::FeedbackQuestionType};

/// A question as exported by the previous storage format.
///
/// Export files hold one JSON object per line. Timestamps may be missing on
/// rows that predate timestamp tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackQuestion {
    pub id: String,
    pub feedback_session_name: String,
    pub course_id: String,
    pub creator_email: String,
    pub question_metadata: String,
    pub question_number: i32,
    pub question_type: FeedbackQuestionType,
    pub giver_type: FeedbackParticipantType,
    pub recipient_type: FeedbackParticipantType,
    pub number_of_entities_to_give_feedback_to: i32,
    #[serde(default)]
    pub show_responses_to: Vec<FeedbackParticipantType>,
    #[serde(default)]
    pub show_giver_name_to: Vec<FeedbackParticipantType>,
    #[serde(default)]
    pub show_recipient_name_to: Vec<FeedbackParticipantType>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parses a JSON-lines export, one question per line. Blank lines are skipped;
/// errors name the 1-based line they occurred on.
pub fn parse_export(content: &str) -> Result<Vec<FeedbackQuestion>, AppError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| AppError::BadRequest(format!("line {}: {}", n + 1, e)))
        })
        .collect()
}
