// src/models/mod.rs

pub mod legacy;
pub mod participant;
pub mod question;
pub mod question_type;

pub use legacy::FeedbackQuestion;
pub use participant::FeedbackParticipantType;
pub use question::{QuestionDetails, QuestionRecord, UpdateQuestionRequest, default_timestamp};
pub use question_type::FeedbackQuestionType;
