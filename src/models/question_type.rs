// src/models/question_type.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of a feedback question. Stored by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackQuestionType {
    #[serde(rename = "TEXT")]
    Text,
    /// Multiple choice, single answer.
    #[serde(rename = "MCQ")]
    Mcq,
    /// Multiple choice, multiple answers.
    #[serde(rename = "MSQ")]
    Msq,
    #[serde(rename = "NUMSCALE")]
    NumScale,
    #[serde(rename = "CONSTSUM")]
    ConstSum,
    #[serde(rename = "CONTRIB")]
    Contrib,
    #[serde(rename = "RUBRIC")]
    Rubric,
    #[serde(rename = "RANK_OPTIONS")]
    RankOptions,
    #[serde(rename = "RANK_RECIPIENTS")]
    RankRecipients,
}

impl FeedbackQuestionType {
    pub const ALL: [FeedbackQuestionType; 9] = [
        Self::Text,
        Self::Mcq,
        Self::Msq,
        Self::NumScale,
        Self::ConstSum,
        Self::Contrib,
        Self::Rubric,
        Self::RankOptions,
        Self::RankRecipients,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Mcq => "MCQ",
            Self::Msq => "MSQ",
            Self::NumScale => "NUMSCALE",
            Self::ConstSum => "CONSTSUM",
            Self::Contrib => "CONTRIB",
            Self::Rubric => "RUBRIC",
            Self::RankOptions => "RANK_OPTIONS",
            Self::RankRecipients => "RANK_RECIPIENTS",
        }
    }
}

impl fmt::Display for FeedbackQuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackQuestionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown question type '{}'", s)))
    }
}
