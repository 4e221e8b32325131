// src/models/participant.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Roles taking part in a feedback question: who gives feedback, who receives it,
/// and who may see what afterwards.
///
/// Persisted by name (see `as_str`), never by discriminant, so reordering or
/// extending the enum does not corrupt stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackParticipantType {
    /// The session creator.
    #[serde(rename = "SELF")]
    Creator,
    #[serde(rename = "STUDENTS")]
    Students,
    #[serde(rename = "INSTRUCTORS")]
    Instructors,
    #[serde(rename = "TEAMS")]
    Teams,
    #[serde(rename = "OWN_TEAM")]
    OwnTeam,
    #[serde(rename = "OWN_TEAM_MEMBERS")]
    OwnTeamMembers,
    #[serde(rename = "OWN_TEAM_MEMBERS_INCLUDING_SELF")]
    OwnTeamMembersIncludingSelf,
    /// The recipient of a particular response.
    #[serde(rename = "RECEIVER")]
    Receiver,
    #[serde(rename = "RECEIVER_TEAM_MEMBERS")]
    ReceiverTeamMembers,
    #[serde(rename = "NONE")]
    Nobody,
}

impl FeedbackParticipantType {
    pub const ALL: [FeedbackParticipantType; 10] = [
        Self::Creator,
        Self::Students,
        Self::Instructors,
        Self::Teams,
        Self::OwnTeam,
        Self::OwnTeamMembers,
        Self::OwnTeamMembersIncludingSelf,
        Self::Receiver,
        Self::ReceiverTeamMembers,
        Self::Nobody,
    ];

    /// Stable external name used for storage and serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "SELF",
            Self::Students => "STUDENTS",
            Self::Instructors => "INSTRUCTORS",
            Self::Teams => "TEAMS",
            Self::OwnTeam => "OWN_TEAM",
            Self::OwnTeamMembers => "OWN_TEAM_MEMBERS",
            Self::OwnTeamMembersIncludingSelf => "OWN_TEAM_MEMBERS_INCLUDING_SELF",
            Self::Receiver => "RECEIVER",
            Self::ReceiverTeamMembers => "RECEIVER_TEAM_MEMBERS",
            Self::Nobody => "NONE",
        }
    }

    pub fn is_valid_giver(&self) -> bool {
        matches!(
            self,
            Self::Creator | Self::Students | Self::Instructors | Self::Teams
        )
    }

    pub fn is_valid_recipient(&self) -> bool {
        matches!(
            self,
            Self::Creator
                | Self::Students
                | Self::Instructors
                | Self::Teams
                | Self::OwnTeam
                | Self::OwnTeamMembers
                | Self::OwnTeamMembersIncludingSelf
                | Self::Nobody
        )
    }

    /// Roles that can appear in the show-responses / show-name lists.
    pub fn is_valid_visibility_target(&self) -> bool {
        matches!(
            self,
            Self::Students
                | Self::Instructors
                | Self::OwnTeamMembers
                | Self::Receiver
                | Self::ReceiverTeamMembers
        )
    }
}

impl fmt::Display for FeedbackParticipantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackParticipantType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown participant type '{}'", s)))
    }
}
