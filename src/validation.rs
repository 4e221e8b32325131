// src/validation.rs

use validator::Validate;

use crate::{
    error::AppError,
    models::{FeedbackParticipantType, QuestionDetails},
};

/// Stands for "as many recipients as exist" in `number_of_entities_to_give_feedback_to`.
pub const MAX_POSSIBLE_RECIPIENTS: i32 = -100;

/// Checks a question's fields and the consistency between its giver,
/// recipient and visibility settings.
///
/// Collects every problem before failing so callers can report them at once.
pub fn validate_question(details: &QuestionDetails) -> Result<(), AppError> {
    details.validate()?;

    let mut errors = Vec::new();
    check_participants(details, &mut errors);
    check_visibility(details, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(errors.join("; ")))
    }
}

fn check_participants(details: &QuestionDetails, errors: &mut Vec<String>) {
    use FeedbackParticipantType::*;

    if !details.giver_type.is_valid_giver() {
        errors.push(format!("{} is not a valid feedback giver", details.giver_type));
    }
    if !details.recipient_type.is_valid_recipient() {
        errors.push(format!("{} is not a valid feedback recipient", details.recipient_type));
    }

    let count = details.number_of_entities_to_give_feedback_to;
    match details.recipient_type {
        OwnTeam | Creator | Nobody => {
            if count != 1 {
                errors.push(format!(
                    "Number of entities to give feedback to must be 1 when the recipient is {}",
                    details.recipient_type
                ));
            }
        }
        _ => {
            if count < 1 && count != MAX_POSSIBLE_RECIPIENTS {
                errors.push(format!(
                    "Number of entities to give feedback to must be positive, got {}",
                    count
                ));
            }
        }
    }
}

fn check_visibility(details: &QuestionDetails, errors: &mut Vec<String>) {
    let lists = [
        ("showResponsesTo", &details.show_responses_to),
        ("showGiverNameTo", &details.show_giver_name_to),
        ("showRecipientNameTo", &details.show_recipient_name_to),
    ];

    for (name, targets) in lists {
        for (i, target) in targets.iter().enumerate() {
            if !target.is_valid_visibility_target() {
                errors.push(format!("{} is not a valid entry for {}", target, name));
            }
            if targets[..i].contains(target) {
                errors.push(format!("{} is listed more than once in {}", target, name));
            }
        }
    }

    // Seeing a name without seeing the response it belongs to makes no sense.
    for (name, targets) in &lists[1..] {
        for target in targets.iter() {
            if !details.show_responses_to.contains(target) {
                errors.push(format!(
                    "{} appears in {} but cannot see the responses",
                    target, name
                ));
            }
        }
    }
}
