// tests/question_record_tests.rs

use chrono::{Duration, TimeZone, Utc};
use question_store::models::{
    FeedbackParticipantType as P, FeedbackQuestion, FeedbackQuestionType, QuestionDetails,
    QuestionRecord, default_timestamp,
};

fn team_question() -> QuestionDetails {
    QuestionDetails {
        feedback_session_name: "Mid-term peer review".to_string(),
        course_id: "CS2103-2024".to_string(),
        creator_email: "instructor@uni.edu".to_string(),
        question_metadata: "How well did your team communicate?".to_string(),
        question_number: 2,
        question_type: FeedbackQuestionType::Text,
        giver_type: P::Students,
        recipient_type: P::OwnTeam,
        number_of_entities_to_give_feedback_to: 1,
        show_responses_to: vec![P::Instructors, P::Receiver, P::OwnTeamMembers],
        show_giver_name_to: vec![P::Instructors],
        show_recipient_name_to: vec![P::Receiver, P::Instructors],
    }
}

#[test]
fn new_question_has_no_id_and_equal_timestamps() {
    // Arrange
    let before = Utc::now();

    // Act
    let record = QuestionRecord::new(team_question());

    // Assert
    assert_eq!(record.id(), None);
    assert_eq!(record.created_at(), record.updated_at());
    assert!(record.created_at() >= before);
    assert!(record.created_at() <= Utc::now());
}

#[test]
fn new_question_keeps_fields_and_visibility_order() {
    let record = QuestionRecord::new(team_question());

    assert_eq!(record.question_number(), 2);
    assert_eq!(record.giver_type(), P::Students);
    assert_eq!(record.recipient_type(), P::OwnTeam);
    assert_eq!(record.number_of_entities_to_give_feedback_to(), 1);
    assert_eq!(
        record.show_responses_to(),
        &[P::Instructors, P::Receiver, P::OwnTeamMembers]
    );
    assert_eq!(record.show_recipient_name_to(), &[P::Receiver, P::Instructors]);
    assert_eq!(record.creator_email(), "instructor@uni.edu");
}

#[test]
fn question_with_explicit_id_keeps_it() {
    let record = QuestionRecord::with_id("agx0ZWFtbWF0ZXMtam9lchQLEg", team_question());

    assert_eq!(record.id(), Some("agx0ZWFtbWF0ZXMtam9lchQLEg"));
    assert_eq!(record.created_at(), record.updated_at());
}

#[test]
fn touch_updated_respects_preserve_flag() {
    let mut record = QuestionRecord::new(team_question());
    let later = record.created_at() + Duration::hours(1);
    let much_later = record.created_at() + Duration::hours(2);

    record.touch_updated(later);
    assert_eq!(record.updated_at(), later);

    record.preserve_timestamps(true);
    record.touch_updated(much_later);
    assert_eq!(record.updated_at(), later);
}

#[test]
fn touch_created_also_sets_updated() {
    let mut record = QuestionRecord::new(team_question());
    let ts = Utc.with_ymd_and_hms(2020, 5, 17, 8, 30, 0).unwrap();

    record.touch_created(ts);

    assert_eq!(record.created_at(), ts);
    assert_eq!(record.updated_at(), ts);
}

#[test]
fn touch_created_under_preserve_flag_only_moves_created() {
    let mut record = QuestionRecord::new(team_question());
    let original_update = record.updated_at();
    let ts = original_update + Duration::days(1);

    record.preserve_timestamps(true);
    record.touch_created(ts);

    assert_eq!(record.created_at(), ts);
    assert_eq!(record.updated_at(), original_update);
}

#[test]
fn before_store_changes_updated_only_once_when_suppressed_second_time() {
    // Arrange
    let mut record = QuestionRecord::new(team_question());
    let old = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
    record.touch_created(old);

    // Act: first store refreshes, second is administrative
    record.on_before_store();
    let after_first = record.updated_at();
    record.preserve_timestamps(true);
    record.on_before_store();

    // Assert
    assert!(after_first > old);
    assert_eq!(record.updated_at(), after_first);
    assert_eq!(record.created_at(), old);
}

#[test]
fn legacy_question_is_copied_field_for_field() {
    // Arrange
    let created = Utc.with_ymd_and_hms(2014, 2, 3, 4, 5, 6).unwrap();
    let updated = Utc.with_ymd_and_hms(2014, 3, 1, 0, 0, 0).unwrap();
    let legacy = FeedbackQuestion {
        id: "legacy-42".to_string(),
        feedback_session_name: "Final evaluation".to_string(),
        course_id: "MA1101".to_string(),
        creator_email: "prof@uni.edu".to_string(),
        question_metadata: "{\"questionText\":\"Rate your tutor\"}".to_string(),
        question_number: 7,
        question_type: FeedbackQuestionType::NumScale,
        giver_type: P::Students,
        recipient_type: P::Instructors,
        number_of_entities_to_give_feedback_to: -100,
        show_responses_to: vec![P::Receiver, P::Instructors],
        show_giver_name_to: vec![],
        show_recipient_name_to: vec![P::Receiver],
        created_at: Some(created),
        updated_at: Some(updated),
    };
    let snapshot = legacy.clone();

    // Act
    let record = QuestionRecord::from(&legacy);

    // Assert
    assert_eq!(legacy, snapshot);
    assert_eq!(record.id(), Some(legacy.id.as_str()));
    assert_eq!(record.feedback_session_name(), legacy.feedback_session_name);
    assert_eq!(record.course_id(), legacy.course_id);
    assert_eq!(record.creator_email(), legacy.creator_email);
    assert_eq!(record.question_metadata(), legacy.question_metadata);
    assert_eq!(record.question_number(), legacy.question_number);
    assert_eq!(record.question_type(), legacy.question_type);
    assert_eq!(record.giver_type(), legacy.giver_type);
    assert_eq!(record.recipient_type(), legacy.recipient_type);
    assert_eq!(
        record.number_of_entities_to_give_feedback_to(),
        legacy.number_of_entities_to_give_feedback_to
    );
    assert_eq!(record.show_responses_to(), legacy.show_responses_to.as_slice());
    assert_eq!(record.show_giver_name_to(), legacy.show_giver_name_to.as_slice());
    assert_eq!(record.show_recipient_name_to(), legacy.show_recipient_name_to.as_slice());
    assert_eq!(record.created_at(), created);
    assert_eq!(record.updated_at(), updated);
}

#[test]
fn missing_timestamps_read_as_default() {
    let legacy: FeedbackQuestion = serde_json::from_value(serde_json::json!({
        "id": "old-1",
        "feedback_session_name": "Week 1",
        "course_id": "CS1010",
        "creator_email": "a@b.c",
        "question_metadata": "What went well?",
        "question_number": 1,
        "question_type": "TEXT",
        "giver_type": "STUDENTS",
        "recipient_type": "SELF",
        "number_of_entities_to_give_feedback_to": 1
    }))
    .unwrap();

    let record = QuestionRecord::from(&legacy);

    assert_eq!(record.created_at(), default_timestamp());
    assert_eq!(record.updated_at(), default_timestamp());
    assert_eq!(
        default_timestamp(),
        Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(record.raw_timestamps(), (None, None));
}

#[test]
fn setters_write_fields_without_validation() {
    let mut record = QuestionRecord::new(team_question());

    record.set_question_number(-5);
    record.set_recipient_type(P::Receiver);
    record.set_show_giver_name_to(vec![P::Nobody]);
    record.set_course_id("");

    assert_eq!(record.question_number(), -5);
    assert_eq!(record.recipient_type(), P::Receiver);
    assert_eq!(record.show_giver_name_to(), &[P::Nobody]);
    assert_eq!(record.course_id(), "");
}

#[test]
fn enums_serialize_by_stable_name() {
    let record = QuestionRecord::with_id("q1", team_question());

    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["giver_type"], "STUDENTS");
    assert_eq!(json["recipient_type"], "OWN_TEAM");
    assert_eq!(json["question_type"], "TEXT");
    assert_eq!(
        json["show_responses_to"],
        serde_json::json!(["INSTRUCTORS", "RECEIVER", "OWN_TEAM_MEMBERS"])
    );
    assert!(json.get("keep_update_timestamp").is_none());
}

#[test]
fn enum_names_parse_back() {
    for p in P::ALL {
        assert_eq!(p.as_str().parse::<P>().unwrap(), p);
    }
    for t in FeedbackQuestionType::ALL {
        assert_eq!(t.as_str().parse::<FeedbackQuestionType>().unwrap(), t);
    }
    assert_eq!("SELF".parse::<P>().unwrap(), P::Creator);
    assert!("EVERYONE".parse::<P>().is_err());
    assert!("ESSAY".parse::<FeedbackQuestionType>().is_err());
}
