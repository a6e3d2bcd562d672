// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-by-rule classifier tests.

use aide_core::types::{EventTarget, RecordRef, Speaker};
use aide_core::{ActionRequest, AideError, Attachment, Category, Draft, SessionState};
use aide_resolve::{DateResolver, PlaceResolver};
use aide_router::Classifier;
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};

fn ist() -> FixedOffset {
    FixedOffset::east_opt(19_800).unwrap()
}

/// Wednesday 2026-10-14 10:00 local.
fn now() -> DateTime<Utc> {
    ist()
        .with_ymd_and_hms(2026, 10, 14, 10, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn classifier() -> Classifier {
    Classifier::new(DateResolver::new(ist()), PlaceResolver::default())
}

fn classify(text: &str) -> ActionRequest {
    classifier()
        .classify(text, &SessionState::new(), now())
        .expect("should classify")
}

fn with_draft() -> SessionState {
    let mut state = SessionState::new();
    state.draft = Some(Draft {
        to: "asha@example.com".into(),
        cc: vec![],
        bcc: vec![],
        subject: "Hello".into(),
        body: "Hi Asha".into(),
        attachments: vec![],
        created_at: now(),
        is_reply: false,
        reply_source_id: None,
    });
    state
}

fn classify_with_draft(text: &str) -> ActionRequest {
    classifier()
        .classify(text, &with_draft(), now())
        .expect("should classify")
}

#[test]
fn confirm_words_need_a_draft() {
    assert_eq!(classify_with_draft("OK"), ActionRequest::Confirm { accepted: true });
    assert_eq!(classify_with_draft(" y "), ActionRequest::Confirm { accepted: true });
    assert_eq!(classify_with_draft("don't send"), ActionRequest::Confirm { accepted: false });
    assert!(matches!(classify("ok"), ActionRequest::FreeformChat { .. }));
}

#[test]
fn cancel_with_draft_is_not_an_event_command() {
    assert_eq!(classify_with_draft("cancel"), ActionRequest::Confirm { accepted: false });
}

#[test]
fn edit_strips_leading_verb() {
    assert_eq!(
        classify_with_draft("edit make it more formal"),
        ActionRequest::Edit {
            instruction: "make it more formal".into()
        }
    );
    assert_eq!(
        classify_with_draft("change subject to Lunch plans"),
        ActionRequest::Edit {
            instruction: "change subject to Lunch plans".into()
        }
    );
}

#[test]
fn cc_phrase_with_draft_is_edit() {
    assert_eq!(
        classify_with_draft("add cc ravi@example.com"),
        ActionRequest::Edit {
            instruction: "add cc ravi@example.com".into()
        }
    );
}

#[test]
fn exact_read_phrases() {
    for phrase in ["emails", "Show my emails", "my inbox"] {
        assert_eq!(
            classify(phrase),
            ActionRequest::ReadRecords {
                count: 5,
                category: Category::Primary
            },
            "{phrase}"
        );
    }
}

#[test]
fn translate_ordinal_and_language() {
    assert_eq!(
        classify("translate first email to hindi"),
        ActionRequest::TranslateRecord {
            index: 1,
            target_language: "Hindi".into()
        }
    );
    assert_eq!(
        classify("translate email 4 in french"),
        ActionRequest::TranslateRecord {
            index: 4,
            target_language: "French".into()
        }
    );
}

#[test]
fn flight_text_is_never_a_translation() {
    assert!(matches!(
        classify("flight from delhi to mumbai on 10 november"),
        ActionRequest::SearchFlights { .. }
    ));
}

#[test]
fn compose_extracts_all_fields() {
    let mut state = SessionState::new();
    let attachment = Attachment {
        name: "plan.pdf".into(),
        media_type: "application/pdf".into(),
        size_bytes: 1536,
        storage_ref: "/tmp/plan.pdf".into(),
    };
    state.pending_attachments.push(attachment.clone());

    let request = classifier()
        .classify(
            "send email to asha@example.com cc b@x.com subject Plan message please review the plan",
            &state,
            now(),
        )
        .unwrap();
    assert_eq!(
        request,
        ActionRequest::Compose {
            to: Some("asha@example.com".into()),
            subject: "Plan".into(),
            context: "please review the plan".into(),
            cc: vec!["b@x.com".into()],
            bcc: vec![],
            attachments: vec![attachment],
        }
    );
}

#[test]
fn compose_without_recipient_or_subject_uses_defaults() {
    match classify("write email to the landlord") {
        ActionRequest::Compose {
            to,
            subject,
            context,
            ..
        } => {
            assert_eq!(to, None);
            assert_eq!(subject, "Message from AI Assistant");
            assert_eq!(
                context,
                "Please compose an appropriate email for: write email to the landlord"
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn bare_address_after_email_composes() {
    assert!(matches!(
        classify("email ravi@example.com about the invoice"),
        ActionRequest::Compose { .. }
    ));
}

#[test]
fn read_with_count_and_category() {
    assert_eq!(
        classify("check emails 3 social"),
        ActionRequest::ReadRecords {
            count: 3,
            category: Category::Social
        }
    );
    assert_eq!(
        classify("show emails 99"),
        ActionRequest::ReadRecords {
            count: 20,
            category: Category::Primary
        }
    );
}

#[test]
fn range_beats_read_count() {
    match classify("show emails between 1 october and 5 october") {
        ActionRequest::ReadRecordsInRange { start, end } => {
            assert_eq!((start.month(), start.day(), start.hour()), (10, 1, 0));
            assert_eq!((end.month(), end.day(), end.hour()), (10, 5, 23));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn detail_patterns() {
    for text in ["email 2 details", "show email 2", "details of email 2", "message 2"] {
        assert_eq!(
            classify(text),
            ActionRequest::ViewRecord {
                target: Some(RecordRef::Index(2))
            },
            "{text}"
        );
    }
    assert_eq!(classify("details"), ActionRequest::ViewRecord { target: None });
}

#[test]
fn reply_strips_trigger() {
    assert_eq!(
        classify("reply saying I will attend"),
        ActionRequest::Reply {
            context: "saying I will attend".into()
        }
    );
}

#[test]
fn event_words_win_over_mail_words() {
    assert_eq!(
        classify("email me my upcoming meetings list"),
        ActionRequest::ListEvents
    );
}

#[test]
fn schedule_event_property() {
    match classify("create event called standup tomorrow at 9am") {
        ActionRequest::ScheduleEvent { title, start, .. } => {
            assert_eq!(title, "standup");
            assert_eq!(start.weekday(), chrono::Weekday::Thu);
            assert_eq!((start.hour(), start.minute()), (9, 0));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn delete_all_events() {
    assert_eq!(classify("delete all events"), ActionRequest::DeleteAllEvents);
}

#[test]
fn delete_event_by_title() {
    assert_eq!(
        classify("remove event named 'Demo day'"),
        ActionRequest::DeleteEvent {
            target: EventTarget::Title("Demo day".into())
        }
    );
}

#[test]
fn unresolvable_event_time_is_a_failure() {
    let err = classifier()
        .classify("schedule a call called sync", &SessionState::new(), now())
        .unwrap_err();
    assert!(matches!(err, AideError::DateUnresolved(_)));
    assert!(err.to_string().contains("Could not recognize the event time"));
}

#[test]
fn flight_resolves_cities_and_date() {
    match classify("find flights from Bombay to new delhi on 20 november") {
        ActionRequest::SearchFlights { query } => {
            assert_eq!(query.origin_code, "BOM");
            assert_eq!(query.destination_code, "DEL");
            assert_eq!(query.date.to_string(), "2026-11-20");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn unknown_flight_city_falls_through_to_chat() {
    assert!(matches!(
        classify("flight from atlantis to mumbai tomorrow"),
        ActionRequest::FreeformChat { .. }
    ));
}

#[test]
fn flight_without_usable_date_falls_through_to_chat() {
    for text in ["flight from delhi to goa", "flight from delhi to goa someday"] {
        assert!(
            matches!(classify(text), ActionRequest::FreeformChat { .. }),
            "{text}"
        );
    }
}

#[test]
fn folder_keyword_lists_folder() {
    assert_eq!(
        classify("any spam today?"),
        ActionRequest::ReadRecords {
            count: 5,
            category: Category::Spam
        }
    );
}

#[test]
fn everything_else_is_chat() {
    assert_eq!(
        classify("what is the capital of peru"),
        ActionRequest::FreeformChat {
            text: "what is the capital of peru".into()
        }
    );
}

#[test]
fn classification_does_not_mutate_history() {
    let mut state = SessionState::new();
    state.push_turn(Speaker::User, "hi");
    let before = state.clone();
    let _ = classifier().classify("show emails", &state, now());
    assert_eq!(state, before);
}

#[test]
fn request_serializes_for_parse_output() {
    let json = serde_json::to_value(classify("show emails 2 promotions")).unwrap();
    assert_eq!(json["action"], "read_records");
    assert_eq!(json["count"], 2);
    assert_eq!(json["category"], "promotions");
}
