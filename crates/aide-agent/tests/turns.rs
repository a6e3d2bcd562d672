// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end turn tests over mock collaborators.

use std::sync::Arc;

use aide_agent::{MemorySessionStore, RESET_REPLY};
use aide_core::types::{CalendarEvent, HolidayCalendar, Speaker};
use aide_core::{AideError, Category, SessionId};
use aide_test_utils::{attachment, sample_record, MockMemory, TestHarness};
use chrono::{FixedOffset, TimeZone};

const DRAFT_REQUEST: &str =
    "send email to asha@example.com subject Plan message please review the plan";

fn mailbox() -> Vec<aide_core::MailRecord> {
    vec![
        sample_record(1, "Fri, 02 Oct 2026 09:00:00 +0530"),
        sample_record(2, "Sat, 10 Oct 2026 18:45:00 +0530"),
        sample_record(3, "Sun, 20 Sep 2026 07:10:00 +0000 (UTC)"),
    ]
}

fn harness() -> TestHarness {
    TestHarness::builder().with_records(mailbox()).build()
}

#[tokio::test]
async fn list_then_view_by_index() {
    let h = harness();
    let listing = h.reply("show emails").await;
    assert!(listing.starts_with("📧 <strong>Primary Inbox (3 emails):</strong>"));
    assert!(listing.contains("data-email-index='3'"));

    let detail = h.reply("email 2 details").await;
    assert!(detail.contains("<pre>Full body of message 2</pre>"));
    assert_eq!(h.mail.list_calls().await, vec![(5, Category::Primary)]);

    let status = h.assistant.status(&h.session_id).await.unwrap();
    assert!(status.has_email_selected);
    assert_eq!(status.selected_email.unwrap().id, "msg-2");
}

#[tokio::test]
async fn view_before_listing_is_a_failure() {
    let h = harness();
    assert_eq!(
        h.reply("email 4 details").await,
        "❌ Email 4 not found. Please list emails first."
    );
}

#[tokio::test]
async fn compose_and_send() {
    let h = harness();
    let draft = h.reply(DRAFT_REQUEST).await;
    assert!(draft.starts_with("📝 Email draft created!<br><br><strong>To:</strong> asha@example.com"));
    assert!(draft.contains("<strong>Subject:</strong> Plan"));
    assert!(h.assistant.status(&h.session_id).await.unwrap().has_draft);

    let sent = h.reply("ok").await;
    assert_eq!(
        sent,
        "✅ Email sent successfully!<br>📧 To: asha@example.com<br>📧 Message ID: mock-sent-1"
    );

    let outbox = h.mail.sent().await;
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].subject, "Plan");
    assert!(outbox[0].body.ends_with("Best regards,\nRMM"));
    assert!(!h.assistant.status(&h.session_id).await.unwrap().has_draft);
}

#[tokio::test]
async fn compose_without_recipient_asks_for_one() {
    let h = harness();
    assert_eq!(
        h.reply("write email to the landlord").await,
        "❌ Please specify recipient email address."
    );
    assert!(!h.assistant.status(&h.session_id).await.unwrap().has_draft);
}

#[tokio::test]
async fn failed_send_keeps_the_draft() {
    let h = harness();
    h.reply(DRAFT_REQUEST).await;
    h.mail.fail_next_send("smtp unavailable").await;

    assert_eq!(h.reply("send").await, "❌ Failed to send email: smtp unavailable");
    assert!(h.assistant.status(&h.session_id).await.unwrap().has_draft);

    assert!(h.reply("send").await.starts_with("✅ Email sent successfully!"));
    assert_eq!(h.mail.sent().await.len(), 1);
}

#[tokio::test]
async fn cancel_releases_adopted_attachments() {
    let h = harness();
    let output = h
        .send_with(
            "send email to asha@example.com subject Deck message see the attached deck",
            vec![attachment("deck.pdf", 2048)],
        )
        .await
        .unwrap();
    assert!(output.reply.contains("📎 Attachments (1):"));
    assert!(output.reply.contains("📄 deck.pdf (2.0 KB)"));
    assert!(h.staging.released().await.is_empty());

    assert_eq!(h.reply("cancel").await, "❌ Email draft cancelled.");
    let released = h.staging.released().await;
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].name, "deck.pdf");
}

#[tokio::test]
async fn replacing_a_draft_releases_its_files() {
    let h = harness();
    h.send_with(DRAFT_REQUEST, vec![attachment("deck.pdf", 2048)])
        .await
        .unwrap();
    h.reply("send email to ravi@example.com subject Other message something else")
        .await;

    let released = h.staging.released().await;
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].name, "deck.pdf");

    h.reply("bye").await;
    assert_eq!(h.staging.released().await.len(), 1);
}

#[tokio::test]
async fn cancel_after_edits_keeps_the_listing() {
    let h = harness();
    h.reply("show emails").await;
    h.reply(DRAFT_REQUEST).await;
    h.reply("add cc b@x.com").await;
    h.reply("change subject to Revised plan").await;

    assert_eq!(h.reply("cancel").await, "❌ Email draft cancelled.");
    assert!(!h.assistant.status(&h.session_id).await.unwrap().has_draft);

    let detail = h.reply("email 2 details").await;
    assert!(detail.contains("<pre>Full body of message 2</pre>"));
    assert_eq!(h.mail.list_calls().await, vec![(5, Category::Primary)]);
    assert!(h.mail.sent().await.is_empty());
}

#[tokio::test]
async fn sent_attachments_are_counted_and_released() {
    let h = harness();
    h.send_with(
        DRAFT_REQUEST,
        vec![attachment("a.txt", 10), attachment("b.txt", 20)],
    )
    .await
    .unwrap();
    let sent = h.reply("yes").await;
    assert!(sent.starts_with("✅ Email sent successfully with 2 attachments!"));
    assert_eq!(h.mail.sent().await[0].attachments.len(), 2);
    assert_eq!(h.staging.released().await.len(), 2);
}

#[tokio::test]
async fn unadopted_uploads_are_released_after_the_turn() {
    let h = harness();
    let output = h
        .send_with("what is the capital of peru", vec![attachment("notes.txt", 5)])
        .await
        .unwrap();
    assert_eq!(output.history[0].text, "what is the capital of peru [📎 1 files: notes.txt]");
    assert_eq!(h.staging.released().await.len(), 1);
}

#[tokio::test]
async fn cc_and_bcc_edits() {
    let h = harness();
    h.reply(DRAFT_REQUEST).await;

    assert!(h.reply("add cc b@x.com").await.starts_with("✅ Added CC: b@x.com<br><br>"));
    assert!(
        h.reply("add cc b@x.com")
            .await
            .starts_with("⚠️ b@x.com is already in CC list")
    );
    assert!(h.reply("add bcc boss@corp.com").await.contains("<strong>BCC:</strong> boss@corp.com"));
    assert_eq!(
        h.reply("add bcc nobody").await,
        "❌ Please provide a valid email address for BCC."
    );

    let status = h.assistant.status(&h.session_id).await.unwrap();
    let draft = status.draft.unwrap();
    assert_eq!(draft.cc, vec!["b@x.com"]);
    assert_eq!(draft.bcc, vec!["boss@corp.com"]);
}

#[tokio::test]
async fn subject_and_recipient_edits_skip_generation() {
    let h = harness();
    h.reply(DRAFT_REQUEST).await;
    let calls_before = h.generator.prompts().await.len();

    assert!(
        h.reply("change subject to Final plan")
            .await
            .starts_with("✅ Subject changed to: Final plan")
    );
    assert!(
        h.reply("change recipient to ravi@example.com")
            .await
            .starts_with("✅ Recipient changed to: ravi@example.com")
    );
    assert_eq!(h.generator.prompts().await.len(), calls_before);

    let draft = h.assistant.status(&h.session_id).await.unwrap().draft.unwrap();
    assert_eq!(draft.to, "ravi@example.com");
    assert_eq!(draft.subject, "Final plan");
}

#[tokio::test]
async fn content_edit_rewrites_body() {
    let h = harness();
    h.reply(DRAFT_REQUEST).await;
    h.generator
        .add_response("Here is the updated email content: Shorter text")
        .await;

    let reply = h.reply("edit make it shorter").await;
    assert!(reply.starts_with("✏️ Email content updated!"));
    assert!(reply.contains("Shorter text"));
    assert!(!reply.contains("Here is the updated"));

    let prompts = h.generator.prompts().await;
    let (_, user) = prompts.last().unwrap();
    assert!(user.contains("\"make it shorter\""));
}

#[tokio::test]
async fn failed_content_edit_leaves_draft_unchanged() {
    let h = harness();
    h.reply(DRAFT_REQUEST).await;
    h.generator.add_failure("model overloaded").await;

    assert_eq!(
        h.reply("edit make it formal").await,
        "❌ Could not update the email content."
    );
    assert!(h.assistant.status(&h.session_id).await.unwrap().has_draft);
    let output = h.send("send").await.unwrap();
    assert!(output.reply.starts_with("✅"));
    assert!(h.mail.sent().await[0].body.starts_with("mock response"));
}

#[tokio::test]
async fn reply_to_viewed_message() {
    let h = harness();
    h.reply("show emails").await;
    h.reply("email 1 details").await;

    let draft = h.reply("reply saying I will attend").await;
    assert!(draft.starts_with("📧 Reply draft created!"));
    assert!(draft.contains("<strong>To:</strong> sender1@example.com"));
    assert!(draft.contains("<strong>Subject:</strong> Re: Subject 1"));

    h.reply("ok").await;
    assert_eq!(h.mail.sent().await[0].subject, "Re: Subject 1");
}

#[tokio::test]
async fn reply_without_selection() {
    let h = harness();
    assert_eq!(
        h.reply("reply saying I will attend").await,
        "❌ No email selected to reply to. Please view an email first."
    );
}

#[tokio::test]
async fn range_listing_filters_by_date() {
    let h = harness();
    let reply = h.reply("show emails between 1 october and 5 october").await;
    assert!(reply.starts_with("📧 <strong>Emails between Oct 01, 2026 and Oct 05, 2026:</strong>"));
    assert!(reply.contains("Subject 1"));
    assert!(!reply.contains("Subject 2"));
    assert!(!reply.contains("Subject 3"));
    assert_eq!(h.mail.list_calls().await, vec![(50, Category::Primary)]);
}

#[tokio::test]
async fn translate_fetches_when_nothing_is_cached() {
    let h = harness();
    h.generator.add_response("Sandesh 1 ka poora bhaag").await;

    let reply = h.reply("translate first email to hindi").await;
    assert!(reply.starts_with("📧 <strong>Email Translated to Hindi:</strong>"));
    assert!(reply.contains("<pre>Full body of message 1</pre>"));
    assert!(reply.contains("<pre>Sandesh 1 ka poora bhaag</pre>"));
    assert_eq!(h.mail.list_calls().await, vec![(20, Category::Primary)]);
}

#[tokio::test]
async fn calendar_round_trip() {
    let h = harness();
    let created = h.reply("create event called standup tomorrow at 9am").await;
    assert!(created.starts_with("✅ Event created successfully!"));
    assert!(created.contains("15 October 2026, 09:00 AM IST"));
    assert_eq!(h.calendar.created().await[0].duration_minutes, 60);

    let listing = h.reply("email me my upcoming meetings list").await;
    assert!(listing.contains("<b>1. 📋 Event:</b> standup<br>"));

    let deleted = h.reply("remove event named 'Standup'").await;
    assert_eq!(deleted, "🗑️ <b>Event Deletion:</b><br>Event deleted successfully!<br>");
    assert!(h.calendar.events().await.is_empty());
}

#[tokio::test]
async fn deleting_an_unknown_title_fails() {
    let h = harness();
    let reply = h.reply("remove event named 'Retro'").await;
    assert!(reply.starts_with("❌ No upcoming event titled 'Retro'"));
}

#[tokio::test]
async fn holidays_for_next_month() {
    let h = harness();
    let ist = FixedOffset::east_opt(19_800).unwrap();
    h.calendar
        .add_holiday_calendar(
            HolidayCalendar {
                id: "in".into(),
                name: "Holidays in India".into(),
            },
            vec![
                CalendarEvent {
                    id: "h1".into(),
                    title: "Diwali".into(),
                    start: ist.with_ymd_and_hms(2026, 11, 8, 0, 0, 0).unwrap(),
                    attendees: vec![],
                },
                CalendarEvent {
                    id: "h2".into(),
                    title: "Dussehra".into(),
                    start: ist.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap(),
                    attendees: vec![],
                },
            ],
        )
        .await;

    assert_eq!(
        h.reply("show holidays next month").await,
        "🎉 <b>Holidays for November 2026:</b><br><b>🌍 India:</b><br>🎊 Diwali - <b>November 08, 2026</b><br>"
    );
    let current = h.reply("any holidays this month").await;
    assert!(current.contains("🎊 Dussehra - <b>October 20, 2026</b>"));
    assert!(!current.contains("Diwali"));
}

#[tokio::test]
async fn holidays_without_calendars() {
    let h = harness();
    assert_eq!(
        h.reply("show holidays next month").await,
        "❌ No holiday calendars found. Make sure you are subscribed to them."
    );
}

#[tokio::test]
async fn flight_search_passes_resolved_codes() {
    let h = harness();
    let reply = h
        .reply("find flights from Bombay to new delhi on 20 november")
        .await;
    assert!(reply.contains("❌ <b>No flights found in the response.</b>"));

    let queries = h.flights.queries().await;
    assert_eq!(queries[0].origin_code, "BOM");
    assert_eq!(queries[0].destination_code, "DEL");
}

#[tokio::test]
async fn chat_uses_and_feeds_memory() {
    let h = harness();
    assert_eq!(h.reply("what is the capital of peru").await, "mock response");

    let memory = h.memory.clone().unwrap();
    let stored = memory.stored().await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].1["role"], "user");
    assert_eq!(stored[1].1["role"], "assistant");
    assert_eq!(stored[1].1["agent"], "aide");

    h.reply("and of chile").await;
    let prompts = h.generator.prompts().await;
    let (system, user) = &prompts[1];
    assert!(system.starts_with("You are a helpful assistant named aide."));
    assert!(user.contains("what is the capital of peru"));
    assert!(user.ends_with("Query: and of chile"));
}

#[tokio::test]
async fn chat_survives_memory_outage() {
    let h = TestHarness::builder()
        .with_memory(Some(MockMemory::failing()))
        .build();
    assert_eq!(h.reply("what is the capital of peru").await, "mock response");
}

#[tokio::test]
async fn exit_keyword_resets_everything() {
    let h = harness();
    h.send_with(DRAFT_REQUEST, vec![attachment("deck.pdf", 10)])
        .await
        .unwrap();

    let output = h.send("bye").await.unwrap();
    assert_eq!(output.reply, RESET_REPLY);
    assert!(output.reset);
    assert!(output.history.is_empty());
    assert!(!output.status.has_draft);
    assert_eq!(h.staging.released().await.len(), 1);
}

#[tokio::test]
async fn empty_turn_is_rejected() {
    let h = harness();
    let err = h.send("   ").await.unwrap_err();
    assert!(matches!(err, AideError::ValidationFailed(_)));
    assert_eq!(err.to_string(), "Empty message and no attachments");
}

#[tokio::test]
async fn history_alternates_speakers() {
    let h = harness();
    h.reply("show emails").await;
    let history = h.assistant.history(&h.session_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].speaker, Speaker::User);
    assert_eq!(history[1].speaker, Speaker::Assistant);
}

#[tokio::test]
async fn sessions_do_not_share_drafts() {
    let h = harness();
    let a = SessionId::from("a");
    let b = SessionId::from("b");
    h.send_as(a.clone(), DRAFT_REQUEST, vec![]).await.unwrap();

    let other = h.send_as(b.clone(), "ok", vec![]).await.unwrap();
    assert_eq!(other.reply, "mock response");
    assert!(h.mail.sent().await.is_empty());
    assert!(h.assistant.status(&a).await.unwrap().has_draft);
    assert!(!h.assistant.status(&b).await.unwrap().has_draft);
}

#[tokio::test]
async fn concurrent_turns_in_one_session_are_serialized() {
    let h = Arc::new(harness());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let h = h.clone();
        handles.push(tokio::spawn(async move { h.send("show emails").await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    let history = h.assistant.history(&h.session_id).await.unwrap();
    assert_eq!(history.len(), 16);
}

#[tokio::test]
async fn draft_survives_a_restart_through_the_durable_store() {
    let durable = Arc::new(MemorySessionStore::new());
    let first = TestHarness::builder()
        .with_durable_sessions(durable.clone())
        .build();
    first.reply(DRAFT_REQUEST).await;

    let restarted = TestHarness::builder()
        .with_durable_sessions(durable)
        .build();
    assert!(restarted.reply("send").await.starts_with("✅ Email sent successfully!"));
    assert_eq!(restarted.mail.sent().await.len(), 1);
}

#[tokio::test]
async fn reset_sessions_stop_holding_locks() {
    let h = harness();
    let other = SessionId::from("other");
    h.reply("show emails").await;
    h.send_as(other.clone(), "show emails", vec![]).await.unwrap();
    assert_eq!(h.assistant.tracked_sessions(), 2);

    h.assistant.reset(&other).await.unwrap();
    assert_eq!(h.assistant.tracked_sessions(), 1);

    h.reply("goodbye").await;
    assert_eq!(h.assistant.tracked_sessions(), 0);
}

#[tokio::test]
async fn reset_clears_session() {
    let h = harness();
    h.reply(DRAFT_REQUEST).await;
    h.assistant.reset(&h.session_id).await.unwrap();
    assert!(h.assistant.history(&h.session_id).await.unwrap().is_empty());
    assert!(!h.assistant.status(&h.session_id).await.unwrap().has_draft);
}
