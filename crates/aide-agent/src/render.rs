// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML rendering of action results for the web chat.
//!
//! Text that originates in a mailbox (senders, subjects, bodies) is escaped.
//! Text the assistant generated itself is inserted as is.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

use aide_core::types::{
    CalendarEvent, DraftChange, FlightOption, HolidayMonth, HolidayRegion, MailRecord,
};
use aide_core::{ActionResult, Attachment, Category, Draft};

const LIST_PREVIEW_CHARS: usize = 100;
const RANGE_PREVIEW_CHARS: usize = 150;

const DRAFT_HINTS: &str = "✅ Type 'ok' or 'send' to send<br>\n❌ Type 'no' or 'cancel' to cancel<br>\n";

/// Renders [`ActionResult`]s into markup.
#[derive(Debug, Clone)]
pub struct Renderer {
    offset: FixedOffset,
    zone_label: String,
}

impl Renderer {
    pub fn new(offset: FixedOffset, zone_label: impl Into<String>) -> Self {
        Self {
            offset,
            zone_label: zone_label.into(),
        }
    }

    pub fn render(&self, result: &ActionResult) -> String {
        match result {
            ActionResult::RecordList { category, records } => record_list(*category, records),
            ActionResult::RecordRange {
                start,
                end,
                records,
            } => {
                if records.is_empty() {
                    return format!(
                        "❌ No emails found between {} and {}.",
                        start.format("%Y-%m-%d"),
                        end.format("%Y-%m-%d")
                    );
                }
                let mut out = format!(
                    "📧 <strong>Emails between {} and {}:</strong><br><br>",
                    start.format("%b %d, %Y"),
                    end.format("%b %d, %Y")
                );
                for (i, record) in records.iter().enumerate() {
                    record_summary(&mut out, i + 1, record, RANGE_PREVIEW_CHARS);
                    out.push_str(&separator(50));
                    out.push_str("<br><br>");
                }
                out.trim_end().to_string()
            }
            ActionResult::RecordDetail { record } => format!(
                "📧 <strong>Email Details:</strong><br>\n<strong>From:</strong> {}\n<strong>Subject:</strong> {}\n<strong>Date:</strong> {}<br>\n<strong>Content:</strong><br>\n<div class=\"email-content-bubble\"><pre>{}</pre></div>\n",
                escape(&record.sender),
                escape(&record.subject),
                escape(&record.date),
                escape(&record.body)
            ),
            ActionResult::DraftCreated { draft } if draft.is_reply => format!(
                "📧 Reply draft created!<br><br>\n<strong>To:</strong> {}<br>\n<strong>Subject:</strong> {}<br><br>\n<strong>Content:</strong><br>{}<br><br>\n{DRAFT_HINTS}✏️ Type 'edit [instruction]' to modify",
                escape(&draft.to),
                escape(&draft.subject),
                draft.body
            ),
            ActionResult::DraftCreated { draft } => format!(
                "📝 Email draft created!<br><br>{}\n{DRAFT_HINTS}✏️ Type 'edit [instruction]' to modify<br>\n📧 Type 'add cc/bcc' to add recipients",
                draft_fields(draft)
            ),
            ActionResult::DraftUpdated { draft, change } => format!(
                "{}{}\n{DRAFT_HINTS}✏️ Type 'edit [instruction]' to modify further",
                change_banner(change),
                draft_fields(draft)
            ),
            ActionResult::MessageSent {
                receipt,
                to,
                cc,
                bcc,
                attachment_count,
            } => {
                let mut out = String::from("✅ Email sent successfully");
                if *attachment_count > 0 {
                    let _ = write!(out, " with {attachment_count} attachments");
                }
                let _ = write!(out, "!<br>📧 To: {to}");
                if !cc.is_empty() {
                    let _ = write!(out, "<br>📧 CC: {}", cc.join(", "));
                }
                if !bcc.is_empty() {
                    let _ = write!(out, "<br>📧 BCC: {}", bcc.join(", "));
                }
                let _ = write!(out, "<br>📧 Message ID: {}", receipt.message_id);
                out
            }
            ActionResult::DraftCancelled => "❌ Email draft cancelled.".to_string(),
            ActionResult::EventCreated { event } => self.event_created(event),
            ActionResult::EventDeleted { .. } => {
                "🗑️ <b>Event Deletion:</b><br>Event deleted successfully!<br>".to_string()
            }
            ActionResult::EventsCleared { deleted } => {
                let summary = if *deleted == 0 {
                    "No upcoming events to delete.".to_string()
                } else {
                    format!("Deleted {deleted} upcoming events.")
                };
                format!(
                    "🗑️ <b>{summary}</b><br>✅ Deleted <b>{deleted}</b> events successfully!<br>"
                )
            }
            ActionResult::EventList { events } => self.event_list(events),
            ActionResult::HolidayList {
                month,
                label,
                regions,
            } => holiday_list(*month, label, regions),
            ActionResult::TranslatedRecord {
                record,
                language,
                translated,
            } => format!(
                "📧 <strong>Email Translated to {language}:</strong><br>\n<strong>From:</strong> {}<br>\n<strong>Subject:</strong> {}<br>\n<strong>Date:</strong> {}<br>\n<strong>Original Content:</strong><br>\n<div class=\"email-content-bubble\"><pre>{}</pre></div>\n<strong>Translated Content:</strong><br>\n<div class=\"email-content-bubble\"><pre>{}</pre></div>\n",
                escape(&record.sender),
                escape(&record.subject),
                escape(&record.date),
                escape(&record.body),
                escape(translated)
            ),
            ActionResult::FlightList { query, options } => {
                let mut out = format!(
                    "<b>✈️ Flights from {} ({}) to {} ({}) on {}</b><br>",
                    title_case(&query.origin_city),
                    query.origin_code,
                    title_case(&query.destination_city),
                    query.destination_code,
                    query.date.format("%Y-%m-%d")
                );
                out.push_str(&flight_list(options));
                out
            }
            ActionResult::PlainText { text } => text.clone(),
            ActionResult::Failure { reason, .. } => format!("❌ {reason}"),
        }
    }

    fn local(&self, at: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset)
    }

    fn event_created(&self, event: &CalendarEvent) -> String {
        let mut out = String::from("✅ Event created successfully!<br>");
        let _ = write!(out, "<b>📋 Event:</b> {}<br>", escape(&event.title));
        let _ = write!(
            out,
            "<b>🕒 Date:</b> {} {}<br>",
            self.local(&event.start).format("%d %B %Y, %I:%M %p"),
            self.zone_label
        );
        let _ = write!(out, "<b>🆔 ID:</b> {}<br>", escape(&event.id));
        if !event.attendees.is_empty() {
            let _ = write!(
                out,
                "<b>👥 Attendees:</b> {}<br>",
                escape(&event.attendees.join(", "))
            );
        }
        out.push_str("🎉 Your event has been added to your calendar!<br>");
        out
    }

    fn event_list(&self, events: &[CalendarEvent]) -> String {
        if events.is_empty() {
            return "📅 <b>No upcoming events found.</b><br>".to_string();
        }
        let mut out = String::from("<b>📅 Upcoming Events:</b><br>");
        for (i, event) in events.iter().enumerate() {
            let _ = write!(out, "<b>{}. 📋 Event:</b> {}<br>", i + 1, escape(&event.title));
            let _ = write!(
                out,
                "<b>🕒 Date:</b> {}<br>",
                self.local(&event.start).format("%B %d, %Y at %I:%M %p")
            );
            let _ = write!(out, "<b>🆔 ID:</b> {}<br>", escape(&event.id));
            out.push_str(&separator(40));
            out.push_str("<br>");
        }
        out
    }
}

fn record_list(category: Category, records: &[MailRecord]) -> String {
    let name = category.display_name();
    if records.is_empty() {
        return format!("📭 No emails found in {name}.");
    }
    let mut out = format!("📧 <strong>{name} ({} emails):</strong><br>", records.len());
    for (i, record) in records.iter().enumerate() {
        record_summary(&mut out, i + 1, record, LIST_PREVIEW_CHARS);
        let _ = write!(
            out,
            "<button class='read-more-btn' data-email-index='{}'>Read More</button><br>",
            i + 1
        );
        out.push_str(&separator(50));
        out.push_str("<br>");
    }
    out.push_str("<em>💡 Click 'Read More' to view full content.</em>");
    out
}

fn record_summary(out: &mut String, index: usize, record: &MailRecord, preview: usize) {
    let _ = write!(out, "<strong>📨 Email {index}:</strong><br>");
    let _ = write!(out, "<strong>From:</strong> {}<br>", escape(&record.sender));
    let _ = write!(out, "<strong>Subject:</strong> {}<br>", escape(&record.subject));
    let _ = write!(out, "<strong>Date:</strong> {}<br>", escape(&record.date));
    let _ = write!(
        out,
        "<strong>Preview:</strong> {}<br>",
        escape(&truncate(&record.snippet, preview))
    );
}

/// To/CC/BCC, attachments, subject and content of a draft.
fn draft_fields(draft: &Draft) -> String {
    let mut out = format!("<strong>To:</strong> {}", escape(&draft.to));
    if !draft.cc.is_empty() {
        let _ = write!(out, "<br><strong>CC:</strong> {}", escape(&draft.cc.join(", ")));
    }
    if !draft.bcc.is_empty() {
        let _ = write!(out, "<br><strong>BCC:</strong> {}", escape(&draft.bcc.join(", ")));
    }
    if !draft.attachments.is_empty() {
        out.push_str(&attachment_block(&draft.attachments, draft.total_attachment_bytes()));
    }
    let _ = write!(
        out,
        "<br><strong>Subject:</strong> {}<br><br><strong>Content:</strong><br>{}<br><br>",
        escape(&draft.subject),
        draft.body
    );
    out
}

fn attachment_block(attachments: &[Attachment], total_bytes: u64) -> String {
    let mut out = format!(
        "<br><strong>📎 Attachments ({}):</strong><br>",
        attachments.len()
    );
    for attachment in attachments {
        let _ = write!(
            out,
            "&nbsp;&nbsp;{} {} ({})<br>",
            file_icon(&attachment.name),
            escape(&attachment.name),
            format_size(attachment.size_bytes)
        );
    }
    let _ = write!(out, "<em>Total size: {}</em><br>", format_size(total_bytes));
    out
}

fn change_banner(change: &DraftChange) -> String {
    match change {
        DraftChange::ContentRewritten => "✏️ Email content updated!<br><br>".to_string(),
        DraftChange::CcAdded(addr) => format!("✅ Added CC: {addr}<br><br>"),
        DraftChange::CcAlreadyPresent(addr) => format!("⚠️ {addr} is already in CC list<br><br>"),
        DraftChange::BccAdded(addr) => format!("✅ Added BCC: {addr}<br><br>"),
        DraftChange::BccAlreadyPresent(addr) => {
            format!("⚠️ {addr} is already in BCC list<br><br>")
        }
        DraftChange::RecipientChanged(addr) => format!("✅ Recipient changed to: {addr}<br><br>"),
        DraftChange::SubjectChanged(subject) => {
            format!("✅ Subject changed to: {}<br><br>", escape(subject))
        }
    }
}

fn holiday_list(month: HolidayMonth, label: &str, regions: &[HolidayRegion]) -> String {
    if regions.is_empty() {
        return match month {
            HolidayMonth::Current => "🎉 <b>No upcoming holidays this month.</b><br>".to_string(),
            HolidayMonth::Next => format!("🎉 <b>No holidays in {label}.</b><br>"),
        };
    }
    let mut out = match month {
        HolidayMonth::Current => "<b>🎉 Upcoming Holidays This Month:</b><br>".to_string(),
        HolidayMonth::Next => format!("🎉 <b>Holidays for {label}:</b><br>"),
    };
    for region in regions {
        let _ = write!(out, "<b>🌍 {}:</b><br>", escape(&region.region));
        for holiday in &region.holidays {
            let _ = write!(
                out,
                "🎊 {} - <b>{}</b><br>",
                escape(&holiday.title),
                holiday.date.format("%B %d, %Y")
            );
        }
    }
    out
}

fn flight_list(options: &[FlightOption]) -> String {
    if options.is_empty() {
        return "❌ <b>No flights found in the response.</b><br>".to_string();
    }
    let mut out = format!("<b>Found {} flight option(s):</b><br>", options.len());
    for (i, option) in options.iter().enumerate() {
        let _ = write!(out, "<b>✈️ Flight {}</b><br>", i + 1);
        let _ = write!(out, "<b>🛫 Departure:</b> {}<br>", escape(&option.departure_time));
        let _ = write!(out, "<b>🛬 Arrival:</b> {}<br>", escape(&option.arrival_time));
        let _ = write!(out, "<b>⏱️ Duration:</b> {}<br>", escape(&option.duration));
        for (j, segment) in option.segments.iter().enumerate() {
            let _ = write!(out, "<b>Segment {}:</b><br>", j + 1);
            let _ = write!(
                out,
                "🏷️ <b>Airline:</b> {} {}<br>",
                escape(&segment.airline),
                escape(&segment.flight_number)
            );
            let _ = write!(out, "🛩️ <b>Aircraft:</b> {}<br>", escape(&segment.aircraft));
            let _ = write!(
                out,
                "🏁 <b>From:</b> {} ({}) at {}<br>",
                escape(&segment.departure.name),
                escape(&segment.departure.code),
                escape(&segment.departure.time)
            );
            let _ = write!(
                out,
                "🎯 <b>To:</b> {} ({}) at {}<br>",
                escape(&segment.arrival.name),
                escape(&segment.arrival.code),
                escape(&segment.arrival.time)
            );
            let _ = write!(
                out,
                "💺 <b>Seat:</b> {} ({})<br>",
                escape(&segment.seat),
                escape(&segment.legroom)
            );
        }
        match &option.price {
            Some(price) if price.currency == "INR" => {
                let _ = write!(out, "💰 <b>Price:</b> Rs. {} INR<br>", price.value);
            }
            Some(price) => {
                let _ = write!(out, "💰 <b>Price:</b> {} {}<br>", price.value, price.currency);
            }
            None => out.push_str("💰 <b>Price:</b> N/A<br>"),
        }
        let _ = write!(
            out,
            "🧳 <b>Baggage:</b> {} carry-on, {} checked<br>",
            option.carry_on_bags, option.checked_bags
        );
        if let Some(emissions) = &option.emissions {
            let _ = write!(
                out,
                "🌱 <b>Emissions:</b> {:.0} kg CO2e ({:+}% vs typical)<br>",
                emissions.grams as f64 / 1000.0,
                emissions.difference_percent
            );
        }
        if option.layovers.is_empty() {
            out.push_str("✅ <b>Direct Flight</b><br>");
        } else {
            let _ = write!(out, "🔄 <b>{} Stop(s):</b><br>", option.layovers.len());
            for stop in &option.layovers {
                let _ = write!(
                    out,
                    " - {} ({}): {}, {}<br>",
                    escape(&stop.city),
                    escape(&stop.airport_code),
                    escape(&stop.airport_name),
                    escape(&stop.duration_label)
                );
            }
        }
        out.push_str("<hr>");
    }
    out
}

/// Human-readable size in 1024 steps, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0');
    let trimmed = if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    };
    format!("{trimmed} {}", UNITS[unit])
}

/// Icon by file extension.
pub fn file_icon(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" | "txt" => "📄",
        "doc" | "docx" => "📝",
        "xls" | "xlsx" | "csv" => "📊",
        "ppt" | "pptx" => "📈",
        "jpg" | "jpeg" | "png" | "gif" => "🖼️",
        "mp4" | "avi" | "mov" => "🎥",
        "mp3" | "wav" => "🎵",
        "zip" | "rar" => "📦",
        _ => "📎",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn separator(width: usize) -> String {
    "─".repeat(width)
}

fn title_case(city: &str) -> String {
    city.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub(crate) fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use aide_core::types::{
        AirportTime, Emissions, FlightQuery, FlightSegment, HolidayEntry, Layover, Price,
        SendReceipt,
    };
    use aide_core::FailureKind;
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(FixedOffset::east_opt(19_800).unwrap(), "IST")
    }

    fn record(i: usize, snippet: &str) -> MailRecord {
        MailRecord {
            id: format!("m{i}"),
            sender: format!("Sender {i} <s{i}@x.com>"),
            subject: format!("Subject {i}"),
            snippet: snippet.to_string(),
            body: "Body".into(),
            date: "Mon, 12 Oct 2026 09:00:00 +0530".into(),
        }
    }

    fn draft() -> Draft {
        Draft {
            to: "asha@example.com".into(),
            cc: vec![],
            bcc: vec![],
            subject: "Plan".into(),
            body: "Hello".into(),
            attachments: vec![],
            created_at: Utc::now(),
            is_reply: false,
            reply_source_id: None,
        }
    }

    #[test]
    fn empty_listing_names_category() {
        let out = renderer().render(&ActionResult::RecordList {
            category: Category::Social,
            records: vec![],
        });
        assert_eq!(out, "📭 No emails found in Social.");
    }

    #[test]
    fn listing_truncates_and_indexes() {
        let long = "x".repeat(120);
        let out = renderer().render(&ActionResult::RecordList {
            category: Category::Primary,
            records: vec![record(1, &long), record(2, "short")],
        });
        assert!(out.starts_with("📧 <strong>Primary Inbox (2 emails):</strong><br>"));
        assert!(out.contains(&format!("{}...", "x".repeat(100))));
        assert!(!out.contains(&"x".repeat(101)));
        assert!(out.contains("data-email-index='2'"));
        assert!(out.contains("Sender 1 &lt;s1@x.com&gt;"));
        assert!(out.ends_with("<em>💡 Click 'Read More' to view full content.</em>"));
    }

    #[test]
    fn range_preview_is_longer() {
        let out = renderer().render(&ActionResult::RecordRange {
            start: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
            records: vec![record(1, &"y".repeat(140))],
        });
        assert!(out.starts_with("📧 <strong>Emails between Oct 01, 2026 and Oct 05, 2026:</strong>"));
        assert!(out.contains(&"y".repeat(140)));
        assert!(!out.contains("..."));
    }

    #[test]
    fn empty_range() {
        let out = renderer().render(&ActionResult::RecordRange {
            start: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
            records: vec![],
        });
        assert_eq!(out, "❌ No emails found between 2026-10-01 and 2026-10-05.");
    }

    #[test]
    fn draft_omits_empty_cc_and_bcc() {
        let out = renderer().render(&ActionResult::DraftCreated { draft: draft() });
        assert!(out.starts_with("📝 Email draft created!<br><br><strong>To:</strong> asha@example.com<br><strong>Subject:</strong> Plan"));
        assert!(!out.contains("CC:"));
        assert!(!out.contains("BCC:"));
        assert!(out.ends_with("📧 Type 'add cc/bcc' to add recipients"));
    }

    #[test]
    fn draft_lists_cc_and_attachments() {
        let mut d = draft();
        d.cc = vec!["b@x.com".into(), "c@x.com".into()];
        d.attachments = vec![
            Attachment {
                name: "plan.pdf".into(),
                media_type: "application/pdf".into(),
                size_bytes: 1536,
                storage_ref: "/tmp/a".into(),
            },
            Attachment {
                name: "photo.PNG".into(),
                media_type: "image/png".into(),
                size_bytes: 512,
                storage_ref: "/tmp/b".into(),
            },
        ];
        let out = renderer().render(&ActionResult::DraftCreated { draft: d });
        assert!(out.contains("<br><strong>CC:</strong> b@x.com, c@x.com"));
        assert!(!out.contains("BCC:"));
        assert!(out.contains("📎 Attachments (2):"));
        assert!(out.contains("📄 plan.pdf (1.5 KB)"));
        assert!(out.contains("🖼️ photo.PNG (512 B)"));
        assert!(out.contains("Total size: 2.0 KB"));
    }

    #[test]
    fn reply_draft_has_its_own_header() {
        let mut d = draft();
        d.is_reply = true;
        d.subject = "Re: Plan".into();
        let out = renderer().render(&ActionResult::DraftCreated { draft: d });
        assert!(out.starts_with("📧 Reply draft created!"));
        assert!(out.contains("<strong>Subject:</strong> Re: Plan"));
    }

    #[test]
    fn duplicate_cc_banner() {
        let out = renderer().render(&ActionResult::DraftUpdated {
            draft: draft(),
            change: DraftChange::CcAlreadyPresent("b@x.com".into()),
        });
        assert!(out.starts_with("⚠️ b@x.com is already in CC list<br><br><strong>To:</strong>"));
        assert!(out.ends_with("✏️ Type 'edit [instruction]' to modify further"));
    }

    #[test]
    fn sent_message_lines() {
        let out = renderer().render(&ActionResult::MessageSent {
            receipt: SendReceipt {
                message_id: "abc".into(),
            },
            to: "a@x.com".into(),
            cc: vec!["b@x.com".into()],
            bcc: vec![],
            attachment_count: 2,
        });
        assert_eq!(
            out,
            "✅ Email sent successfully with 2 attachments!<br>📧 To: a@x.com<br>📧 CC: b@x.com<br>📧 Message ID: abc"
        );
    }

    #[test]
    fn event_created_in_local_time() {
        let event = CalendarEvent {
            id: "ev1".into(),
            title: "standup".into(),
            start: Utc
                .with_ymd_and_hms(2026, 10, 15, 3, 30, 0)
                .unwrap()
                .fixed_offset(),
            attendees: vec!["a@x.com".into()],
        };
        let out = renderer().render(&ActionResult::EventCreated { event });
        assert!(out.contains("<b>🕒 Date:</b> 15 October 2026, 09:00 AM IST<br>"));
        assert!(out.contains("<b>👥 Attendees:</b> a@x.com<br>"));
    }

    #[test]
    fn event_titles_are_escaped() {
        let event = CalendarEvent {
            id: "ev2".into(),
            title: "<script>alert(1)</script> & co".into(),
            start: Utc
                .with_ymd_and_hms(2026, 10, 15, 3, 30, 0)
                .unwrap()
                .fixed_offset(),
            attendees: vec![],
        };
        let created = renderer().render(&ActionResult::EventCreated {
            event: event.clone(),
        });
        assert!(created.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; co"));
        assert!(!created.contains("<script>"));

        let listed = renderer().render(&ActionResult::EventList {
            events: vec![event],
        });
        assert!(listed.contains("<b>1. 📋 Event:</b> &lt;script&gt;"));
    }

    #[test]
    fn events_cleared_states_count() {
        let out = renderer().render(&ActionResult::EventsCleared { deleted: 3 });
        assert!(out.contains("Deleted <b>3</b> events"));
    }

    #[test]
    fn holidays_grouped_by_region() {
        let out = renderer().render(&ActionResult::HolidayList {
            month: HolidayMonth::Next,
            label: "November 2026".into(),
            regions: vec![HolidayRegion {
                region: "India".into(),
                holidays: vec![HolidayEntry {
                    title: "Diwali".into(),
                    date: NaiveDate::from_ymd_opt(2026, 11, 8).unwrap(),
                }],
            }],
        });
        assert_eq!(
            out,
            "🎉 <b>Holidays for November 2026:</b><br><b>🌍 India:</b><br>🎊 Diwali - <b>November 08, 2026</b><br>"
        );
    }

    #[test]
    fn flight_option_details() {
        let option = FlightOption {
            departure_time: "20-11-2026 06:00 AM".into(),
            arrival_time: "20-11-2026 08:10 AM".into(),
            duration: "2 hr 10 min".into(),
            segments: vec![FlightSegment {
                airline: "IndiGo".into(),
                flight_number: "6E 2001".into(),
                aircraft: "Airbus A321".into(),
                departure: AirportTime {
                    name: "Chhatrapati Shivaji".into(),
                    code: "BOM".into(),
                    time: "06:00".into(),
                },
                arrival: AirportTime {
                    name: "Indira Gandhi".into(),
                    code: "DEL".into(),
                    time: "08:10".into(),
                },
                seat: "Average".into(),
                legroom: "29 in".into(),
            }],
            price: Some(Price {
                value: 5432.0,
                currency: "INR".into(),
            }),
            carry_on_bags: 1,
            checked_bags: 1,
            emissions: Some(Emissions {
                grams: 98_000,
                difference_percent: -4,
            }),
            layovers: vec![Layover {
                city: "Jaipur".into(),
                airport_code: "JAI".into(),
                airport_name: "Jaipur International".into(),
                duration_label: "1 hr".into(),
            }],
        };
        let out = renderer().render(&ActionResult::FlightList {
            query: FlightQuery {
                origin_city: "mumbai".into(),
                origin_code: "BOM".into(),
                destination_city: "new delhi".into(),
                destination_code: "DEL".into(),
                date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            },
            options: vec![option],
        });
        assert!(out.starts_with("<b>✈️ Flights from Mumbai (BOM) to New Delhi (DEL) on 2026-11-20</b><br>"));
        assert!(out.contains("💰 <b>Price:</b> Rs. 5432 INR<br>"));
        assert!(out.contains("🌱 <b>Emissions:</b> 98 kg CO2e (-4% vs typical)<br>"));
        assert!(out.contains("🔄 <b>1 Stop(s):</b><br> - Jaipur (JAI): Jaipur International, 1 hr<br>"));
        assert!(out.ends_with("<hr>"));
    }

    #[test]
    fn failure_prefix() {
        let out = renderer().render(&ActionResult::Failure {
            kind: FailureKind::ValidationFailed,
            reason: "Please specify recipient email address.".into(),
        });
        assert_eq!(out, "❌ Please specify recipient email address.");
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024 * 3), "3.0 MB");
        assert_eq!(format_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn icons_by_extension() {
        assert_eq!(file_icon("a.DOCX"), "📝");
        assert_eq!(file_icon("song.mp3"), "🎵");
        assert_eq!(file_icon("README"), "📎");
    }
}
