// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message body generation.
//!
//! The [`Composer`] picks a register (plain English or Hinglish) for each
//! generation call, prompts the text generator, and normalizes what comes
//! back: boilerplate lead-ins are stripped and a sign-off is guaranteed.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use aide_core::types::Attachment;
use aide_core::{AideError, Draft, TextGenerator, ViewedRecord};

/// Words that suggest the user is writing in Hinglish.
const HINGLISH_MARKERS: &[&str] = &[
    "kal", "aaj", "mat", "nahi", "hai", "hoon", "ho", "aana", "jana", "kya", "kaise", "kyun",
    "ji", "sahab", "maam", "bhai", "didi", "chutti", "holiday", "college", "office", "ghar",
    "padhna",
];

/// Any one of these selects Hinglish on its own.
const HONORIFIC_MARKERS: &[&str] = &["ji", "sahab", "maam"];

/// Lead-ins the generator sometimes prepends to the body.
const BOILERPLATE_PREFIXES: &[&str] = &[
    "here is the updated email content:",
    "here's the updated email content:",
    "updated email content:",
    "here is the email:",
    "here's the email:",
    "email content:",
];

static YOUR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[your name\]").unwrap());

/// Language register of a generated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    English,
    Hinglish,
}

impl Register {
    /// Detects the register from the subject and context of a request.
    ///
    /// Hinglish needs two marker words, or a single honorific.
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let hits = HINGLISH_MARKERS.iter().filter(|m| words.contains(m)).count();
        let honorific = HONORIFIC_MARKERS.iter().any(|m| words.contains(m));
        if hits >= 2 || honorific {
            Register::Hinglish
        } else {
            Register::English
        }
    }

    fn closing(self) -> &'static str {
        match self {
            Register::English => "Best regards",
            Register::Hinglish => "Dhanyawad",
        }
    }
}

/// Generates and normalizes message bodies.
pub struct Composer {
    generator: Arc<dyn TextGenerator>,
    signer: String,
}

impl Composer {
    pub fn new(generator: Arc<dyn TextGenerator>, signer: impl Into<String>) -> Self {
        Self {
            generator,
            signer: signer.into(),
        }
    }

    /// Body for a new message. Falls back to a template when generation fails.
    pub async fn compose(&self, subject: &str, context: &str, attachments: &[Attachment]) -> String {
        let register = Register::detect(&format!("{subject} {context}"));
        let context = with_attachment_note(context, attachments);
        let prompt = format!(
            "Write a professional email with:\nSubject: {subject}\nContext: {context}\n{}\n\nProvide ONLY the email body content (no headers, no extra explanations).",
            context_hint(subject, &context)
        );
        match self.generate(register, &prompt).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "compose generation failed, using template body");
                self.fallback(register, subject)
            }
        }
    }

    /// Body for a reply to `original`. Falls back to a template when generation fails.
    pub async fn reply(&self, original: &ViewedRecord, subject: &str, context: &str) -> String {
        let register = Register::detect(&format!("{subject} {context}"));
        let prompt = format!(
            "Write a reply to this email:\n\nFrom: {}\nSubject: {}\nOriginal Message: {}\n\nReply context: {context}\n\nProvide ONLY the reply email body content.",
            original.sender, original.subject, original.body
        );
        match self.generate(register, &prompt).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "reply generation failed, using template body");
                self.fallback(register, subject)
            }
        }
    }

    /// Rewrites the body of `draft` following `instruction`.
    ///
    /// Unlike composition there is no fallback: a failure leaves the draft as it was.
    pub async fn rewrite(&self, draft: &Draft, instruction: &str) -> Result<String, AideError> {
        let register = Register::detect(&format!("{} {instruction}", draft.subject));
        let prompt = format!(
            "Edit this email based on the instruction: \"{instruction}\"\n\nCurrent email content:\n{}\n\nProvide ONLY the updated email body content (no extra text or explanations).",
            draft.body
        );
        self.generate(register, &prompt)
            .await
            .map_err(|e| AideError::collaborator_with("Could not update the email content.", e))
    }

    async fn generate(&self, register: Register, prompt: &str) -> Result<String, AideError> {
        debug!(?register, "generating message body");
        let raw = self.generator.generate(&self.system_prompt(register), prompt).await?;
        Ok(self.normalize(&raw, register))
    }

    fn system_prompt(&self, register: Register) -> String {
        let rules = format!(
            "IMPORTANT RULES:\n\
             1. Understand the actual meaning of what the user wants to communicate\n\
             2. Write contextually appropriate content based on the real intent\n\
             3. Keep the tone professional but friendly\n\
             4. Always end with \"{}\" followed by {}\n\
             5. NEVER include phrases like \"Here is the updated content\" or \"Updated email content\"\n\
             6. Return ONLY the email body content, nothing else",
            register.closing(),
            self.signer
        );
        match register {
            Register::English => {
                format!("You are an AI assistant that writes professional emails in English.\n\n{rules}")
            }
            Register::Hinglish => format!(
                "You are an AI assistant that writes emails in natural Hinglish (Hindi-English mix).\n\
                 Mix Hindi and English naturally, using words like aap, ji, maam, kal (tomorrow), aaj (today), mat (don't), nahi (no), chutti (leave).\n\
                 If someone says \"kal mat aana college\" it means \"don't come to college tomorrow\".\n\n{rules}"
            ),
        }
    }

    /// Strips a boilerplate lead-in and guarantees a sign-off.
    pub fn normalize(&self, raw: &str, register: Register) -> String {
        let mut body = raw.trim().to_string();
        let lead_in = BOILERPLATE_PREFIXES.iter().find(|p| {
            body.get(..p.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(p))
        });
        if let Some(prefix) = lead_in {
            body = body[prefix.len()..].trim().to_string();
        }

        let lower = body.to_lowercase();
        if !lower.contains("best regards") && !lower.contains("dhanyawad") {
            body.push_str(&format!("\n\n{},\n{}", register.closing(), self.signer));
        } else {
            body = YOUR_NAME.replace_all(&body, self.signer.as_str()).into_owned();
        }
        body
    }

    fn fallback(&self, register: Register, subject: &str) -> String {
        let topic = subject.to_lowercase();
        match register {
            Register::English => format!(
                "Dear Sir/Madam,\n\nI hope this email finds you well.\n\nI wanted to reach out regarding {topic}.\n\nPlease let me know your thoughts.\n\nBest regards,\n{}",
                self.signer
            ),
            Register::Hinglish => format!(
                "Namaste ji,\n\nI hope aap well ho. Yeh email {topic} ke baare mein hai.\n\nDhanyawad,\n{}",
                self.signer
            ),
        }
    }
}

/// Appends a note naming the attached files, if any.
pub fn with_attachment_note(context: &str, attachments: &[Attachment]) -> String {
    if attachments.is_empty() {
        return context.to_string();
    }
    let names: Vec<&str> = attachments.iter().map(|a| a.name.as_str()).collect();
    format!(
        "{context}\n\nNote: This email includes {} attached file(s): {}",
        attachments.len(),
        names.join(", ")
    )
}

fn context_hint(subject: &str, context: &str) -> &'static str {
    let subject = subject.to_lowercase();
    let context = context.to_lowercase();
    if context.contains("kal mat aana") || context.contains("don't come tomorrow") {
        "This is about informing someone not to come tomorrow (holiday/leave notification)"
    } else if context.contains("chutti") || context.contains("leave") {
        "This is about taking leave or holiday"
    } else if context.contains("meeting") {
        "This is about scheduling or discussing a meeting"
    } else if subject.contains("holiday") || subject.contains("chutti") {
        "This is about a holiday or leave notification"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use aide_core::{Collaborator, CollaboratorKind};
    use chrono::Utc;

    use super::*;

    /// Returns a fixed reply, or fails, and records the last prompts.
    struct ScriptedGenerator {
        reply: Option<String>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Collaborator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        fn kind(&self) -> CollaboratorKind {
            CollaboratorKind::TextGeneration
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, system: &str, user: &str) -> Result<String, AideError> {
            self.seen.lock().unwrap().push((system.to_string(), user.to_string()));
            self.reply
                .clone()
                .ok_or_else(|| AideError::collaborator("generator offline"))
        }
    }

    fn draft(body: &str) -> Draft {
        Draft {
            to: "a@x.com".into(),
            cc: vec![],
            bcc: vec![],
            subject: "Status".into(),
            body: body.into(),
            attachments: vec![],
            created_at: Utc::now(),
            is_reply: false,
            reply_source_id: None,
        }
    }

    #[test]
    fn register_detection() {
        assert_eq!(Register::detect("Project update"), Register::English);
        assert_eq!(Register::detect("kal mat aana college"), Register::Hinglish);
        assert_eq!(Register::detect("Thanks ji"), Register::Hinglish);
        // One marker alone is not enough.
        assert_eq!(Register::detect("office party"), Register::English);
        // Markers are whole words.
        assert_eq!(Register::detect("hope the shoes fit"), Register::English);
    }

    #[test]
    fn normalize_strips_lead_in_and_signs() {
        let composer = Composer::new(ScriptedGenerator::failing(), "RMM");
        let body = composer.normalize("Here is the email:\nHi team,\nSee you.", Register::English);
        assert_eq!(body, "Hi team,\nSee you.\n\nBest regards,\nRMM");
    }

    #[test]
    fn normalize_keeps_existing_sign_off() {
        let composer = Composer::new(ScriptedGenerator::failing(), "RMM");
        let body = composer.normalize("Hello,\n\nBest Regards,\n[Your Name]", Register::English);
        assert_eq!(body, "Hello,\n\nBest Regards,\nRMM");
    }

    #[test]
    fn hinglish_sign_off() {
        let composer = Composer::new(ScriptedGenerator::failing(), "RMM");
        let body = composer.normalize("Kal chutti hai.", Register::Hinglish);
        assert!(body.ends_with("Dhanyawad,\nRMM"));
    }

    #[tokio::test]
    async fn compose_mentions_attachments_in_prompt() {
        let generator = ScriptedGenerator::replying("Please find the plan attached.");
        let composer = Composer::new(generator.clone(), "RMM");
        let attachment = Attachment {
            name: "plan.pdf".into(),
            media_type: "application/pdf".into(),
            size_bytes: 10,
            storage_ref: "/tmp/plan.pdf".into(),
        };

        let body = composer.compose("Plan", "sharing the plan", &[attachment]).await;

        assert!(body.ends_with("Best regards,\nRMM"));
        let seen = generator.seen.lock().unwrap();
        assert!(seen[0].1.contains("Note: This email includes 1 attached file(s): plan.pdf"));
    }

    #[tokio::test]
    async fn compose_falls_back_in_detected_register() {
        let composer = Composer::new(ScriptedGenerator::failing(), "RMM");
        let english = composer.compose("Quarterly Review", "set a time", &[]).await;
        assert!(english.contains("regarding quarterly review"));
        assert!(english.ends_with("Best regards,\nRMM"));

        let hinglish = composer.compose("Chutti", "kal mat aana", &[]).await;
        assert!(hinglish.ends_with("Dhanyawad,\nRMM"));
    }

    #[tokio::test]
    async fn rewrite_failure_is_an_error() {
        let composer = Composer::new(ScriptedGenerator::failing(), "RMM");
        let err = composer.rewrite(&draft("old"), "shorter").await.unwrap_err();
        assert!(matches!(err, AideError::Collaborator { .. }));
    }

    #[tokio::test]
    async fn rewrite_sends_previous_body() {
        let generator = ScriptedGenerator::replying("New body\n\nBest regards,\nRMM");
        let composer = Composer::new(generator.clone(), "RMM");
        let body = composer.rewrite(&draft("Old body"), "make it formal").await.unwrap();
        assert_eq!(body, "New body\n\nBest regards,\nRMM");
        let seen = generator.seen.lock().unwrap();
        assert!(seen[0].1.contains("Current email content:\nOld body"));
        assert!(seen[0].1.contains("\"make it formal\""));
    }
}
