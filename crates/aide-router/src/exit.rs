// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation exit detection.

/// Phrases that end the conversation (substring, case-insensitive).
pub const EXIT_KEYWORDS: &[&str] = &[
    "bye",
    "goodbye",
    "exit",
    "quit",
    "see you",
    "thank you",
    "thanks",
    "thankyou",
    "see ya",
    "farewell",
];

/// Returns `true` when `text` contains any exit keyword.
///
/// Checked before classification; a match resets the session unconditionally.
pub fn is_exit(text: &str) -> bool {
    let lower = text.to_lowercase();
    EXIT_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
