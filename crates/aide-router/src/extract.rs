// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Independent field extractors.
//!
//! Each function looks for one field in an utterance and returns `None` (or a
//! default) when it is absent. None of them fail.

use std::sync::LazyLock;

use aide_core::Category;
use regex::Regex;

/// Address shape accepted everywhere a mail address is parsed.
pub const ADDRESS_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{ADDRESS_PATTERN}$")).unwrap());

static RECIPIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:to|email)\s+({ADDRESS_PATTERN})")).unwrap()
});

static CC_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bcc\s+({ADDRESS_PATTERN}(?:\s*,\s*{ADDRESS_PATTERN})*)"
    ))
    .unwrap()
});

static BCC_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bbcc\s+({ADDRESS_PATTERN}(?:\s*,\s*{ADDRESS_PATTERN})*)"
    ))
    .unwrap()
});

static SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bsubject\s*:?\s*["']?(.+?)["']?\s*(?:\b(?:cc|bcc|message|content|saying|about)\b|$)"#,
    )
    .unwrap()
});

static CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:message|content|saying|about)\s*:?\s*["']?(.+?)["']?\s*(?:\b(?:cc|bcc|subject)\b|$)"#,
    )
    .unwrap()
});

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Category keywords in precedence order.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Primary, &["primary", "main", "important"]),
    (Category::Personal, &["personal"]),
    (Category::Social, &["social"]),
    (
        Category::Promotions,
        &["promotion", "promotions", "promotional", "offers", "deals", "marketing"],
    ),
    (Category::Updates, &["updates"]),
    (Category::Forums, &["forums", "forum"]),
    (Category::Sent, &["sent", "outbox"]),
    (Category::Spam, &["spam", "junk"]),
    (Category::Trash, &["trash", "deleted"]),
    (Category::Drafts, &["drafts", "unsent"]),
];

/// Returns `true` if `candidate` is a complete, well-formed address.
pub fn is_valid_address(candidate: &str) -> bool {
    ADDRESS.is_match(candidate)
}

/// First address following "to" or "email".
pub fn recipient(text: &str) -> Option<String> {
    RECIPIENT.captures(text).map(|caps| caps[1].to_string())
}

/// Comma-separated addresses following a literal "cc ".
pub fn cc_list(text: &str) -> Vec<String> {
    address_list(&CC_LIST, text)
}

/// Comma-separated addresses following a literal "bcc ".
pub fn bcc_list(text: &str) -> Vec<String> {
    address_list(&BCC_LIST, text)
}

fn address_list(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures(text)
        .map(|caps| {
            caps[1]
                .split(',')
                .map(|addr| addr.trim().to_string())
                .filter(|addr| !addr.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Text after "subject", up to the next structural keyword.
pub fn subject(text: &str) -> Option<String> {
    SUBJECT
        .captures(text)
        .map(|caps| trim_quotes(&caps[1]))
        .filter(|s| !s.is_empty())
}

/// Text after "message", "content", "saying" or "about".
pub fn context(text: &str) -> Option<String> {
    CONTEXT
        .captures(text)
        .map(|caps| trim_quotes(&caps[1]))
        .filter(|s| !s.is_empty())
}

fn trim_quotes(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// First integer in `text`, capped at `max`, else `default`.
pub fn count(text: &str, default: usize, max: usize) -> usize {
    FIRST_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .map(|n| n.min(max))
        .unwrap_or(default)
}

/// The highest-precedence category whose keyword appears as a word in `text`.
pub fn category(text: &str) -> Option<Category> {
    let lower = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| has_word(&lower, w)))
        .map(|(category, _)| *category)
}

/// Whole-word containment over alphanumeric tokens.
pub fn has_word(lower: &str, word: &str) -> bool {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

/// Maps "first".."fifth", "1st".."5th" and plain integers to a 1-based index.
pub fn ordinal(token: &str) -> Option<usize> {
    let index = match token {
        "first" | "1st" => 1,
        "second" | "2nd" => 2,
        "third" | "3rd" => 3,
        "fourth" | "4th" => 4,
        "fifth" | "5th" => 5,
        other => return other.parse().ok(),
    };
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_after_to_or_email() {
        assert_eq!(
            recipient("send email to asha@example.com about lunch").as_deref(),
            Some("asha@example.com")
        );
        assert_eq!(
            recipient("email ravi.k@mail.co.in now").as_deref(),
            Some("ravi.k@mail.co.in")
        );
        assert_eq!(recipient("send email to the team"), None);
    }

    #[test]
    fn cc_and_bcc_are_separate() {
        let text = "send email to a@x.com cc b@x.com, c@x.com bcc d@x.com";
        assert_eq!(cc_list(text), vec!["b@x.com", "c@x.com"]);
        assert_eq!(bcc_list(text), vec!["d@x.com"]);
        assert!(cc_list("send email to a@x.com bcc d@x.com").is_empty());
    }

    #[test]
    fn subject_stops_at_next_keyword() {
        let text = "send email to a@x.com subject 'Quarterly plan' message we are on track";
        assert_eq!(subject(text).as_deref(), Some("Quarterly plan"));
        assert_eq!(context(text).as_deref(), Some("we are on track"));
    }

    #[test]
    fn subject_runs_to_end_without_keyword() {
        assert_eq!(
            subject("email to a@x.com subject Hello there").as_deref(),
            Some("Hello there")
        );
        assert_eq!(subject("email to a@x.com"), None);
    }

    #[test]
    fn context_from_saying() {
        assert_eq!(
            context("write email to a@x.com saying I will be late").as_deref(),
            Some("I will be late")
        );
    }

    #[test]
    fn count_is_capped() {
        assert_eq!(count("show 3 emails", 5, 20), 3);
        assert_eq!(count("show 50 emails", 5, 20), 20);
        assert_eq!(count("show emails", 5, 20), 5);
    }

    #[test]
    fn category_precedence_and_words() {
        assert_eq!(category("show social emails"), Some(Category::Social));
        assert_eq!(category("any good deals today"), Some(Category::Promotions));
        assert_eq!(category("check junk"), Some(Category::Spam));
        assert_eq!(category("primary and social"), Some(Category::Primary));
        assert_eq!(category("presentation"), None);
        assert_eq!(category("consent form"), None);
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal("third"), Some(3));
        assert_eq!(ordinal("5th"), Some(5));
        assert_eq!(ordinal("12"), Some(12));
        assert_eq!(ordinal("sixth"), None);
    }

    #[test]
    fn address_validation() {
        assert!(is_valid_address("x@y.com"));
        assert!(!is_valid_address("x@y"));
        assert!(!is_valid_address("hello x@y.com"));
    }
}
