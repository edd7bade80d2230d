//! Categorization and summary collaborators.
//!
//! The hosted language-model service lives outside this crate. The engine only
//! depends on these traits; the local implementations here keep the tool
//! usable offline.

use crate::domain::{format_minutes, Category};
use crate::session::Review;

/// Assigns a category to a new backlog entry
pub trait Categorizer {
    fn categorize(&self, title: &str) -> Category;
}

/// Produces a short recap of a finished session
pub trait Summarizer {
    fn summarize(&self, context: &SummaryContext) -> String;
}

/// What a summarizer gets to see
#[derive(Debug, Clone)]
pub struct SummaryContext {
    pub review: Review,
    pub migrated: usize,
}

/// Keyword table lookup on whole words, first match wins
#[derive(Debug, Default)]
pub struct KeywordCategorizer;

const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Work,
        &["meeting", "email", "report", "deploy", "review", "client", "fix"],
    ),
    (
        Category::Study,
        &["read", "reading", "study", "course", "lecture", "learn", "chapter", "exam"],
    ),
    (
        Category::Health,
        &["gym", "run", "running", "walk", "yoga", "doctor", "workout", "stretch"],
    ),
    (
        Category::Errand,
        &["buy", "groceries", "bank", "pick up", "post office", "pay"],
    ),
    (
        Category::Personal,
        &["call", "family", "journal", "clean", "cook", "friend"],
    ),
];

/// Lowercase words of a title, split on anything that isn't alphanumeric
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `keyword` (one or more words) appears as consecutive whole words
fn contains_phrase(title_words: &[String], keyword: &str) -> bool {
    let phrase: Vec<&str> = keyword.split_whitespace().collect();
    !phrase.is_empty()
        && title_words
            .windows(phrase.len())
            .any(|window| window.iter().zip(&phrase).all(|(w, p)| w.as_str() == *p))
}

impl Categorizer for KeywordCategorizer {
    fn categorize(&self, title: &str) -> Category {
        let title_words = words(title);
        KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| contains_phrase(&title_words, k)))
            .map(|(category, _)| *category)
            .unwrap_or_default()
    }
}

/// Formats the review breakdown into a one-paragraph recap
#[derive(Debug, Default)]
pub struct PlainSummarizer;

impl Summarizer for PlainSummarizer {
    fn summarize(&self, context: &SummaryContext) -> String {
        let review = &context.review;
        let finished = review.rows.iter().filter(|r| r.is_completed).count();
        let mut text = format!(
            "Spent {} on \"{}\"; {} of {} items done.",
            format_minutes(review.total_added_minutes),
            review.task_title,
            finished,
            review.rows.len()
        );

        if let Some(top) = review
            .rows
            .iter()
            .filter(|r| r.added_minutes > 0)
            .max_by_key(|r| r.added_minutes)
        {
            text.push_str(&format!(
                " Most time went to \"{}\" ({}).",
                top.title,
                format_minutes(top.added_minutes)
            ));
        }

        let over: Vec<&str> = review
            .rows
            .iter()
            .filter(|r| r.is_over_budget())
            .map(|r| r.title.as_str())
            .collect();
        if !over.is_empty() {
            text.push_str(&format!(" Over budget: {}.", over.join(", ")));
        }

        if context.migrated > 0 {
            text.push_str(&format!(" {} moved to the backlog.", context.migrated));
        }
        text
    }
}
