use async_trait::async_trait;

use crate::app::Result;
use crate::summarizer::{LengthBudget, Summarizer};

/// Offline summarizer: keeps whole leading sentences while they fit in
/// `budget.max` words. If the first sentence alone is too long it is cut
/// at the budget.
pub struct ExtractiveSummarizer;

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String> {
        Ok(lead_sentences(text, budget.max))
    }
}

fn lead_sentences(text: &str, max_words: usize) -> String {
    let mut picked: Vec<&str> = Vec::new();
    let mut words = 0;

    for sentence in sentences(text) {
        let count = sentence.split_whitespace().count();
        if words + count > max_words {
            break;
        }
        words += count;
        picked.push(sentence);
    }

    if picked.is_empty() {
        return text
            .split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" ");
    }

    picked.join(" ")
}

/// Split after `.`, `!` or `?`, keeping the terminator.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
