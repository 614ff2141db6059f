use std::fmt::Write;

use crate::taxonomy::TAXONOMY;

/// Most topics a single record can carry. Catalog order breaks ties, not
/// match strength: classification is a membership test, not a ranking.
pub const MAX_TOPICS: usize = 3;

const SNIPPET_CONTEXT: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub topics: Vec<String>,
    pub matched_snippet: String,
}

/// Tags free text (title + body concatenation) and optional subject tags
/// against the topic catalog. Returns at most [`MAX_TOPICS`] topic ids in
/// catalog order plus a human-readable snippet explaining each match.
/// Never fails; unmatched input yields an empty topic list and the caller
/// decides the fallback.
pub fn classify(text: &str, subjects: &[String]) -> Classification {
    let chars: Vec<char> = text.chars().collect();
    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let lower_subjects: Vec<String> = subjects.iter().map(|s| s.to_lowercase()).collect();

    let mut topics = Vec::new();
    let mut snippet = String::new();

    for topic in TAXONOMY {
        if topics.len() == MAX_TOPICS {
            break;
        }

        if let Some(trigger) = topic
            .subjects
            .iter()
            .find(|trigger| lower_subjects.iter().any(|s| s.contains(*trigger)))
        {
            topics.push(topic.id.to_string());
            let _ = write!(snippet, "Subject: \"{trigger}\"; ");
            continue;
        }

        let keyword_hit = topic.keywords.iter().find_map(|kw| {
            let needle: Vec<char> = kw.chars().collect();
            find_chars(&lower, &needle).map(|pos| (pos, needle.len()))
        });

        if let Some((pos, len)) = keyword_hit {
            topics.push(topic.id.to_string());
            let start = pos.saturating_sub(SNIPPET_CONTEXT);
            let end = (pos + len + SNIPPET_CONTEXT).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            let _ = write!(snippet, "\"...{}...\"; ", window.trim());
        }
    }

    Classification {
        topics,
        matched_snippet: snippet.trim_end().to_string(),
    }
}

fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
