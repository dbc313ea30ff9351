//! Word counter: text statistics and reading time.

use serde::Serialize;
use serde_json::json;

use super::{ComputationError, ExecutionInput, ToolOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub lines: usize,
    pub paragraphs: usize,
}

impl TextStats {
    pub fn analyze(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
            // Only U+0020 is stripped; tabs and newlines still count.
            characters_no_spaces: text.chars().filter(|c| *c != ' ').count(),
            lines: if text.is_empty() {
                0
            } else {
                text.matches('\n').count() + 1
            },
            paragraphs: text
                .split("\n\n")
                .filter(|block| !block.trim().is_empty())
                .count(),
        }
    }

    /// Whole minutes at `words_per_minute`, rounded up.
    pub fn reading_time_minutes(&self, words_per_minute: u32) -> usize {
        let wpm = words_per_minute.max(1) as usize;
        self.words.div_ceil(wpm)
    }
}

pub fn execute(input: &ExecutionInput<'_>) -> ToolOutcome {
    let settings = input.settings.word_counter();
    let text = input.str_param("text")?.unwrap_or("");

    if text.chars().count() > settings.max_text_length {
        return Err(ComputationError::new(format!(
            "Text exceeds the maximum length of {} characters",
            settings.max_text_length
        ))
        .with("max_text_length", settings.max_text_length));
    }

    let stats = TextStats::analyze(text);
    Ok(json!({
        "words": stats.words,
        "characters": stats.characters,
        "characters_no_spaces": stats.characters_no_spaces,
        "lines": stats.lines,
        "paragraphs": stats.paragraphs,
        "reading_time_minutes": stats.reading_time_minutes(settings.reading_speed_wpm),
    }))
}
