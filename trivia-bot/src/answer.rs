//! Current answer and its progressively revealed clues.

/// Highest clue level. `give_clue` past this returns the level-3 clue again.
pub const MAX_CLUE: usize = 3;

const MASK: char = '*';

/// Holds the answer for the current round and masks it according to how
/// many clues have been given.
#[derive(Debug, Clone, Default)]
pub struct AnswerTracker {
    answer: String,
    clue_index: usize,
}

impl AnswerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a new answer and reset the clue index.
    pub fn set_answer(&mut self, answer: &str) {
        self.answer = answer.trim().to_string();
        self.clue_index = 0;
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn clue_index(&self) -> usize {
        self.clue_index
    }

    /// Clue for the current level, without advancing.
    pub fn current_clue(&self) -> String {
        mask(&self.answer, self.clue_index)
    }

    /// Advance one level (clamped at [`MAX_CLUE`]) and return the new clue.
    pub fn give_clue(&mut self) -> String {
        self.clue_index = (self.clue_index + 1).min(MAX_CLUE);
        self.current_clue()
    }

    /// Trimmed, case-insensitive comparison against the answer.
    pub fn matches(&self, candidate: &str) -> bool {
        !self.answer.is_empty() && candidate.trim().to_lowercase() == self.answer.to_lowercase()
    }

    /// Answer length in characters.
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }
}

/// Level 0 hides every letter and digit; 1 shows word initials; 2 adds the
/// last letter of each word; 3 adds vowels.
fn mask(answer: &str, level: usize) -> String {
    let chars: Vec<char> = answer.chars().collect();
    let mut out = String::with_capacity(answer.len());
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            out.push(c);
            continue;
        }
        let word_start = i == 0 || !chars[i - 1].is_alphanumeric();
        let word_end = i + 1 == chars.len() || !chars[i + 1].is_alphanumeric();
        let shown = match level {
            0 => false,
            1 => word_start,
            2 => word_start || word_end,
            _ => word_start || word_end || is_vowel(c),
        };
        out.push(if shown { c } else { MASK });
    }
    out
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}
