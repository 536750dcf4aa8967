/// Cheap screen for abusive questions: a banned-word list plus a shouting
/// check. Never fails; anything it cannot judge is allowed through.
#[derive(Debug, Clone)]
pub struct ModerationPolicy {
    banned_words: Vec<String>,
    max_caps_ratio: f64,
    min_length_for_caps: usize,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            banned_words: Vec::new(),
            max_caps_ratio: 0.5,
            min_length_for_caps: 20,
        }
    }
}

impl ModerationPolicy {
    pub fn with_banned_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banned_words = words
            .into_iter()
            .map(|w| w.into().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    pub fn is_offensive(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        if self.banned_words.iter().any(|word| lower.contains(word.as_str())) {
            return true;
        }

        let length = text.chars().count();
        if length <= self.min_length_for_caps {
            return false;
        }
        let caps = text.chars().filter(|c| c.is_ascii_uppercase()).count();
        caps as f64 / length as f64 > self.max_caps_ratio
    }
}
