/// How a record's `answer` field is resolved to an option index.
///
/// Quiz banks store a letter (`"b"`), review banks store the option text
/// itself. The two are not interchangeable, so each loaded bank picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerRule {
    /// `a`/`b`/`c`/`d`, case-insensitive, maps to `0..=3`.
    #[default]
    Letter,
    /// Index of the first option equal to `answer`.
    OptionText,
}

impl AnswerRule {
    /// Resolve `answer` against `options`.
    ///
    /// `Letter` does not check the index against `options`; a `"d"` on a
    /// two-option record resolves to `Some(3)` and can never be matched.
    #[must_use]
    pub fn resolve(self, answer: &str, options: &[String]) -> Option<usize> {
        match self {
            AnswerRule::Letter => match answer.to_lowercase().as_str() {
                "a" => Some(0),
                "b" => Some(1),
                "c" => Some(2),
                "d" => Some(3),
                _ => None,
            },
            AnswerRule::OptionText => options.iter().position(|opt| opt == answer),
        }
    }
}

/// Display label for an option index: `0 → 'A'`.
#[must_use]
pub fn option_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}
