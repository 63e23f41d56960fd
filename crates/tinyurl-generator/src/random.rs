use crate::Generator;
use tinyurl_core::{ShortCode, MAX_LENGTH};

/// Random short codes drawn from the URL-safe nanoid alphabet.
///
/// With the default length of 21 the code space is large enough that a
/// collision is practically never seen, which keeps the shortener's retry
/// loop cold.
#[derive(Debug, Clone)]
pub struct NanoidGenerator {
    length: usize,
    alphabet: Vec<char>,
}

impl NanoidGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// The length is clamped to `1..=MAX_LENGTH` so that every generated
    /// code can be resolved again.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_LENGTH),
            alphabet: nanoid::alphabet::SAFE.to_vec(),
        }
    }

    /// Replaces the alphabet codes are drawn from.
    ///
    /// An empty alphabet keeps the current one.
    pub fn with_alphabet(mut self, alphabet: impl Into<Vec<char>>) -> Self {
        let alphabet = alphabet.into();
        if !alphabet.is_empty() {
            self.alphabet = alphabet;
        }
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for NanoidGenerator {
    fn default() -> Self {
        Self::new(MAX_LENGTH)
    }
}

impl Generator for NanoidGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code = nanoid::format(nanoid::rngs::default, &self.alphabet, self.length);
        ShortCode::new_unchecked(code)
    }
}
