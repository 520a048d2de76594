//! Text normalization shared by catalog profiles and queries
//!
//! Catalog documents and incoming queries must go through exactly the same
//! procedure, otherwise identical raw text would land on different terms.

use crate::segment::{Lexicon, Segmenter};
use unicode_normalization::UnicodeNormalization;

/// Vietnamese letters kept in addition to ASCII letters and digits
pub const VIETNAMESE_LETTERS: &str = "àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđ\
ÀÁẠẢÃÂẦẤẬẨẪĂẰẮẶẲẴÈÉẸẺẼÊỀẾỆỂỄÌÍỊỈĨÒÓỌỎÕÔỒỐỘỔỖƠỜỚỢỞỠÙÚỤỦŨƯỪỨỰỬỮỲÝỴỶỸĐ";

/// Whether a character survives the punctuation strip
#[inline]
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || VIETNAMESE_LETTERS.contains(c)
}

/// Lowercases, strips punctuation and segments text into canonical tokens
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    segmenter: Segmenter,
}

impl Normalizer {
    #[must_use]
    pub fn new(segmenter: Segmenter) -> Self {
        Self { segmenter }
    }

    #[must_use]
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self::new(Segmenter::new(lexicon))
    }

    #[must_use]
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Normalize a possibly-missing text field.
    ///
    /// Absent input yields an empty string. Disallowed characters become a
    /// space rather than being dropped so that "nike/adidas" stays two words.
    pub fn normalize(&self, text: Option<&str>) -> String {
        let text = match text {
            Some(t) => t,
            None => return String::new(),
        };

        let cleaned: String = text
            .nfc()
            .collect::<String>()
            .to_lowercase()
            .chars()
            .map(|c| if is_allowed(c) { c } else { ' ' })
            .collect();

        self.segmenter.segment(&cleaned).join(" ")
    }

    /// Shorthand for present text
    #[inline]
    pub fn normalize_str(&self, text: &str) -> String {
        self.normalize(Some(text))
    }
}
