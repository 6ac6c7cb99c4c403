//! Tag body character classes
//!
//! A tag body always accepts ASCII letters, digits, `_` and `-`. Extended
//! scripts are opted into as inclusive code point ranges.

use serde::{Deserialize, Serialize};

use crate::error::{ParserError, ParserResult};

/// Hangul syllables block, `가`..=`힣`
pub const HANGUL_SYLLABLES: CharRange = CharRange {
    start: '\u{AC00}',
    end: '\u{D7A3}',
};

/// Inclusive range of code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(char, char)", into = "(char, char)")]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

impl CharRange {
    /// Create a validated range
    pub fn new(start: char, end: char) -> ParserResult<Self> {
        if start > end {
            return Err(ParserError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Check if a character falls inside the range
    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }

    fn to_class_fragment(self) -> String {
        format!("\\x{{{:X}}}-\\x{{{:X}}}", self.start as u32, self.end as u32)
    }
}

impl From<(char, char)> for CharRange {
    fn from((start, end): (char, char)) -> Self {
        Self { start, end }
    }
}

impl From<CharRange> for (char, char) {
    fn from(range: CharRange) -> Self {
        (range.start, range.end)
    }
}

/// Character set accepted in a tag body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCharset {
    extended: Vec<CharRange>,
}

impl TagCharset {
    /// ASCII-only tag bodies
    pub fn ascii() -> Self {
        Self {
            extended: Vec::new(),
        }
    }

    /// Build a charset from extended ranges, validating each one
    pub fn with_ranges<I>(ranges: I) -> ParserResult<Self>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let extended = ranges
            .into_iter()
            .map(|(start, end)| CharRange::new(start, end))
            .collect::<ParserResult<Vec<_>>>()?;
        Ok(Self { extended })
    }

    /// Extended ranges in declaration order
    pub fn extended(&self) -> &[CharRange] {
        &self.extended
    }

    /// Check if a character may appear in a tag body
    pub fn accepts(&self, c: char) -> bool {
        c.is_ascii_alphanumeric()
            || c == '_'
            || c == '-'
            || self.extended.iter().any(|range| range.contains(c))
    }

    /// Render the charset as the inside of a regex character class
    pub(crate) fn class_body(&self) -> ParserResult<String> {
        let mut body = String::from("a-zA-Z0-9_\\-");
        for range in &self.extended {
            // Re-validate: ranges deserialized via serde skip `CharRange::new`
            CharRange::new(range.start, range.end)?;
            body.push_str(&range.to_class_fragment());
        }
        Ok(body)
    }
}

impl Default for TagCharset {
    fn default() -> Self {
        Self {
            extended: vec![HANGUL_SYLLABLES],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_hangul() {
        let charset = TagCharset::default();
        assert!(charset.accepts('가'));
        assert!(charset.accepts('힣'));
        assert!(charset.accepts('z'));
        assert!(charset.accepts('-'));
        assert!(!charset.accepts('#'));
        assert!(!charset.accepts('é'));
    }

    #[test]
    fn test_ascii_rejects_hangul() {
        assert!(!TagCharset::ascii().accepts('가'));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = TagCharset::with_ranges([('z', 'a')]).unwrap_err();
        assert_eq!(err, ParserError::InvalidRange { start: 'z', end: 'a' });
    }

    #[test]
    fn test_class_body_escapes_ranges() {
        let charset = TagCharset::default();
        assert_eq!(charset.class_body().unwrap(), "a-zA-Z0-9_\\-\\x{AC00}-\\x{D7A3}");
    }
}
