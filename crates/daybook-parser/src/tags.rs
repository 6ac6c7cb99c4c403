//! Hashtag extraction
//!
//! Grammar: a `#` at the start of the text or right after a whitespace
//! character, followed by one or more characters accepted by the
//! [`TagCharset`]. The tag body stops at the first character outside the set,
//! so `#work.` yields `work` and `a#b` yields nothing.

use regex::Regex;

use crate::charset::TagCharset;
use crate::error::ParserResult;

/// Compiled hashtag matcher for one charset
#[derive(Debug, Clone)]
pub struct TagExtractor {
    regex: Regex,
    charset: TagCharset,
}

impl TagExtractor {
    /// Compile a matcher for `charset`
    pub fn new(charset: TagCharset) -> ParserResult<Self> {
        let pattern = format!(r"(?:^|\s)#([{}]+)", charset.class_body()?);
        let regex = Regex::new(&pattern)?;
        Ok(Self { regex, charset })
    }

    /// The charset this matcher was built from
    pub fn charset(&self) -> &TagCharset {
        &self.charset
    }

    /// Extract distinct tags in first-seen order
    pub fn extract(&self, text: &str) -> Vec<String> {
        if !text.contains('#') {
            return Vec::new();
        }

        let mut tags: Vec<String> = Vec::new();
        for cap in self.regex.captures_iter(text) {
            let tag = &cap[1];
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }

    /// Whether `text` carries `tag`, stopping at the first match
    pub fn contains(&self, text: &str, tag: &str) -> bool {
        text.contains('#') && self.regex.captures_iter(text).any(|cap| &cap[1] == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn extractor() -> TagExtractor {
        TagExtractor::new(TagCharset::default()).unwrap()
    }

    #[test_case("#work", &["work"] ; "start of text")]
    #[test_case("Plan #work today", &["work"] ; "after space")]
    #[test_case("line\n#next", &["next"] ; "after newline")]
    #[test_case("a#b", &[] ; "glued to word")]
    #[test_case("#a#b", &["a"] ; "second hash glued")]
    #[test_case("#a #b #a", &["a", "b"] ; "dedupe keeps first")]
    #[test_case("#Work #work", &["Work", "work"] ; "case sensitive")]
    #[test_case("#snake_case #kebab-case", &["snake_case", "kebab-case"] ; "underscore and hyphen")]
    #[test_case("#work.", &["work"] ; "stops at punctuation")]
    #[test_case("# heading", &[] ; "bare hash")]
    #[test_case("##double", &[] ; "double hash")]
    #[test_case("오늘 #업무 정리", &["업무"] ; "hangul body")]
    #[test_case("#café", &["caf"] ; "latin extended stops body")]
    #[test_case("http://x.io/#frag", &[] ; "url fragment")]
    fn test_extract(text: &str, expected: &[&str]) {
        assert_eq!(extractor().extract(text), expected);
    }

    #[test_case("Plan #work today", "work", true ; "present")]
    #[test_case("#a #b #work", "work", true ; "last of several")]
    #[test_case("#workshop", "work", false ; "prefix of a longer tag")]
    #[test_case("a#work", "work", false ; "glued to word")]
    #[test_case("no tags", "work", false ; "no hash")]
    fn test_contains(text: &str, tag: &str, expected: bool) {
        assert_eq!(extractor().contains(text, tag), expected);
    }

    #[test]
    fn test_ascii_charset_ignores_hangul() {
        let ascii = TagExtractor::new(TagCharset::ascii()).unwrap();
        assert!(ascii.extract("#업무").is_empty());
        assert_eq!(ascii.extract("#ok"), vec!["ok"]);
    }

    #[test]
    fn test_custom_range() {
        let greek = TagExtractor::new(TagCharset::with_ranges([('α', 'ω')]).unwrap()).unwrap();
        assert_eq!(greek.extract("#λόγος"), vec!["λ"]);
        assert_eq!(greek.extract("#αβγ"), vec!["αβγ"]);
    }
}
