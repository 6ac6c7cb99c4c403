//! Parser component configuration

use serde::{Deserialize, Serialize};

/// Annotation parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Inclusive code point ranges accepted in tag bodies on top of ASCII
    /// letters, digits, `_` and `-`. Written as `[["가", "힣"]]` in TOML.
    pub extended_letters: Vec<(char, char)>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extended_letters: vec![('\u{AC00}', '\u{D7A3}')],
        }
    }
}
