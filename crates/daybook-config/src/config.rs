//! Top-level configuration document

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{DisplayConfig, LoggingConfig, ParserConfig, StorageConfig};
use crate::error::{ConfigError, ConfigResult};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Complete daybook configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot storage
    pub storage: StorageConfig,
    /// Annotation parser
    pub parser: ParserConfig,
    /// Front-end result limits
    pub display: DisplayConfig,
    /// Log filtering
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse a TOML document; `origin` is only used in error messages
    pub fn from_toml_str(content: &str, origin: &Path) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid {
            field: "<root>".to_string(),
            message: e.to_string(),
        })
    }

    /// Reject values that deserialize fine but cannot be used
    pub fn validate(&self) -> ConfigResult<()> {
        for (start, end) in &self.parser.extended_letters {
            if start > end {
                return Err(ConfigError::Invalid {
                    field: "parser.extended_letters".to_string(),
                    message: format!("range {:?}..={:?} is inverted", start, end),
                });
            }
        }

        if self.display.snippet_width < 2 {
            return Err(ConfigError::Invalid {
                field: "display.snippet_width".to_string(),
                message: "must be at least 2".to_string(),
            });
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "logging.level".to_string(),
                message: format!("unknown level '{}'", self.logging.level),
            });
        }

        Ok(())
    }

    /// Commented example file written by `dbk config init`
    pub fn example() -> &'static str {
        r#"# Daybook Configuration
# Location: ~/.config/daybook/config.toml

[storage]
# JSON snapshot holding every journal, page and saved view.
# Default: <platform data dir>/daybook/snapshot.json
# snapshot_path = "/home/user/.local/share/daybook/snapshot.json"

[parser]
# Extra characters allowed in #tag bodies, as inclusive ranges.
# ASCII letters, digits, "_" and "-" are always allowed.
extended_letters = [["가", "힣"]]

[display]
# Rows shown under an inline {{query ...}} block
query_limit = 10
# Rows shown per saved view
view_limit = 5
# Rows shown in the backlinks listing
backlink_limit = 30
# Tags shown in the tag cloud
tag_limit = 30
# Characters of block text kept in listings
snippet_width = 120

[logging]
# off, error, warn, info, debug, trace (RUST_LOG overrides)
level = "warn"
"#
    }
}
