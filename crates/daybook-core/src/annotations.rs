//! Annotation types re-exported from `daybook-parser`, plus construction
//! from configuration

use daybook_config::ParserConfig;
pub use daybook_parser::{
    extract_links, extract_tags, link_token, AnnotationParser, Annotations, TagCharset,
};

use crate::error::CoreResult;

/// Build the annotation parser described by the `[parser]` config section
pub fn parser_from_config(config: &ParserConfig) -> CoreResult<AnnotationParser> {
    let charset = TagCharset::with_ranges(config.extended_letters.iter().copied())?;
    Ok(AnnotationParser::new(charset)?)
}
