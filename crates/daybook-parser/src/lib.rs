//! Daybook Annotation Parser
//!
//! Extracts the two kinds of structured annotation that live inside free
//! block text:
//! - `#tag` hashtags, used for filtering
//! - `[[Page Name]]` references, used for page materialization and backlinks
//!
//! Both extractors are pure functions of their input. There is no escaping
//! mechanism: a literal `]]` cannot appear inside a link name, and a `#`
//! glued to the previous word is not a tag.

pub mod annotations;
pub mod charset;
pub mod error;
pub mod tags;
pub mod wikilinks;

pub use annotations::{extract_links, extract_tags, AnnotationParser, Annotations};
pub use charset::{CharRange, TagCharset, HANGUL_SYLLABLES};
pub use error::{ParserError, ParserResult};
pub use wikilinks::{link_token, parse_links};
