//! BBCode to HTML conversion with configurable handling of malformed, disallowed and unknown tags.
//!
//! Input is split into content and tags, tags are paired up and checked against their [`TagHandler`]s, and the
//! result is written out through those same handlers. Anything that can't be formatted is written back out as
//! text, or, with [`ParserFeature::ALL_OR_NOTHING`], the whole input is returned untouched.

mod error;
mod handler;
mod parser;
mod registry;
mod settings;
pub mod tokenizer;

#[cfg(feature = "html_gen")]
pub mod html;

pub use error::ConfigError;
pub use handler::{PlainRoot, TagHandler, GLOBAL};
pub use parser::{
    BBCodeParser, ParseQueue, ParserBuilder, ParserConfig, ParserFeature, Token, TokenKind, TokenStatus,
};
pub use registry::{TagName, TagRegistry};
pub use settings::Settings;
