use std::collections::HashSet;

use bitflags::bitflags;
use static_assertions::assert_impl_all;

use crate::{handler::PlainRoot, ConfigError, Settings, TagHandler, TagRegistry};

mod render;
mod stream;
mod token;
mod validate;

pub use token::{ParseQueue, Token, TokenKind, TokenStatus};

bitflags! {
    /// Switches controlling how a parser treats its input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ParserFeature: u32 {
        /// Return the input unchanged if any tag turns out invalid.
        /// Tags that have no handler or aren't allowed are not invalid.
        const ALL_OR_NOTHING = 1 << 0;

        /// Allow tags to be closed out of order, i.e. `[b][i][/b][/i]`.
        /// Tags still open are closed and then reopened around the tag being closed, so output stays properly nested.
        const HANDLE_OVERLAPPING = 1 << 1;

        /// Escape content through the handler of the tag it sits in.
        const ESCAPE_CONTENT = 1 << 2;

        /// Escape rejected tags that are written back out as text, the same way content is.
        const ESCAPE_LITERAL_TAGS = 1 << 3;
    }
}

impl Default for ParserFeature {
    fn default() -> Self {
        ParserFeature::ALL_OR_NOTHING | ParserFeature::ESCAPE_CONTENT | ParserFeature::ESCAPE_LITERAL_TAGS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub feature_flags: ParserFeature,
    /// Marks the start of a tag, `[` by default.
    pub tag_start: String,
    /// Marks the end of a tag, `]` by default.
    pub tag_end: String,
    pub settings: Settings,
    /// Display names of the tags that may be formatted. `None` allows every registered tag.
    pub allowed_tags: Option<HashSet<String>>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            feature_flags: ParserFeature::default(),
            tag_start: "[".to_owned(),
            tag_end: "]".to_owned(),
            settings: Settings::default(),
            allowed_tags: None,
        }
    }
}

impl ParserConfig {
    fn check(&self) -> Result<(), ConfigError> {
        if self.tag_start.is_empty() || self.tag_end.is_empty() {
            Err(ConfigError::EmptyDelimiter)
        } else if self.tag_start == self.tag_end {
            Err(ConfigError::IdenticalDelimiters(self.tag_start.clone()))
        } else {
            Ok(())
        }
    }
}

/// Converts BBCode to another markup through a set of [`TagHandler`]s.
/// # Remarks
/// A parser can't be changed once built. Every call works on its own state, so one parser can be shared
/// freely between threads.
#[doc(alias = "parser")]
#[derive(Debug)]
pub struct BBCodeParser {
    registry: TagRegistry,
    config: ParserConfig,
}

assert_impl_all!(BBCodeParser: Send, Sync);

impl BBCodeParser {
    pub fn new(registry: TagRegistry, config: ParserConfig) -> Result<Self, ConfigError> {
        config.check()?;
        Ok(Self { registry, config })
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Whether the tag with the given display name may be formatted.
    pub fn is_allowed(&self, name: &str) -> bool {
        self.config
            .allowed_tags
            .as_ref()
            .map_or(true, |x| x.contains(name))
    }

    /// Format `input` with the parser's configured features.
    pub fn format(&self, input: &str) -> String {
        self.format_with(input, self.config.feature_flags)
    }

    /// Format `input`, using `features` in place of the configured ones for this call only.
    #[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
    pub fn format_with(&self, input: &str, features: ParserFeature) -> String {
        if !self.has_tags(input) {
            return self.format_plain(input, features);
        }

        match self.parse_with(input, features) {
            Some(queue) => render::render(self, &queue, features, input.len()),
            None => input.to_owned(),
        }
    }

    /// Build and validate the token queue for `input` without rendering it.
    /// Returns `None` if all-or-nothing validation rejected the input.
    pub fn parse<'a>(&self, input: &'a str) -> Option<ParseQueue<'a>> {
        self.parse_with(input, self.config.feature_flags)
    }

    pub fn parse_with<'a>(&self, input: &'a str, features: ParserFeature) -> Option<ParseQueue<'a>> {
        let mut queue = stream::build_queue(self, input);
        validate::validate(self, &mut queue, features).ok()?;
        Some(queue)
    }

    fn has_tags(&self, input: &str) -> bool {
        input.contains(self.config.tag_start.as_str()) && input.contains(self.config.tag_end.as_str())
    }

    fn format_plain(&self, input: &str, features: ParserFeature) -> String {
        if features.contains(ParserFeature::ESCAPE_CONTENT) {
            let mut out = String::with_capacity(input.len());
            self.registry.root().escape(&self.config.settings, input, &mut out);
            out
        } else {
            input.to_owned()
        }
    }
}

impl Default for BBCodeParser {
    /// A parser with every built-in tag and the default configuration.
    fn default() -> Self {
        Self {
            registry: default_registry(),
            config: ParserConfig::default(),
        }
    }
}

#[cfg(feature = "html_gen")]
fn default_registry() -> TagRegistry {
    TagRegistry::html_defaults()
}

#[cfg(not(feature = "html_gen"))]
fn default_registry() -> TagRegistry {
    TagRegistry::default()
}

/// Step by step construction of a [`BBCodeParser`].
#[derive(Default)]
pub struct ParserBuilder {
    tags: Vec<Box<dyn TagHandler>>,
    root: Option<Box<dyn TagHandler>>,
    replace_defaults: bool,
    config: ParserConfig,
}

impl ParserBuilder {
    /// Add a tag, replacing any built-in tag with the same display name.
    pub fn tag(mut self, tag: impl TagHandler + 'static) -> Self {
        self.tags.push(Box::new(tag));
        self
    }

    pub fn tags(mut self, tags: Vec<Box<dyn TagHandler>>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Use `root` for content that isn't inside any tag.
    pub fn root(mut self, root: impl TagHandler + 'static) -> Self {
        self.root = Some(Box::new(root));
        self
    }

    /// Start from no tags at all instead of the built-in ones.
    /// # Remarks
    /// Without a [root][ParserBuilder::root], content outside tags is then passed through unescaped.
    pub fn replace_defaults(mut self) -> Self {
        self.replace_defaults = true;
        self
    }

    /// Only format the given tags, writing every other tag back out as text.
    pub fn allowed_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_tags = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.settings.set(key, value);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.config.settings.merge(settings);
        self
    }

    pub fn features(mut self, features: ParserFeature) -> Self {
        self.config.feature_flags = features;
        self
    }

    pub fn delimiters(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.config.tag_start = start.into();
        self.config.tag_end = end.into();
        self
    }

    pub fn build(self) -> Result<BBCodeParser, ConfigError> {
        let mut registry = if self.replace_defaults {
            TagRegistry::new(self.root.unwrap_or_else(|| Box::new(PlainRoot)))
        } else {
            let mut registry = default_registry();
            if let Some(root) = self.root {
                registry.set_root(root);
            }
            registry
        };

        registry.register_tags(self.tags)?;
        BBCodeParser::new(registry, self.config)
    }
}

#[cfg(test)]
mod tests;
