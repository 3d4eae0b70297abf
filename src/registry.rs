//! Lookup from tag names to their handlers.
use std::{borrow::Borrow, collections::HashMap, fmt};

use crate::{
    handler::{PlainRoot, GLOBAL},
    ConfigError, TagHandler,
};

/// A display name that has been checked to be usable as a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(Box<str>);

impl TagName {
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        if name.is_empty() {
            Err(ConfigError::EmptyTagName)
        } else if name.starts_with('/') {
            Err(ConfigError::CloseMarkerInName(name.to_owned()))
        } else if name == GLOBAL {
            Err(ConfigError::ReservedTagName(name.to_owned()))
        } else {
            Ok(Self(name.into()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TagName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every tag a parser knows about, plus the root handler used for content outside any tag.
pub struct TagRegistry {
    root: Box<dyn TagHandler>,
    tags: HashMap<TagName, Box<dyn TagHandler>>,
}

impl TagRegistry {
    /// Construct a new registry with no tags.
    pub fn new(root: Box<dyn TagHandler>) -> Self {
        Self {
            root,
            tags: HashMap::new(),
        }
    }

    /// Construct a new registry with the given tags.
    pub fn with_tags(
        root: Box<dyn TagHandler>,
        tags: Vec<Box<dyn TagHandler>>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new(root);
        registry.register_tags(tags)?;
        Ok(registry)
    }

    /// A registry holding every built-in HTML tag.
    #[cfg(feature = "html_gen")]
    pub fn html_defaults() -> Self {
        let mut registry = Self::new(Box::new(crate::html::HtmlRoot));
        for tag in crate::html::all_default_tags() {
            // Built-in names are all well formed.
            if let Ok(name) = TagName::new(tag.display_name()) {
                registry.tags.insert(name, tag);
            }
        }
        registry
    }

    /// Register the provided tag, replacing any handler already registered under the same display name.
    pub fn register_tag(&mut self, tag: Box<dyn TagHandler>) -> Result<(), ConfigError> {
        let name = TagName::new(tag.display_name())?;
        if let Some(old) = self.tags.insert(name, tag) {
            tracing::debug!(tag = old.display_name(), "tag handler replaced");
        }
        Ok(())
    }

    /// Register the provided tags.
    pub fn register_tags(&mut self, tags: Vec<Box<dyn TagHandler>>) -> Result<(), ConfigError> {
        tags.into_iter().try_for_each(|tag| self.register_tag(tag))
    }

    pub fn set_root(&mut self, root: Box<dyn TagHandler>) {
        self.root = root;
    }

    pub fn root(&self) -> &dyn TagHandler {
        self.root.as_ref()
    }

    /// Attempt to locate the implementation for the given tag, if one exists.
    pub fn get(&self, name: &str) -> Option<&dyn TagHandler> {
        self.tags.get(name).map(|x| x.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &TagName> {
        self.tags.keys()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new(Box::new(PlainRoot))
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.tags.keys().map(TagName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TagRegistry")
            .field("root", &self.root.name())
            .field("tags", &names)
            .finish()
    }
}
