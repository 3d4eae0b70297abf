//! The capability every tag implementation provides to the parser.
use static_assertions::assert_obj_safe;

use crate::Settings;

/// Parent name passed to [`TagHandler::is_valid_parent`] when a tag is not nested inside any other tag.
pub const GLOBAL: &str = "GLOBAL";

/// The primary trait for turning one BBCode tag into output.
/// # Remarks
/// Handlers are shared between every call on a configured parser and may be invoked out of document order
/// (see [`ParserFeature::HANDLE_OVERLAPPING`][crate::ParserFeature::HANDLE_OVERLAPPING]), so they must not
/// keep state between calls.
///
/// All writing methods push into the given `out` buffer, which may already have contents. An implementation
/// must not overwrite prior contents.
pub trait TagHandler: Send + Sync {
    /// Human readable name, i.e. `Bold`.
    fn name(&self) -> &str;

    /// The name as written between the delimiters, i.e. `b`. Must not start with `/`.
    fn display_name(&self) -> &str;

    /// Whether this tag is closed by an end tag. Tags that aren't only implement [`TagHandler::open`].
    fn needs_end(&self) -> bool {
        true
    }

    /// Whether other tags may appear inside this one. A `[code]` block usually returns false here.
    fn can_have_code_content(&self) -> bool {
        true
    }

    fn can_have_argument(&self) -> bool {
        false
    }

    /// For consistency, a tag which cannot have an argument should return false here.
    fn must_have_argument(&self) -> bool {
        false
    }

    /// Display name of a tag to close automatically, if it is open, when this tag is opened.
    /// # Remarks
    /// With `*` returned here, `[*]foo [*]bar` is read as `[*]foo [/*][*]bar`.
    fn auto_close_on_open(&self) -> Option<&str> {
        None
    }

    /// Display name of a tag to close automatically, if it is open, when this tag is closed.
    fn auto_close_on_close(&self) -> Option<&str> {
        None
    }

    /// Whether the given argument is acceptable. Only consulted for tags that [can have one][TagHandler::can_have_argument].
    fn is_valid_argument(&self, _settings: &Settings, _argument: Option<&str>) -> bool {
        false
    }

    /// Whether this tag may be nested directly inside `parent`, which is a display name or [`GLOBAL`].
    fn is_valid_parent(&self, _settings: &Settings, _parent: &str) -> bool {
        true
    }

    /// Escape literal content found directly inside this tag.
    fn escape(&self, settings: &Settings, content: &str, out: &mut String);

    /// Produce the opening output for this tag.
    /// # Remarks
    /// `closing` is `None` when the tag is genuinely being opened. It holds the name of another tag when this one
    /// is being reopened after that other tag was closed across it.
    fn open(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String);

    /// Produce the closing output for this tag. `argument` is the one given to the matching open tag.
    /// # Remarks
    /// `closing` is `None` when the tag closes itself, and the name of the tag really being closed when
    /// this one is only being closed temporarily so it can be reopened afterwards.
    fn close(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String);
}

assert_obj_safe!(TagHandler);

/// A root handler that passes content through untouched.
/// # Remarks
/// Used when a parser is built without any root of its own.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlainRoot;

impl TagHandler for PlainRoot {
    fn name(&self) -> &str {
        GLOBAL
    }

    fn display_name(&self) -> &str {
        GLOBAL
    }

    fn needs_end(&self) -> bool {
        false
    }

    fn is_valid_parent(&self, _settings: &Settings, _parent: &str) -> bool {
        false
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        out.push_str(content);
    }

    fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>, _: &mut String) {}

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, _: &mut String) {}
}
