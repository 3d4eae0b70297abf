//! **Simple** HTML output for the commonly used BBCode tags.
//!  While not comprehensive of more exotic usecases, likely sufficient for most.
use crate::{Settings, TagHandler, GLOBAL};

mod blocks;
mod builtins;
mod formatting;

pub use blocks::{
    CenterTag, CodeBoxTag, CodeTag, LeftTag, ListItemTag, ListTag, OrderedListTag, QuoteTag, RightTag, StarTag,
    UnorderedListTag,
};
pub use builtins::{
    BoldTag, ItalicTag, KbdTag, LinebreakTag, StrikeThroughTag, SubscriptTag, SuperscriptTag, UnderlineTag,
};
pub use formatting::{ColorTag, FontSizeTag, FontTag, ImageTag, LinkTag};

/// Push `content`, HTML encoded so it is safe as element text, into `out`.
pub fn escape_text(content: &str, out: &mut String) {
    html_escape::encode_text_to_string(content, out);
}

/// Push `value`, encoded for use inside a double quoted attribute, into `out`.
pub fn escape_attribute(value: &str, out: &mut String) {
    html_escape::encode_double_quoted_attribute_to_string(value, out);
}

/// Whether the `XHTML` setting asks for self-closed void elements.
pub(crate) fn xhtml(settings: &Settings) -> bool {
    settings.get_bool("XHTML").unwrap_or(false)
}

/// The root handler for HTML output, which escapes any content outside of tags.
#[derive(Copy, Clone, Debug, Default)]
pub struct HtmlRoot;

impl TagHandler for HtmlRoot {
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
        escape_text(content, out);
    }

    fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>, _: &mut String) {}

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, _: &mut String) {}
}

macro_rules! tag_list {
    ($($tag:ident),*) => {
        {
            let v: Vec<Box<dyn TagHandler>> = vec![
                $(
                    Box::new($tag::default()),
                )*
            ];

            v
        }
    };
}

/// Returns the default tag set.
/// # Included tags
/// - [BoldTag], [ItalicTag], [UnderlineTag], [StrikeThroughTag]
/// - [FontTag], [FontSizeTag], [ColorTag]
/// - [LeftTag], [CenterTag], [RightTag]
/// - [QuoteTag], [CodeTag], [CodeBoxTag]
/// - [LinkTag], [ImageTag]
/// - [UnorderedListTag], [OrderedListTag], [ListItemTag], [ListTag], [StarTag]
pub fn all_default_tags() -> Vec<Box<dyn TagHandler>> {
    tag_list! {
        BoldTag,
        ItalicTag,
        UnderlineTag,
        StrikeThroughTag,
        FontTag,
        FontSizeTag,
        ColorTag,
        LeftTag,
        CenterTag,
        RightTag,
        QuoteTag,
        CodeTag,
        CodeBoxTag,
        LinkTag,
        ImageTag,
        UnorderedListTag,
        OrderedListTag,
        ListItemTag,
        ListTag,
        StarTag
    }
}

/// Returns tags that aren't part of the defaults but are commonly supported elsewhere.
/// # Included tags
/// - [SubscriptTag]
/// - [SuperscriptTag]
/// - [KbdTag]
/// - [LinebreakTag]
pub fn extended_tags() -> Vec<Box<dyn TagHandler>> {
    tag_list! {
        SubscriptTag,
        SuperscriptTag,
        KbdTag,
        LinebreakTag
    }
}
