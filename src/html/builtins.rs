//! Built-in implementations of the plain inline tags, which convert directly into one HTML element.
use crate::{Settings, TagHandler};

use super::{escape_text, xhtml};

macro_rules! simple_tag {
    ($doc:expr, $name:ident, $label:expr, $tag:expr, $open:expr, $close:expr) => {
        #[derive(Copy, Clone, Debug, Default)]
        #[doc = $doc]
        #[doc = "<br/>"]
        #[doc = "This matches the BBCode tag `"]
        #[doc = $tag]
        #[doc = "`"]
        #[doc = "# Exact output"]
        #[doc = "This tag converts exactly to"]
        #[doc = "```html"]
        #[doc = $open]
        #[doc = " contents"]
        #[doc = $close]
        #[doc = "```"]
        pub struct $name;

        impl TagHandler for $name {
            fn name(&self) -> &str {
                $label
            }

            fn display_name(&self) -> &str {
                $tag
            }

            fn is_valid_parent(&self, _settings: &Settings, _parent: &str) -> bool {
                true
            }

            fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
                escape_text(content, out);
            }

            fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
                out.push_str($open);
            }

            fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
                out.push_str($close);
            }
        }
    };
}

simple_tag! {
    "A bold tag with no arguments, which converts directly to HTML5 `<b>`.",
    BoldTag, "Bold", "b", "<b>", "</b>"
}
simple_tag! {
    "An italic tag with no arguments, which converts directly to HTML5 `<i>`.",
    ItalicTag, "Italic", "i", "<i>", "</i>"
}
simple_tag! {
    "An underline tag with no arguments, which converts directly to HTML5 `<u>`.",
    UnderlineTag, "Underline", "u", "<u>", "</u>"
}
simple_tag! {
    "A strike-through tag with no arguments, which converts directly to HTML5 `<s>`.",
    StrikeThroughTag, "StrikeThrough", "s", "<s>", "</s>"
}
simple_tag! {
    "Subscript tag with no arguments, which converts directly to HTML5 `<sub>`.",
    SubscriptTag, "Subscript", "sub", "<sub>", "</sub>"
}
simple_tag! {
    "Superscript tag with no arguments, which converts directly to HTML5 `<sup>`.",
    SuperscriptTag, "Superscript", "sup", "<sup>", "</sup>"
}
simple_tag! {
    "Keypress styling tag with no arguments, which converts directly to HTML5 `<kbd>`.",
    KbdTag, "Keyboard", "kbd", "<kbd>", "</kbd>"
}

/// A linebreak tag with no arguments and no end, which converts to `<br>`, or `<br/>` when the `XHTML` setting is on.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinebreakTag;

impl TagHandler for LinebreakTag {
    fn name(&self) -> &str {
        "Linebreak"
    }

    fn display_name(&self) -> &str {
        "br"
    }

    fn needs_end(&self) -> bool {
        false
    }

    fn can_have_code_content(&self) -> bool {
        false
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str(if xhtml(settings) { "<br/>" } else { "<br>" });
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, _: &mut String) {}
}
