//! Block level tags.
//!
//! These only write their wrapper when opened or closed for real. While being closed and reopened around an
//! overlapping tag they write nothing, as a block element can't be split.
use crate::{Settings, TagHandler};

use super::{escape_attribute, escape_text};

macro_rules! align_tag {
    ($doc:expr, $name:ident, $label:expr, $tag:expr, $align:literal) => {
        #[derive(Copy, Clone, Debug, Default)]
        #[doc = $doc]
        pub struct $name;

        impl TagHandler for $name {
            fn name(&self) -> &str {
                $label
            }

            fn display_name(&self) -> &str {
                $tag
            }

            fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
                escape_text(content, out);
            }

            fn open(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
                if closing.is_none() {
                    out.push_str(concat!("<div style=\"display: block; text-align: ", $align, "\">"));
                }
            }

            fn close(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
                if closing.is_none() {
                    out.push_str("</div>");
                }
            }
        }
    };
}

align_tag! {
    "Left-align tag with no arguments, which converts to a left aligned `<div>`.",
    LeftTag, "Left", "left", "left"
}
align_tag! {
    "Centering tag with no arguments, which converts to a centered `<div>`.",
    CenterTag, "Center", "center", "center"
}
align_tag! {
    "Right-align tag with no arguments, which converts to a right aligned `<div>`.",
    RightTag, "Right", "right", "right"
}

/// Write the outer box and title bar shared by quotes and code blocks, leaving the body open.
fn write_titled_box(settings: &Settings, prefix: &str, title: &str, out: &mut String) {
    let border = settings.get_or(&format!("{prefix}Border"), "1px solid gray");

    out.push_str("<div style=\"display: block; margin-bottom: .5em; border: ");
    escape_attribute(border, out);
    out.push_str("; background-color: ");
    escape_attribute(settings.get_or(&format!("{prefix}Background"), "white"), out);
    out.push_str("\"><div style=\"display: block; width: 100%; text-indent: .25em; border-bottom: ");
    escape_attribute(border, out);
    out.push_str("; background-color: ");
    escape_attribute(settings.get_or(&format!("{prefix}TitleBackground"), "white"), out);
    out.push_str("\">");
    escape_text(title, out);
    out.push_str("</div>");
}

/// Write ` class="..."` using a class name template from the settings, i.e. `quotebox-{by}`.
fn write_class(settings: &Settings, key: &str, placeholder: &str, value: &str, out: &mut String) {
    if let Some(template) = settings.get(key) {
        out.push_str(" class=\"");
        escape_attribute(&template.replace(placeholder, value), out);
        out.push('"');
    }
}

/// Quote tag, `[quote]` or `[quote=Author]`, converting to a titled box.
/// # Remarks
/// Styling comes from the `QuoteBorder`, `QuoteBackground`, `QuoteTitleBackground` and `QuoteCSSClassName` settings.
#[derive(Copy, Clone, Debug, Default)]
pub struct QuoteTag;

impl TagHandler for QuoteTag {
    fn name(&self) -> &str {
        "Quote"
    }

    fn display_name(&self) -> &str {
        "quote"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, _settings: &Settings, _argument: Option<&str>) -> bool {
        true
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_some() {
            return;
        }

        let title = match argument {
            Some(by) => format!("QUOTE by {by}"),
            None => "QUOTE".to_owned(),
        };

        write_titled_box(settings, "Quote", &title, out);
        out.push_str("<div");
        if let Some(by) = argument {
            write_class(settings, "QuoteCSSClassName", "{by}", by, out);
        }
        out.push_str(" style=\"overflow-x: auto; padding: .25em\">");
    }

    fn close(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            out.push_str("</div></div>");
        }
    }
}

/// Shared implementation of the code block tags.
fn open_code_box(settings: &Settings, language: Option<&str>, extra_style: &str, out: &mut String) {
    let title = match language {
        Some(lang) => format!("CODE ({lang})"),
        None => "CODE".to_owned(),
    };

    write_titled_box(settings, "Code", &title, out);
    out.push_str("<pre");
    if let Some(lang) = language {
        write_class(settings, "CodeCSSClassName", "{lang}", &lang.to_lowercase(), out);
    }
    out.push_str(" style=\"");
    out.push_str(extra_style);
    out.push_str("overflow-x: auto; margin: 0; font-family: monospace; white-space: pre-wrap; padding: .25em\">");
}

/// Code block tag, `[code]` or `[code=rust]`. Tags inside it are left as text.
#[derive(Copy, Clone, Debug, Default)]
pub struct CodeTag;

impl TagHandler for CodeTag {
    fn name(&self) -> &str {
        "Code"
    }

    fn display_name(&self) -> &str {
        "code"
    }

    fn can_have_code_content(&self) -> bool {
        false
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, _settings: &Settings, _argument: Option<&str>) -> bool {
        true
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            open_code_box(settings, argument, "", out);
        }
    }

    fn close(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            out.push_str("</pre></div>");
        }
    }
}

/// Like [CodeTag], but with a fixed height that scrolls.
#[derive(Copy, Clone, Debug, Default)]
pub struct CodeBoxTag;

impl TagHandler for CodeBoxTag {
    fn name(&self) -> &str {
        "Code Box"
    }

    fn display_name(&self) -> &str {
        "codebox"
    }

    fn can_have_code_content(&self) -> bool {
        false
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, _settings: &Settings, _argument: Option<&str>) -> bool {
        true
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            open_code_box(settings, argument, "height: 29ex; overflow-y: auto; ", out);
        }
    }

    fn close(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            out.push_str("</pre></div>");
        }
    }
}

/// `list-style-type`s of unordered lists, by argument.
const UNORDERED_TYPES: &[(&str, &str)] = &[("circle", "circle"), ("disk", "disc"), ("square", "square")];

/// `list-style-type`s of ordered lists, by argument.
const ORDERED_TYPES: &[(&str, &str)] = &[
    ("1", "decimal"),
    ("a", "lower-alpha"),
    ("A", "upper-alpha"),
    ("i", "lower-roman"),
    ("I", "upper-roman"),
];

fn lookup(types: &'static [(&'static str, &'static str)], key: Option<&str>) -> Option<&'static str> {
    let key = key?;
    types.iter().find(|(k, _)| *k == key).map(|(_, css)| *css)
}

/// Unordered list tag, `[ul]` or `[ul=square]`.
/// # Remarks
/// Without a valid argument the `UnorderedListDefaultType` setting is used, then `disk`.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnorderedListTag;

impl TagHandler for UnorderedListTag {
    fn name(&self) -> &str {
        "Unordered List"
    }

    fn display_name(&self) -> &str {
        "ul"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn auto_close_on_close(&self) -> Option<&str> {
        Some("*")
    }

    fn is_valid_argument(&self, _settings: &Settings, argument: Option<&str>) -> bool {
        argument.is_none() || lookup(UNORDERED_TYPES, argument).is_some()
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_some() {
            return;
        }

        let style = lookup(UNORDERED_TYPES, argument)
            .or_else(|| lookup(UNORDERED_TYPES, settings.get("UnorderedListDefaultType")))
            .unwrap_or("disc");
        out.push_str("<ul style=\"list-style-type: ");
        out.push_str(style);
        out.push_str("\">");
    }

    fn close(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            out.push_str("</ul>");
        }
    }
}

/// Ordered list tag, `[ol]` or `[ol=A]`.
/// # Remarks
/// Without a valid argument the `OrderedListDefaultType` setting is used, then `1`.
#[derive(Copy, Clone, Debug, Default)]
pub struct OrderedListTag;

impl TagHandler for OrderedListTag {
    fn name(&self) -> &str {
        "Ordered List"
    }

    fn display_name(&self) -> &str {
        "ol"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn auto_close_on_close(&self) -> Option<&str> {
        Some("*")
    }

    fn is_valid_argument(&self, _settings: &Settings, argument: Option<&str>) -> bool {
        argument.is_none() || lookup(ORDERED_TYPES, argument).is_some()
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_some() {
            return;
        }

        let style = lookup(ORDERED_TYPES, argument)
            .or_else(|| lookup(ORDERED_TYPES, settings.get("OrderedListDefaultType")))
            .unwrap_or("decimal");
        out.push_str("<ol style=\"list-style-type: ");
        out.push_str(style);
        out.push_str("\">");
    }

    fn close(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            out.push_str("</ol>");
        }
    }
}

/// List item tag, `[li]`, only valid directly inside a list.
#[derive(Copy, Clone, Debug, Default)]
pub struct ListItemTag;

impl TagHandler for ListItemTag {
    fn name(&self) -> &str {
        "List Item"
    }

    fn display_name(&self) -> &str {
        "li"
    }

    fn is_valid_parent(&self, _settings: &Settings, parent: &str) -> bool {
        matches!(parent, "ul" | "ol" | "list")
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("<li>");
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("</li>");
    }
}

/// Generic list tag, `[list]`, `[list=square]` or `[list=1]`, which becomes a `<ul>` or `<ol>` by its argument.
/// # Remarks
/// Closing the list also closes its last `[*]` item.
#[derive(Copy, Clone, Debug, Default)]
pub struct ListTag;

impl ListTag {
    /// Element name and `list-style-type` for the given argument.
    fn kind(settings: &Settings, argument: Option<&str>) -> (&'static str, &'static str) {
        let default = settings.get("ListDefaultType");

        lookup(UNORDERED_TYPES, argument)
            .map(|x| ("ul", x))
            .or_else(|| lookup(ORDERED_TYPES, argument).map(|x| ("ol", x)))
            .or_else(|| lookup(UNORDERED_TYPES, default).map(|x| ("ul", x)))
            .or_else(|| lookup(ORDERED_TYPES, default).map(|x| ("ol", x)))
            .unwrap_or(("ul", "disc"))
    }
}

impl TagHandler for ListTag {
    fn name(&self) -> &str {
        "List"
    }

    fn display_name(&self) -> &str {
        "list"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn auto_close_on_close(&self) -> Option<&str> {
        Some("*")
    }

    fn is_valid_argument(&self, _settings: &Settings, argument: Option<&str>) -> bool {
        argument.is_none()
            || lookup(UNORDERED_TYPES, argument).is_some()
            || lookup(ORDERED_TYPES, argument).is_some()
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_some() {
            return;
        }

        let (element, style) = Self::kind(settings, argument);
        out.push('<');
        out.push_str(element);
        out.push_str(" style=\"list-style-type: ");
        out.push_str(style);
        out.push_str("\">");
    }

    fn close(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            let (element, _) = Self::kind(settings, argument);
            out.push_str("</");
            out.push_str(element);
            out.push('>');
        }
    }
}

/// List item marker, `[*]`. A new `[*]` ends the previous item, so items don't need to be closed.
#[derive(Copy, Clone, Debug, Default)]
pub struct StarTag;

impl TagHandler for StarTag {
    fn name(&self) -> &str {
        "Star"
    }

    fn display_name(&self) -> &str {
        "*"
    }

    fn auto_close_on_open(&self) -> Option<&str> {
        Some("*")
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("<li>");
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("</li>");
    }
}
