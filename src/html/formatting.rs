//! Inline tags whose output depends on their argument.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Settings, TagHandler};

use super::{escape_attribute, escape_text, xhtml};

/// Font size tag, `[size=12]`, converting to a `<span>` with a `font-size` style.
/// # Remarks
/// The size must be a positive integer no larger than the `FontSizeMax` setting, when that is positive.
/// The unit comes from the `FontSizeUnit` setting.
#[derive(Copy, Clone, Debug, Default)]
pub struct FontSizeTag;

impl TagHandler for FontSizeTag {
    fn name(&self) -> &str {
        "Font Size"
    }

    fn display_name(&self) -> &str {
        "size"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn must_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, settings: &Settings, argument: Option<&str>) -> bool {
        let Some(size) = argument.and_then(|x| x.trim().parse::<i64>().ok()) else {
            return false;
        };

        match settings.get_int("FontSizeMax") {
            Some(max) if max > 0 => size > 0 && size <= max,
            _ => size > 0,
        }
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>, out: &mut String) {
        let size = argument
            .and_then(|x| x.trim().parse::<i64>().ok())
            .unwrap_or_default();
        out.push_str("<span style=\"font-size: ");
        out.push_str(&size.to_string());
        escape_attribute(settings.get_or("FontSizeUnit", "px"), out);
        out.push_str("\">");
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("</span>");
    }
}

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black", "blanchedalmond",
    "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse", "chocolate", "coral", "cornflowerblue",
    "cornsilk", "crimson", "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray",
    "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold",
    "goldenrod", "gray", "green", "greenyellow", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki",
    "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgrey", "lightgreen", "lightpink", "lightsalmon", "lightseagreen",
    "lightskyblue", "lightslategray", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen",
    "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange", "orangered",
    "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru",
    "pink", "plum", "powderblue", "purple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon",
    "sandybrown", "seagreen", "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#(?:[0-9a-f]{3}|[0-9a-f]{6})$").expect("valid hex color regex"));

static FUNCTIONAL_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)",
        r"|rgba\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*(?:0?\.\d+|1|0)\s*\)",
        r"|hsl\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*\)",
        r"|hsla\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*,\s*(?:0?\.\d+|1|0)\s*\)",
        r")$"
    ))
    .expect("valid functional color regex")
});

/// Text color tag, `[color=red]`, converting to a `<span>` with a `color` style.
/// # Remarks
/// Accepts CSS named colors and `#rgb`/`#rrggbb`. The `rgb()`, `rgba()`, `hsl()` and `hsla()` forms are only
/// accepted when the `ColorAllowAdvFormats` setting is on.
#[derive(Copy, Clone, Debug, Default)]
pub struct ColorTag;

impl TagHandler for ColorTag {
    fn name(&self) -> &str {
        "Color"
    }

    fn display_name(&self) -> &str {
        "color"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn must_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, settings: &Settings, argument: Option<&str>) -> bool {
        let Some(color) = argument else {
            return false;
        };

        if NAMED_COLORS.iter().any(|x| x.eq_ignore_ascii_case(color)) || HEX_COLOR_RE.is_match(color) {
            return true;
        }

        settings.get_bool("ColorAllowAdvFormats").unwrap_or(false) && FUNCTIONAL_COLOR_RE.is_match(color)
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, _: &Settings, argument: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("<span style=\"color: ");
        escape_attribute(argument.unwrap_or_default(), out);
        out.push_str("\">");
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("</span>");
    }
}

/// Font family tag, `[font=Arial]`, converting to a `<span>` with a `font-family` style.
#[derive(Copy, Clone, Debug, Default)]
pub struct FontTag;

impl TagHandler for FontTag {
    fn name(&self) -> &str {
        "Font"
    }

    fn display_name(&self) -> &str {
        "font"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn must_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, _settings: &Settings, argument: Option<&str>) -> bool {
        argument.is_some()
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, _: &Settings, argument: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("<span style=\"font-family: '");
        escape_attribute(argument.unwrap_or_default(), out);
        out.push_str("'\">");
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("</span>");
    }
}

/// Schemes that would run script when followed.
const UNSAFE_SCHEMES: &[&str] = &["javascript", "vbscript", "data"];

/// Link tag, `[url=https://example.org]`, converting to an `<a>`.
/// # Remarks
/// Link styling comes from the `LinkColor` and `LinkUnderline` settings. Script URLs are rejected.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinkTag;

impl TagHandler for LinkTag {
    fn name(&self) -> &str {
        "Link"
    }

    fn display_name(&self) -> &str {
        "url"
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn must_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, _settings: &Settings, argument: Option<&str>) -> bool {
        let Some(url) = argument else {
            return false;
        };

        match url.split_once(':') {
            Some((scheme, _)) => !UNSAFE_SCHEMES
                .iter()
                .any(|x| x.eq_ignore_ascii_case(scheme.trim())),
            None => true,
        }
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_text(content, out);
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>, out: &mut String) {
        let decoration = if settings.get_bool("LinkUnderline").unwrap_or(true) {
            "underline"
        } else {
            "none"
        };

        out.push_str("<a style=\"text-decoration: ");
        out.push_str(decoration);
        out.push_str("; color: ");
        escape_attribute(settings.get_or("LinkColor", "blue"), out);
        out.push_str("\" href=\"");
        escape_attribute(argument.unwrap_or_default(), out);
        out.push_str("\">");
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, out: &mut String) {
        out.push_str("</a>");
    }
}

/// Image tag, `[img]https://example.org/a.png[/img]` or `[img=640x480]...[/img]`, converting to an `<img>`.
/// # Remarks
/// The content of the tag is the image source, so it can't contain other tags. Sizes are clamped to the
/// `ImageMaxWidth` and `ImageMaxHeight` settings when those are set and non-zero.
#[derive(Copy, Clone, Debug, Default)]
pub struct ImageTag;

impl ImageTag {
    fn dimensions(argument: &str) -> Option<(u32, u32)> {
        let (width, height) = argument.split_once('x')?;
        Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
    }
}

impl TagHandler for ImageTag {
    fn name(&self) -> &str {
        "Image"
    }

    fn display_name(&self) -> &str {
        "img"
    }

    fn can_have_code_content(&self) -> bool {
        false
    }

    fn can_have_argument(&self) -> bool {
        true
    }

    fn is_valid_argument(&self, _settings: &Settings, argument: Option<&str>) -> bool {
        argument.map_or(true, |x| Self::dimensions(x).is_some())
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        escape_attribute(content, out);
    }

    fn open(&self, _: &Settings, _: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_none() {
            out.push_str("<img src=\"");
        }
    }

    fn close(&self, settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if closing.is_some() {
            return;
        }

        out.push_str("\" alt=\"image\"");

        if let Some((width, height)) = argument.and_then(Self::dimensions) {
            let clamp = |value: u32, key: &str| match settings.get_int(key) {
                Some(max) if max > 0 => i64::from(value).min(max),
                _ => i64::from(value),
            };

            out.push_str(&format!(
                " style=\"width: {}px; height: {}px\"",
                clamp(width, "ImageMaxWidth"),
                clamp(height, "ImageMaxHeight")
            ));
        }

        out.push_str(if xhtml(settings) { "/>" } else { ">" });
    }
}
