use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
    BBCodeParser, ConfigError, ParserFeature, Settings, TagHandler, TokenKind, TokenStatus, GLOBAL,
};

#[derive(Clone, Copy, Debug)]
enum Argument {
    Forbidden,
    Optional,
    Required,
    /// An integer from 1 up to the bound.
    Bounded(i64),
}

/// A tag writing `<name>`/`<name=arg>` and `</name>`, with every rule the validator consults configurable.
#[derive(Clone, Copy, Debug)]
struct MockTag {
    tag: &'static str,
    needs_end: bool,
    code_content: bool,
    argument: Argument,
    close_on_open: Option<&'static str>,
    close_on_close: Option<&'static str>,
    parents: Option<&'static [&'static str]>,
    /// Writes nothing while being closed and reopened around another tag.
    block: bool,
}

impl MockTag {
    const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            needs_end: true,
            code_content: true,
            argument: Argument::Forbidden,
            close_on_open: None,
            close_on_close: None,
            parents: None,
            block: false,
        }
    }

    const fn standalone(mut self) -> Self {
        self.needs_end = false;
        self
    }

    const fn no_code(mut self) -> Self {
        self.code_content = false;
        self
    }

    const fn argument(mut self, argument: Argument) -> Self {
        self.argument = argument;
        self
    }

    const fn close_on_open(mut self, tag: &'static str) -> Self {
        self.close_on_open = Some(tag);
        self
    }

    const fn close_on_close(mut self, tag: &'static str) -> Self {
        self.close_on_close = Some(tag);
        self
    }

    const fn parents(mut self, parents: &'static [&'static str]) -> Self {
        self.parents = Some(parents);
        self
    }

    const fn block(mut self) -> Self {
        self.block = true;
        self
    }
}

fn mock_escape(content: &str, out: &mut String) {
    out.push_str(&content.replace('<', "&lt;"));
}

impl TagHandler for MockTag {
    fn name(&self) -> &str {
        self.tag
    }

    fn display_name(&self) -> &str {
        self.tag
    }

    fn needs_end(&self) -> bool {
        self.needs_end
    }

    fn can_have_code_content(&self) -> bool {
        self.code_content
    }

    fn can_have_argument(&self) -> bool {
        !matches!(self.argument, Argument::Forbidden)
    }

    fn must_have_argument(&self) -> bool {
        matches!(self.argument, Argument::Required | Argument::Bounded(_))
    }

    fn auto_close_on_open(&self) -> Option<&str> {
        self.close_on_open
    }

    fn auto_close_on_close(&self) -> Option<&str> {
        self.close_on_close
    }

    fn is_valid_argument(&self, _settings: &Settings, argument: Option<&str>) -> bool {
        match self.argument {
            Argument::Forbidden => false,
            Argument::Optional => true,
            Argument::Required => argument.is_some(),
            Argument::Bounded(max) => argument
                .and_then(|x| x.parse::<i64>().ok())
                .map_or(false, |x| x > 0 && x <= max),
        }
    }

    fn is_valid_parent(&self, _settings: &Settings, parent: &str) -> bool {
        self.parents.map_or(true, |x| x.contains(&parent))
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        mock_escape(content, out);
    }

    fn open(&self, _settings: &Settings, argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if self.block && closing.is_some() {
            return;
        }

        out.push('<');
        out.push_str(self.tag);
        if let Some(arg) = argument.filter(|x| !x.is_empty()) {
            out.push('=');
            out.push_str(arg);
        }
        out.push('>');
    }

    fn close(&self, _settings: &Settings, _argument: Option<&str>, closing: Option<&str>, out: &mut String) {
        if self.block && closing.is_some() {
            return;
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

struct MockRoot;

impl TagHandler for MockRoot {
    fn name(&self) -> &str {
        GLOBAL
    }

    fn display_name(&self) -> &str {
        GLOBAL
    }

    fn needs_end(&self) -> bool {
        false
    }

    fn escape(&self, _settings: &Settings, content: &str, out: &mut String) {
        mock_escape(content, out);
    }

    fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>, _: &mut String) {}

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>, _: &mut String) {}
}

const LIST_PARENTS: &[&str] = &["list"];

fn mock_tags() -> Vec<Box<dyn TagHandler>> {
    vec![
        Box::new(MockTag::new("b")),
        Box::new(MockTag::new("i")),
        Box::new(MockTag::new("u")),
        Box::new(MockTag::new("br").standalone()),
        Box::new(MockTag::new("*").close_on_open("*")),
        Box::new(MockTag::new("list").close_on_close("*")),
        Box::new(MockTag::new("li").parents(LIST_PARENTS)),
        Box::new(MockTag::new("size").argument(Argument::Bounded(48))),
        Box::new(MockTag::new("url").argument(Argument::Required)),
        Box::new(MockTag::new("code").argument(Argument::Optional).no_code()),
        Box::new(MockTag::new("center").block()),
    ]
}

const STRICT: ParserFeature = ParserFeature::ALL_OR_NOTHING
    .union(ParserFeature::ESCAPE_CONTENT)
    .union(ParserFeature::ESCAPE_LITERAL_TAGS);
const LENIENT: ParserFeature = ParserFeature::ESCAPE_CONTENT.union(ParserFeature::ESCAPE_LITERAL_TAGS);
const OVERLAP: ParserFeature = LENIENT.union(ParserFeature::HANDLE_OVERLAPPING);

fn mock_parser(features: ParserFeature) -> BBCodeParser {
    BBCodeParser::builder()
        .replace_defaults()
        .root(MockRoot)
        .tags(mock_tags())
        .features(features)
        .build()
        .unwrap()
}

#[test]
pub fn default_features() {
    assert_eq!(ParserFeature::default(), STRICT);

    let parser = mock_parser(ParserFeature::default());
    assert_eq!(parser.config().tag_start, "[");
    assert_eq!(parser.config().tag_end, "]");
    assert_eq!(parser.registry().len(), 11);
}

#[rstest]
#[case::plain("plain <text>", "plain &lt;text>")]
#[case::only_end_delimiter("a]b <c", "a]b &lt;c")]
#[case::only_start_delimiter("a[b <c", "a[b &lt;c")]
#[case::empty("", "")]
pub fn input_without_tags(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(mock_parser(STRICT).format(input), expected);
}

#[test]
pub fn input_without_tags_unescaped() {
    let parser = mock_parser(ParserFeature::empty());
    assert_eq!(parser.format("plain <text>"), "plain <text>");
}

#[rstest]
#[case::simple("[b]hi[/b]", "<b>hi</b>")]
#[case::nested("[b]a[i]b[/i]c[/b]", "<b>a<i>b</i>c</b>")]
#[case::unknown("[bogus]x[/bogus]", "[bogus]x[/bogus]")]
#[case::unknown_inside_known("[b][bogus]x[/b]", "<b>[bogus]x</b>")]
#[case::escaped_content("[b]<x>[/b]", "<b>&lt;x></b>")]
#[case::empty_brackets("x[]y", "x[]y")]
#[case::empty_argument("[b=]x[/b]", "<b>x</b>")]
#[case::stray_start("a [b]c[/b] [d", "a <b>c</b> [d")]
#[case::standalone("a[br]b", "a<br>b")]
#[case::standalone_stray_close("a[br]b[/br]", "a<br>b[/br]")]
#[case::star_list("[*]A[*]B", "<*>A</*><*>B</*>")]
#[case::list("[list][*]a[*]b[/list]", "<list><*>a</*><*>b</*></list>")]
#[case::list_item("[list][li]x[/li][/list]", "<list><li>x</li></list>")]
#[case::bounded_argument("[size=12]x[/size]", "<size=12>x</size>")]
#[case::outer_star_survives_list("[*]a[list][/list]", "<*>a<list></list></*>")]
pub fn valid_input(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(mock_parser(STRICT).format(input), expected);
}

#[rstest]
#[case::mismatched_close("[b]hi[/i]", "[b]hi[/i]")]
#[case::unclosed("[b]x", "[b]x")]
#[case::unopened("x[/b]", "x[/b]")]
#[case::crossed("[b][i]x[/b][/i]", "[b]<i>x[/b]</i>")]
#[case::argument_too_large("[size=100]x[/size]", "[size=100]x[/size]")]
#[case::argument_not_numeric("[size=abc]x[/size]", "[size=abc]x[/size]")]
#[case::argument_missing("[size]x[/size]", "[size]x[/size]")]
#[case::argument_forbidden("[b=x]y[/b]", "[b=x]y[/b]")]
#[case::bad_nested_argument("[size=1][size=100]x[/size][/size]", "<size=1>[size=100]x[/size]</size>")]
#[case::inside_code("[code][b]x[/b][/code]", "<code>[b]x[/b]</code>")]
#[case::wrong_parent("[li]x[/li]", "[li]x[/li]")]
#[case::escaped_literal("[b=<x>]y[/b]", "[b=&lt;x>]y[/b]")]
#[case::equals_in_name("[url=a=b]x[/url]", "[url=a=b]x[/url]")]
pub fn invalid_input(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(mock_parser(LENIENT).format(input), expected);
    // Any invalid tag leaves the whole input alone.
    assert_eq!(mock_parser(STRICT).format(input), input);
}

#[test]
pub fn literal_tags_unescaped() {
    let parser = mock_parser(ParserFeature::ESCAPE_CONTENT);
    assert_eq!(parser.format("[bogus=<x>]<y>"), "[bogus=<x>]&lt;y>");

    let parser = mock_parser(LENIENT);
    assert_eq!(parser.format("[bogus=<x>]<y>"), "[bogus=&lt;x>]&lt;y>");
}

#[test]
pub fn content_unescaped() {
    let parser = mock_parser(ParserFeature::ALL_OR_NOTHING);
    assert_eq!(parser.format("[b]<x>[/b]"), "<b><x></b>");
}

#[test]
pub fn overlapping_tags() {
    let input = "[b]A[i]B[/b]C[/i]";
    assert_eq!(mock_parser(OVERLAP).format(input), "<b>A<i>B</i></b><i>C</i>");
    assert_eq!(mock_parser(STRICT).format(input), input);
}

#[test]
pub fn overlapping_block_sees_closing_hint() {
    let parser = mock_parser(OVERLAP);
    assert_eq!(
        parser.format("[b]A[center]B[/b]C[/center]"),
        "<b>A<center>B</b>C</center>"
    );
}

#[test]
pub fn overlapping_reopens_outer_tags() {
    // Every close shuffles the whole stack, even for properly nested input.
    let parser = mock_parser(OVERLAP);
    assert_eq!(parser.format("[b]a[i]b[/i]c[/b]"), "<b>a<i>b</i></b><b>c</b>");
}

#[test]
pub fn not_allowed_tags() {
    let parser = BBCodeParser::builder()
        .replace_defaults()
        .root(MockRoot)
        .tags(mock_tags())
        .allowed_tags(["b"])
        .build()
        .unwrap();

    // Disallowed tags are never invalid, so they don't trip all-or-nothing.
    assert_eq!(parser.format("[i]x[/i][b]y[/b]"), "[i]x[/i]<b>y</b>");

    let queue = parser.parse("[i]x[/i]").unwrap();
    assert_eq!(queue[0].status, TokenStatus::NotAllowed);
    assert_eq!(queue[2].status, TokenStatus::NotAllowed);
}

#[rstest]
#[case::self_terminating(&["b"], "[*]a[*]b", "[*]a[*]b")]
#[case::partner_of_allowed_close(&["list"], "[list][*]a[/list]", "<list>[*]a</list>")]
#[case::partner_of_disallowed_close(&["*"], "[*]a[list][*]b[/list]", "<*>a[list]</*><*>b[/list]</*>")]
pub fn not_allowed_tags_are_not_auto_closed(
    #[case] allowed: &[&str],
    #[case] input: &str,
    #[case] expected: &str,
) {
    let parser = BBCodeParser::builder()
        .replace_defaults()
        .root(MockRoot)
        .tags(mock_tags())
        .allowed_tags(allowed.iter().copied())
        .build()
        .unwrap();

    assert_eq!(parser.format(input), expected);
}

#[test]
pub fn unimplemented_partner_is_not_auto_closed() {
    let parser = BBCodeParser::builder()
        .replace_defaults()
        .root(MockRoot)
        .tag(MockTag::new("list").close_on_close("*"))
        .build()
        .unwrap();

    assert_eq!(parser.format("[list][*]a[/list]"), "<list>[*]a</list>");

    let queue = parser.parse("[list][*]a[/list]").unwrap();
    assert_eq!(queue.len(), 4);
    assert_eq!(queue[1].status, TokenStatus::NoImplementation);
}

#[test]
pub fn argument_split_on_last_equals() {
    let parser = mock_parser(LENIENT);
    let queue = parser.parse("[url=a=b]x[/url]").unwrap();

    assert_eq!(queue[0].tag_name(), Some("url=a"));
    assert_eq!(queue[0].argument(), Some("b"));
    assert_eq!(queue[0].status, TokenStatus::NoImplementation);
    assert_eq!(queue[2].status, TokenStatus::Invalid);
}

#[test]
pub fn per_call_features() {
    let parser = mock_parser(STRICT);
    let input = "[b]x[/b][i]y";

    assert_eq!(parser.format(input), input);
    assert_eq!(parser.format_with(input, LENIENT), "<b>x</b>[i]y");
    assert_eq!(parser.config().feature_flags, STRICT);
}

#[test]
pub fn custom_delimiters() {
    let parser = BBCodeParser::builder()
        .replace_defaults()
        .root(MockRoot)
        .tags(mock_tags())
        .delimiters("{{", "}}")
        .build()
        .unwrap();

    assert_eq!(parser.format("{{b}}x{{/b}} [b]"), "<b>x</b> [b]");
    assert_eq!(parser.format("{{b}}x{{/b"), "{{b}}x{{/b");
}

#[test]
pub fn config_errors() {
    let err = BBCodeParser::builder().delimiters("", "]").build().unwrap_err();
    assert_eq!(err, ConfigError::EmptyDelimiter);

    let err = BBCodeParser::builder().delimiters("|", "|").build().unwrap_err();
    assert_eq!(err, ConfigError::IdenticalDelimiters("|".to_owned()));

    let err = BBCodeParser::builder()
        .replace_defaults()
        .tag(MockTag::new("/x"))
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::CloseMarkerInName("/x".to_owned()));

    let err = BBCodeParser::builder()
        .replace_defaults()
        .tag(MockTag::new(GLOBAL))
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::ReservedTagName(GLOBAL.to_owned()));
}

#[test]
pub fn replacing_a_tag() {
    let parser = BBCodeParser::builder()
        .replace_defaults()
        .root(MockRoot)
        .tags(mock_tags())
        .tag(MockTag::new("b").standalone())
        .build()
        .unwrap();

    assert_eq!(parser.registry().len(), 11);
    assert_eq!(parser.format("a[b]c"), "a<b>c");
}

#[test]
pub fn queue_pairs_tags() {
    let parser = mock_parser(STRICT);
    let queue = parser.parse("[b]x[/b]").unwrap();

    assert_eq!(queue.len(), 3);
    assert!(queue[0].is_open("b"));
    assert!(queue[1].is_content());
    assert!(queue[2].is_close("b"));
    assert_eq!(queue[2].kind, TokenKind::TagClose { spelling: Some("/b") });
    assert_eq!(queue[0].matched, Some(2));
    assert_eq!(queue[2].matched, Some(0));
    assert!(queue.iter().all(|x| x.status == TokenStatus::Valid));
}

#[test]
pub fn queue_inserts_closes() {
    let parser = mock_parser(STRICT);
    let queue = parser.parse("[*]A[*]B").unwrap();

    let kinds: Vec<_> = queue.iter().map(|x| x.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::TagOpen { argument: None },
            TokenKind::Content,
            TokenKind::TagClose { spelling: None },
            TokenKind::TagOpen { argument: None },
            TokenKind::Content,
            TokenKind::TagClose { spelling: None },
        ]
    );
    assert_eq!(queue[0].matched, Some(2));
    assert_eq!(queue[3].matched, Some(5));
}

#[test]
pub fn queue_marks_unpaired_tags() {
    let parser = mock_parser(LENIENT);
    assert!(parser.parse_with("[b]hi[/i]", STRICT).is_none());

    let queue = parser.parse("[b]hi[/i][bogus]").unwrap();
    let statuses: Vec<_> = queue.iter().map(|x| x.status).collect();
    assert_eq!(
        statuses,
        vec![
            TokenStatus::Invalid,
            TokenStatus::Valid,
            TokenStatus::Invalid,
            TokenStatus::NoImplementation,
        ]
    );
    assert!(queue.iter().all(|x| x.matched.is_none()));
}

#[test]
pub fn queue_stray_standalone_close_is_content() {
    let parser = mock_parser(STRICT);
    let queue = parser.parse("a[br]b[/br]").unwrap();

    assert_eq!(queue.len(), 4);
    assert!(queue[3].is_content());
    assert_eq!(queue[3].text, "[/br]");
}

#[rstest]
#[case("[b][i]x[/b][/i]", LENIENT)]
#[case("[b][i]x[/b][/i]", OVERLAP)]
#[case("[list][*]a[*]b[/list][*]c", LENIENT)]
#[case("[size=1][size=100]x[/size][/size]", LENIENT)]
#[case("[code][b][/code][/b]", OVERLAP)]
#[case("[b]x[/i][/b][br][/u]", LENIENT)]
pub fn valid_pairs_point_at_each_other(#[case] input: &str, #[case] features: ParserFeature) {
    let parser = mock_parser(features);
    let queue = parser.parse(input).unwrap();

    for (idx, token) in queue.iter().enumerate() {
        let Some(other) = token.matched else {
            continue;
        };

        assert!(token.is_valid(), "{idx} is paired but not valid");
        assert!(queue[other].is_valid(), "{other} is paired but not valid");
        assert_eq!(queue[other].matched, Some(idx));
        assert_eq!(queue[other].tag_name(), token.tag_name());
        assert_eq!(token.is_tag_open(), queue[other].is_tag_close());
    }
}

#[test]
pub fn shared_between_threads() {
    let parser = &mock_parser(OVERLAP);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || parser.format("[b]A[i]B[/b]C[/i]")))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "<b>A<i>B</i></b><i>C</i>");
        }
    });
}
