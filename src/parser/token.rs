use std::{borrow::Cow, ops::Index};

/// Where a token stands after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenStatus {
    /// Content, or a tag that will be rendered through its handler.
    Valid,
    /// A tag that is malformed, unpaired, or misplaced.
    Invalid,
    /// A tag with a handler that the parser was configured to reject.
    NotAllowed,
    /// A tag no handler is registered for.
    NoImplementation,
    /// A tag that hasn't been looked at by validation yet.
    Undetermined,
}

impl TokenStatus {
    /// Statuses decided while building the queue, which validation never revisits.
    pub fn is_final(self) -> bool {
        matches!(self, TokenStatus::NotAllowed | TokenStatus::NoImplementation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Content,
    TagOpen {
        argument: Option<&'a str>,
    },
    /// `spelling` is the text that was between the delimiters (i.e. `/b`), or `None` if the parser inserted
    /// this close itself.
    TagClose {
        spelling: Option<&'a str>,
    },
}

/// One entry of a [`ParseQueue`].
/// # Remarks
/// `text` holds the literal text of content tokens and the display name (without `/`) of tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub text: Cow<'a, str>,
    pub status: TokenStatus,
    /// Index of the paired open or close tag, once the pair is known to be valid.
    pub matched: Option<usize>,
}

impl<'a> Token<'a> {
    pub fn content(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            kind: TokenKind::Content,
            text: text.into(),
            status: TokenStatus::Valid,
            matched: None,
        }
    }

    pub fn open(name: &'a str, argument: Option<&'a str>) -> Self {
        Self {
            kind: TokenKind::TagOpen { argument },
            text: Cow::Borrowed(name),
            status: TokenStatus::Undetermined,
            matched: None,
        }
    }

    pub fn close(name: &'a str, spelling: Option<&'a str>) -> Self {
        Self {
            kind: TokenKind::TagClose { spelling },
            text: Cow::Borrowed(name),
            status: TokenStatus::Undetermined,
            matched: None,
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self.kind, TokenKind::Content)
    }

    pub fn is_valid(&self) -> bool {
        self.status == TokenStatus::Valid
    }

    pub fn is_tag_open(&self) -> bool {
        matches!(self.kind, TokenKind::TagOpen { .. })
    }

    pub fn is_tag_close(&self) -> bool {
        matches!(self.kind, TokenKind::TagClose { .. })
    }

    /// Whether this is an open tag with the given name.
    pub fn is_open(&self, name: &str) -> bool {
        self.is_tag_open() && self.text == name
    }

    /// Whether this is a close tag with the given name.
    pub fn is_close(&self, name: &str) -> bool {
        self.is_tag_close() && self.text == name
    }

    /// The tag's display name, or `None` for content.
    pub fn tag_name(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Content => None,
            _ => Some(&self.text),
        }
    }

    /// The argument of an open tag. An empty argument (`[b=]`) counts as none.
    pub fn argument(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::TagOpen { argument } => argument.filter(|x| !x.is_empty()),
            _ => None,
        }
    }

    /// Write this token back out the way it was written in the input.
    pub fn write_literal(&self, tag_start: &str, tag_end: &str, out: &mut String) {
        match self.kind {
            TokenKind::Content => out.push_str(&self.text),
            TokenKind::TagOpen { argument } => {
                out.push_str(tag_start);
                out.push_str(&self.text);
                if let Some(arg) = argument {
                    out.push('=');
                    out.push_str(arg);
                }
                out.push_str(tag_end);
            }
            TokenKind::TagClose { spelling } => {
                out.push_str(tag_start);
                match spelling {
                    Some(spelling) => out.push_str(spelling),
                    None => {
                        out.push('/');
                        out.push_str(&self.text);
                    }
                }
                out.push_str(tag_end);
            }
        }
    }

    pub fn to_literal(&self, tag_start: &str, tag_end: &str) -> String {
        let mut out = String::new();
        self.write_literal(tag_start, tag_end, &mut out);
        out
    }
}

/// The tokens produced for one formatting call, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseQueue<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> ParseQueue<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Token<'a>> {
        self.tokens.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'a>> {
        self.tokens.iter()
    }

    pub(crate) fn push(&mut self, token: Token<'a>) {
        self.tokens.push(token);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Token<'a>> {
        self.tokens.last_mut()
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Token<'a>> {
        self.tokens.get_mut(idx)
    }

    /// Closest open tag before `pos` with the given status.
    pub fn find_open_with_status(&self, pos: usize, status: TokenStatus) -> Option<usize> {
        self.tokens[..pos]
            .iter()
            .rposition(|x| x.is_tag_open() && x.status == status)
    }

    /// Closest still undetermined open tag before `pos` with the given name.
    pub fn find_undetermined_open(&self, pos: usize, name: &str) -> Option<usize> {
        self.tokens[..pos]
            .iter()
            .rposition(|x| x.is_open(name) && x.status == TokenStatus::Undetermined)
    }

    /// The valid open tag whose span contains `pos`, if any.
    pub fn find_enclosing(&self, pos: usize) -> Option<usize> {
        self.tokens[..pos].iter().rposition(|x| {
            x.is_tag_open() && x.is_valid() && x.matched.map_or(false, |m| m > pos)
        })
    }
}

impl<'a> Index<usize> for ParseQueue<'a> {
    type Output = Token<'a>;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.tokens[idx]
    }
}

impl<'q, 'a> IntoIterator for &'q ParseQueue<'a> {
    type Item = &'q Token<'a>;
    type IntoIter = std::slice::Iter<'q, Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
