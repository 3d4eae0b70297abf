//! Turns raw input into a [`ParseQueue`], inserting automatic closes along the way.
use crate::{tokenizer::DelimitedTokenizer, BBCodeParser};

use super::token::{ParseQueue, Token, TokenStatus};

struct QueueBuilder<'p, 'a> {
    parser: &'p BBCodeParser,
    queue: ParseQueue<'a>,
    /// Names of every tag opened and not yet closed, most recent last.
    open_tags: Vec<&'a str>,
}

impl<'p, 'a> QueueBuilder<'p, 'a> {
    fn push_content(&mut self, text: &'a str) {
        if !text.is_empty() {
            self.queue.push(Token::content(text));
        }
    }

    /// Push a tag token, settling right away whether it has a handler and is allowed.
    fn push_tag(&mut self, token: Token<'a>) {
        let name = token.tag_name().unwrap_or_default();
        let status = if !self.parser.registry.contains(name) {
            Some(TokenStatus::NoImplementation)
        } else if !self.parser.is_allowed(name) {
            Some(TokenStatus::NotAllowed)
        } else {
            None
        };

        self.queue.push(token);

        if let (Some(status), Some(tk)) = (status, self.queue.last_mut()) {
            tk.status = status;
        }
    }

    /// Whether tags named `name` will be formatted, rather than written back as text.
    fn is_active(&self, name: &str) -> bool {
        self.parser.registry.contains(name) && self.parser.is_allowed(name)
    }

    /// Insert a close for `partner` if it is open at or above `floor` in the open tag stack.
    fn auto_close(&mut self, partner: Option<&str>, floor: usize) {
        let Some(partner) = partner.filter(|x| self.is_active(x)) else {
            return;
        };

        let found = self.open_tags[floor..].iter().rposition(|x| *x == partner);
        if let Some(idx) = found.map(|x| x + floor) {
            let name = self.open_tags.remove(idx);
            self.push_tag(Token::close(name, None));
        }
    }

    /// Tags that won't be formatted take no part in auto-closing, so they stay as written.
    fn push_open(&mut self, name: &'a str, argument: Option<&'a str>) {
        let parser = self.parser;
        let active = self.is_active(name);

        if active {
            let partner = parser.registry.get(name).and_then(|x| x.auto_close_on_open());
            self.auto_close(partner, 0);
        }

        self.push_tag(Token::open(name, argument));
        if active {
            self.open_tags.push(name);
        }
    }

    fn push_close(&mut self, name: &'a str, spelling: &'a str) {
        let parser = self.parser;
        let own = self.open_tags.iter().rposition(|x| *x == name);

        if self.is_active(name) {
            // Only partners opened inside the tag being closed are closed with it.
            let partner = parser.registry.get(name).and_then(|x| x.auto_close_on_close());
            self.auto_close(partner, own.map_or(0, |x| x + 1));
        }

        self.push_tag(Token::close(name, Some(spelling)));
        if let Some(idx) = self.open_tags.iter().rposition(|x| *x == name) {
            self.open_tags.remove(idx);
        }
    }

    /// Close every self-terminating tag (one that auto-closes itself on open) still open at the end of input.
    fn close_self_terminating(&mut self) {
        let parser = self.parser;
        while let Some(idx) = self.open_tags.iter().rposition(|name| {
            parser.registry.get(name).and_then(|x| x.auto_close_on_open()) == Some(*name)
        }) {
            let name = self.open_tags.remove(idx);
            self.push_tag(Token::close(name, None));
        }
    }
}

/// Build the token queue for `input`.
pub(super) fn build_queue<'a>(parser: &BBCodeParser, input: &'a str) -> ParseQueue<'a> {
    let tag_start = parser.config.tag_start.as_str();
    let tag_end = parser.config.tag_end.as_str();

    let mut builder = QueueBuilder {
        parser,
        queue: ParseQueue::default(),
        open_tags: vec![],
    };
    let mut tokenizer = DelimitedTokenizer::new(input);

    while tokenizer.has_next(tag_start) {
        let before = tokenizer.next(tag_start).unwrap_or_default();

        if !tokenizer.has_next(tag_end) {
            // Stray start delimiter, everything after it is plain text.
            let rest = tokenizer.next(tag_end).unwrap_or_default();
            builder.push_content(before);
            builder
                .queue
                .push(Token::content(format!("{tag_start}{rest}")));
            break;
        }

        let code = tokenizer.next(tag_end).unwrap_or_default();

        if code.is_empty() {
            builder
                .queue
                .push(Token::content(format!("{before}{tag_start}{tag_end}")));
            continue;
        }

        builder.push_content(before);

        let (name, argument) = match code.rfind('=') {
            Some(idx) => (&code[..idx], Some(&code[(idx + "=".len())..])),
            None => (code, None),
        };

        if let Some(closed) = name.strip_prefix('/') {
            builder.push_close(closed, code);
        } else {
            builder.push_open(name, argument);
        }
    }

    builder.push_content(tokenizer.remainder());
    builder.close_self_terminating();

    tracing::trace!(tokens = builder.queue.len(), "built token queue");

    builder.queue
}
