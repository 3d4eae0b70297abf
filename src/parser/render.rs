//! Writes a validated [`ParseQueue`] out through the tag handlers.
use crate::{BBCodeParser, ParserFeature, TagHandler};

use super::token::{ParseQueue, Token, TokenKind};

struct Renderer<'p, 'q, 'a> {
    parser: &'p BBCodeParser,
    queue: &'q ParseQueue<'a>,
    features: ParserFeature,
    /// Indices of open tags currently in effect, only tracked when handling overlapping tags.
    open_tags: Vec<usize>,
    out: String,
}

impl<'p, 'q, 'a> Renderer<'p, 'q, 'a> {
    fn handler_of(&self, token: &Token<'_>) -> Option<&'p dyn TagHandler> {
        let parser = self.parser;
        parser.registry.get(&token.text)
    }

    /// The handler whose content `idx` is, falling back to the root handler.
    fn enclosing_handler(&self, idx: usize) -> &'p dyn TagHandler {
        let parser = self.parser;
        let registry = &parser.registry;
        self.queue
            .find_enclosing(idx)
            .and_then(|x| registry.get(&self.queue[x].text))
            .unwrap_or_else(|| registry.root())
    }

    fn write_content(&mut self, idx: usize, text: &str) {
        if self.features.contains(ParserFeature::ESCAPE_CONTENT) {
            let handler = self.enclosing_handler(idx);
            handler.escape(&self.parser.config.settings, text, &mut self.out);
        } else {
            self.out.push_str(text);
        }
    }

    /// Write a tag that won't be rendered back out as text.
    fn write_literal(&mut self, idx: usize, token: &Token<'_>) {
        let parser = self.parser;
        let config = &parser.config;

        if self.features.contains(ParserFeature::ESCAPE_LITERAL_TAGS) {
            let literal = token.to_literal(&config.tag_start, &config.tag_end);
            let handler = self.enclosing_handler(idx);
            handler.escape(&config.settings, &literal, &mut self.out);
        } else {
            token.write_literal(&config.tag_start, &config.tag_end, &mut self.out);
        }
    }

    fn write_open(&mut self, idx: usize, token: &Token<'_>, handler: &dyn TagHandler) {
        handler.open(&self.parser.config.settings, token.argument(), None, &mut self.out);

        if self.features.contains(ParserFeature::HANDLE_OVERLAPPING) && handler.needs_end() {
            self.open_tags.push(idx);
        }
    }

    fn write_close(&mut self, open_idx: usize, handler: &dyn TagHandler) {
        let (parser, queue) = (self.parser, self.queue);
        let settings = &parser.config.settings;
        let open = &queue[open_idx];

        if !self.features.contains(ParserFeature::HANDLE_OVERLAPPING) {
            handler.close(settings, open.argument(), None, &mut self.out);
            return;
        }

        // Close everything opened since, most recent first, then reopen whatever is left in the original order.
        let closing = Some(open.text.as_ref());
        for &idx in self.open_tags.iter().rev() {
            let tk = &queue[idx];
            let hint = if idx == open_idx { None } else { closing };
            if let Some(h) = parser.registry.get(&tk.text) {
                h.close(settings, tk.argument(), hint, &mut self.out);
            }
        }

        self.open_tags.retain(|&x| x != open_idx);

        for &idx in self.open_tags.iter() {
            let tk = &queue[idx];
            if let Some(h) = parser.registry.get(&tk.text) {
                h.open(settings, tk.argument(), closing, &mut self.out);
            }
        }
    }

    fn render(mut self) -> String {
        let queue = self.queue;

        for (idx, token) in queue.iter().enumerate() {
            match token.kind {
                TokenKind::Content => self.write_content(idx, &token.text),
                TokenKind::TagOpen { .. } if token.is_valid() => match self.handler_of(token) {
                    Some(handler) => self.write_open(idx, token, handler),
                    None => self.write_literal(idx, token),
                },
                TokenKind::TagClose { .. } if token.is_valid() => {
                    match (token.matched, self.handler_of(token)) {
                        (Some(open_idx), Some(handler)) => self.write_close(open_idx, handler),
                        _ => self.write_literal(idx, token),
                    }
                }
                _ => self.write_literal(idx, token),
            }
        }

        self.out
    }
}

/// Produce the output for a validated queue.
pub(crate) fn render(
    parser: &BBCodeParser,
    queue: &ParseQueue<'_>,
    features: ParserFeature,
    capacity: usize,
) -> String {
    Renderer {
        parser,
        queue,
        features,
        open_tags: vec![],
        out: String::with_capacity(capacity),
    }
    .render()
}
