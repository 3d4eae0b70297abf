//! Pairs open and close tags and checks every tag against its handler's rules.
use std::borrow::Cow;

use crate::{handler::GLOBAL, BBCodeParser, ParserFeature};

use super::token::{ParseQueue, TokenKind, TokenStatus};

/// Validation found an invalid tag while running all-or-nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rejected {
    pub index: usize,
}

struct Validator<'p, 'q, 'a> {
    parser: &'p BBCodeParser,
    queue: &'q mut ParseQueue<'a>,
    features: ParserFeature,
}

impl<'p, 'q, 'a> Validator<'p, 'q, 'a> {
    fn set_status(&mut self, idx: usize, status: TokenStatus) {
        if let Some(tk) = self.queue.get_mut(idx) {
            tk.status = status;
        }
    }

    /// Mark the token at `idx` and its partner, if any, invalid.
    fn invalidate(&mut self, idx: usize) -> Result<(), Rejected> {
        let matched = self.queue.get_mut(idx).and_then(|tk| {
            tk.status = TokenStatus::Invalid;
            tk.matched.take()
        });

        if let Some(other) = matched.and_then(|m| self.queue.get_mut(m)) {
            other.status = TokenStatus::Invalid;
            other.matched = None;
        }

        self.reject_if_strict(idx)
    }

    fn reject_if_strict(&self, idx: usize) -> Result<(), Rejected> {
        if self.features.contains(ParserFeature::ALL_OR_NOTHING) {
            tracing::debug!(
                index = idx,
                tag = self.queue[idx].tag_name(),
                "invalid tag, returning input unchanged"
            );
            Err(Rejected { index: idx })
        } else {
            Ok(())
        }
    }

    /// Find the open tag for every close tag.
    fn pair_tags(&mut self) -> Result<(), Rejected> {
        let parser = self.parser;

        for idx in 0..self.queue.len() {
            let token = &self.queue[idx];
            if token.is_content() || token.status.is_final() {
                continue;
            }

            let Some(handler) = parser.registry.get(&token.text) else {
                continue;
            };

            match token.kind {
                TokenKind::Content => {}
                TokenKind::TagOpen { .. } => {
                    if !handler.needs_end() {
                        self.set_status(idx, TokenStatus::Valid);
                    }
                }
                TokenKind::TagClose { .. } if !handler.needs_end() => {
                    // A close for a self-contained tag is harmless, keep it as text.
                    let literal = token.to_literal(&parser.config.tag_start, &parser.config.tag_end);
                    if let Some(tk) = self.queue.get_mut(idx) {
                        tk.kind = TokenKind::Content;
                        tk.text = Cow::Owned(literal);
                        tk.status = TokenStatus::Valid;
                    }
                }
                TokenKind::TagClose { .. } => {
                    let start = if self.features.contains(ParserFeature::HANDLE_OVERLAPPING) {
                        self.queue.find_undetermined_open(idx, &token.text)
                    } else {
                        self.queue
                            .find_open_with_status(idx, TokenStatus::Undetermined)
                            .filter(|&x| self.queue[x].text == token.text)
                    };

                    match start {
                        Some(start) => {
                            for (at, other) in [(start, idx), (idx, start)] {
                                if let Some(tk) = self.queue.get_mut(at) {
                                    tk.status = TokenStatus::Valid;
                                    tk.matched = Some(other);
                                }
                            }
                        }
                        None => {
                            self.set_status(idx, TokenStatus::Invalid);
                            self.reject_if_strict(idx)?;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Check arguments, nesting and parents of every open tag.
    fn check_structure(&mut self) -> Result<(), Rejected> {
        let parser = self.parser;
        let settings = &parser.config.settings;

        for idx in 0..self.queue.len() {
            let token = &self.queue[idx];
            if !token.is_tag_open() || token.status.is_final() {
                continue;
            }

            let Some(handler) = parser.registry.get(&token.text) else {
                continue;
            };

            let parent = self.queue.find_enclosing(idx);
            let parent_handler = parent.and_then(|p| parser.registry.get(&self.queue[p].text));
            let argument = token.argument();

            let malformed = (token.status == TokenStatus::Undetermined && handler.needs_end())
                || (handler.can_have_argument() && !handler.is_valid_argument(settings, argument))
                || (!handler.can_have_argument() && argument.is_some())
                || (handler.must_have_argument() && argument.is_none())
                || parent_handler.map_or(false, |p| !p.can_have_code_content());

            if malformed {
                self.invalidate(idx)?;
                continue;
            }

            // Some tags only make sense inside specific others, i.e. list items.
            let parent_name = parent_handler.map_or(GLOBAL, |p| p.display_name());
            if !handler.is_valid_parent(settings, parent_name) {
                self.invalidate(idx)?;
            }
        }

        Ok(())
    }
}

/// Decide the final status of every token in the queue.
/// # Remarks
/// Returns [`Rejected`] as soon as a tag turns out invalid while [`ParserFeature::ALL_OR_NOTHING`] is set.
pub(crate) fn validate(
    parser: &BBCodeParser,
    queue: &mut ParseQueue<'_>,
    features: ParserFeature,
) -> Result<(), Rejected> {
    let mut validator = Validator {
        parser,
        queue,
        features,
    };

    validator.pair_tags()?;
    validator.check_structure()?;

    tracing::trace!(tokens = validator.queue.len(), "validated token queue");

    Ok(())
}
