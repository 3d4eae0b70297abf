//! A cursor over the input that splits it on alternating delimiters.

/// Splits input into segments terminated by caller-chosen delimiters.
///
/// The tokenizer is lazy and cannot be rewound. Text after the final delimiter is never returned by
/// [`DelimitedTokenizer::next`], as nothing marks the end of input; fetch it with
/// [`DelimitedTokenizer::remainder`] once done.
#[derive(Debug, Clone)]
pub struct DelimitedTokenizer<'a> {
    input: &'a str,
    loc: usize,
}

impl<'a> DelimitedTokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, loc: 0 }
    }

    /// Returns all input text left to tokenize.
    pub fn remainder(&self) -> &'a str {
        &self.input[self.loc.min(self.input.len())..]
    }

    /// Whether the cursor has moved past the end of the input.
    pub fn is_exhausted(&self) -> bool {
        self.loc >= self.input.len()
    }

    /// Whether another `delim` exists at or after the cursor.
    pub fn has_next(&self, delim: &str) -> bool {
        self.remainder().contains(delim)
    }

    /// Returns the text between the cursor and the next `delim`, moving the cursor past the delimiter.
    /// # Remarks
    /// If no delimiter is left, everything up to the end of input is returned and the tokenizer becomes exhausted.
    /// Returns `None` only if the tokenizer was already exhausted.
    pub fn next(&mut self, delim: &str) -> Option<&'a str> {
        if self.is_exhausted() {
            return None;
        }

        let rem = self.remainder();
        let end = rem.find(delim).unwrap_or(rem.len());
        self.loc += end + delim.len();

        Some(&rem[..end])
    }
}
