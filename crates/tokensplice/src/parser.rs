//! The scan loop.
//!
//! Invariants
//! - `offset` only moves forward and always sits on a char boundary: it is
//!   either the start of a token match or one past its end, and the escape
//!   byte `\` is ASCII so `start - 1` is a boundary too.
//! - A `close` occurrence is consumed at most once, so adjacent regions never
//!   share a token.
//! - Scratch buffers live on the stack of `parse`; the parser itself is
//!   immutable after construction.
use alloc::{borrow::Cow, string::String};
use core::convert::Infallible;

use bstr::Finder;

use crate::handler::TokenHandler;

const ESCAPE: u8 = b'\\';

/// One delimiter token together with its precompiled searcher.
#[derive(Debug, Clone)]
struct Delimiter {
    token: String,
    finder: Finder<'static>,
}

impl Delimiter {
    fn new(token: String) -> Self {
        let finder = Finder::new(token.as_bytes()).into_owned();
        Self { token, finder }
    }

    #[inline]
    fn len(&self) -> usize {
        self.token.len()
    }

    /// Byte position of the next occurrence at or after `from`.
    #[inline]
    fn find_from(&self, text: &str, from: usize) -> Option<usize> {
        self.finder.find(&text.as_bytes()[from..]).map(|at| from + at)
    }
}

/// Replaces every `open ... close` region of a text with the output of a
/// [`TokenHandler`].
///
/// The parser is built once and may be used for any number of `parse` calls.
/// It keeps no state between calls, so it is `Sync` whenever the handler is.
///
/// # Degenerate delimiters
///
/// Delimiters are not validated. Overlapping or equal tokens follow the scan
/// rules literally, which can produce surprising matches. An empty `open`
/// token never matches anything and the text is returned as is.
///
/// # Examples
///
/// ```rust
/// use tokensplice::TokenParser;
///
/// let parser = TokenParser::new("${", "}", |expr: &str| expr.to_uppercase());
///
/// // Escaped close tokens stay inside the expression.
/// assert_eq!(parser.substitute(r"${a\}b}"), "A}B");
/// // Unterminated regions are copied through.
/// assert_eq!(parser.substitute("before ${name"), "before ${name");
/// ```
#[derive(Debug, Clone)]
pub struct TokenParser<H> {
    open: Delimiter,
    close: Delimiter,
    handler: H,
}

impl<H: TokenHandler> TokenParser<H> {
    /// Creates a parser for regions delimited by `open` and `close`.
    pub fn new(open: impl Into<String>, close: impl Into<String>, handler: H) -> Self {
        Self {
            open: Delimiter::new(open.into()),
            close: Delimiter::new(close.into()),
            handler,
        }
    }

    /// Substitutes every region of `text`.
    ///
    /// Returns the input borrowed when it contains no `open` token.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the handler. Output built before
    /// the failure is dropped.
    pub fn parse<'a>(&self, text: &'a str) -> Result<Cow<'a, str>, H::Error> {
        if text.is_empty() {
            return Ok(Cow::Borrowed(""));
        }
        let Some(mut start) = self.find_open(text, 0) else {
            return Ok(Cow::Borrowed(text));
        };

        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut expression = String::new();
        let mut offset = 0;
        let mut regions = 0usize;

        loop {
            if start > 0 && bytes[start - 1] == ESCAPE {
                // The backslash may belong to an already consumed token, in
                // which case there is nothing left to copy before it.
                log::trace!("escaped open token at byte {start}");
                out.push_str(&text[offset..(start - 1).max(offset)]);
                out.push_str(&self.open.token);
                offset = start + self.open.len();
            } else {
                out.push_str(&text[offset..start]);
                offset = start + self.open.len();
                expression.clear();
                if let Some(end) = self.scan_expression(text, &mut offset, &mut expression) {
                    out.push_str(&self.handler.handle_token(&expression)?);
                    offset = end + self.close.len();
                    regions += 1;
                } else {
                    log::trace!("unterminated region at byte {start}, copying the rest verbatim");
                    out.push_str(&text[start..]);
                    offset = text.len();
                }
            }

            match self.find_open(text, offset) {
                Some(next) => start = next,
                None => break,
            }
        }

        out.push_str(&text[offset..]);
        log::debug!(
            "substituted {regions} region(s) in {} byte(s) of input",
            text.len()
        );
        Ok(Cow::Owned(out))
    }

    /// Like [`parse`](Self::parse), for callers that may not have a text at
    /// all. `None` yields an empty string.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse).
    pub fn parse_opt<'a>(&self, text: Option<&'a str>) -> Result<Cow<'a, str>, H::Error> {
        match text {
            Some(text) => self.parse(text),
            None => Ok(Cow::Borrowed("")),
        }
    }

    /// Reads the expression starting at `offset` up to the first unescaped
    /// close token, unescaping `\close` along the way.
    ///
    /// Returns the position of the terminating close token, or `None` when
    /// the text runs out first. `offset` is left past the last escaped close
    /// token consumed.
    fn scan_expression(
        &self,
        text: &str,
        offset: &mut usize,
        expression: &mut String,
    ) -> Option<usize> {
        let bytes = text.as_bytes();
        while let Some(end) = self.close.find_from(text, *offset) {
            if end > *offset && bytes[end - 1] == ESCAPE {
                expression.push_str(&text[*offset..end - 1]);
                expression.push_str(&self.close.token);
                *offset = end + self.close.len();
            } else {
                expression.push_str(&text[*offset..end]);
                return Some(end);
            }
        }
        None
    }

    #[inline]
    fn find_open(&self, text: &str, from: usize) -> Option<usize> {
        // An empty needle matches at every position, including the end of the
        // text, and would never let the scan finish.
        if self.open.token.is_empty() {
            return None;
        }
        self.open.find_from(text, from)
    }
}

impl<H> TokenParser<H>
where
    H: TokenHandler<Error = Infallible>,
{
    /// [`parse`](Self::parse) for handlers that cannot fail.
    pub fn substitute<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Ok(out) = self.parse(text);
        out
    }
}

impl<H> TokenParser<H> {
    /// The token that opens a region.
    pub fn open(&self) -> &str {
        &self.open.token
    }

    /// The token that closes a region.
    pub fn close(&self) -> &str {
        &self.close.token
    }

    /// The handler invoked for each region.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Consumes the parser, returning its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }
}
