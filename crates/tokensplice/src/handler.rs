use alloc::string::String;
use core::convert::Infallible;

/// Maps the expression found between an open and a close token to the text
/// that replaces the whole region.
///
/// The parser calls [`handle_token`](TokenHandler::handle_token) once per
/// closed region, in order of appearance, on the calling thread. Results are
/// not cached; a handler that wants memoization keeps its own cache.
///
/// Handlers take `&self` so a single parser can be shared between threads.
/// Handlers that accumulate state use interior mutability (see
/// [`Collector`](crate::handlers::Collector)).
///
/// Any `Fn(&str) -> String` closure is a handler that never fails. Wrap a
/// closure returning `Result` in [`Fallible`] to propagate its error out of
/// [`TokenParser::parse`](crate::TokenParser::parse).
pub trait TokenHandler {
    /// Error returned by the handler, passed through `parse` unchanged.
    type Error;

    /// Produces the replacement for one region.
    ///
    /// # Errors
    ///
    /// Implementation defined. The parser stops at the first error and
    /// discards the output built so far.
    fn handle_token(&self, expression: &str) -> Result<String, Self::Error>;
}

impl<F> TokenHandler for F
where
    F: Fn(&str) -> String,
{
    type Error = Infallible;

    #[inline]
    fn handle_token(&self, expression: &str) -> Result<String, Infallible> {
        Ok(self(expression))
    }
}

/// Adapter turning a closure that returns `Result<String, E>` into a
/// [`TokenHandler`] with `Error = E`.
///
/// ```rust
/// use tokensplice::{Fallible, TokenParser};
///
/// let parser = TokenParser::new(
///     "#{",
///     "}",
///     Fallible(|expr: &str| expr.parse::<u32>().map(|n| (n * 2).to_string())),
/// );
/// assert_eq!(parser.parse("#{21}").unwrap(), "42");
/// assert!(parser.parse("#{x}").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallible<F>(pub F);

impl<F, E> TokenHandler for Fallible<F>
where
    F: Fn(&str) -> Result<String, E>,
{
    type Error = E;

    #[inline]
    fn handle_token(&self, expression: &str) -> Result<String, E> {
        (self.0)(expression)
    }
}
