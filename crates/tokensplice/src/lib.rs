//! Delimiter-scanning substitution.
//!
//! A [`TokenParser`] walks a text once, left to right, looking for regions
//! enclosed by an `open` and a `close` token (for example `${` and `}`). The
//! text between the tokens is handed to a [`TokenHandler`] and its return
//! value replaces the whole region in the output. Everything else is copied
//! verbatim.
//!
//! A backslash directly in front of a token escapes it: `\${` is emitted as a
//! literal `${` and never starts a region, and `\}` inside a region is kept as
//! a literal `}` in the expression. A region with no closing token is copied
//! through unchanged.
//!
//! ```rust
//! use tokensplice::TokenParser;
//!
//! let parser = TokenParser::new("${", "}", |expr: &str| expr.to_uppercase());
//! assert_eq!(parser.substitute("${a} and ${b}"), "A and B");
//! assert_eq!(parser.substitute(r"\${a} and ${b"), "${a} and ${b");
//! ```
//!
//! With the `properties` feature (on by default), [`properties`] resolves
//! `${key}` and `${key:default}` placeholders against a variable map.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod handler;
pub mod handlers;
mod parser;
#[cfg(feature = "properties")]
pub mod properties;

#[cfg(test)]
mod tests;

pub use handler::{Fallible, TokenHandler};
pub use parser::TokenParser;
