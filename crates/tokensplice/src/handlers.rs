//! Ready-made [`TokenHandler`]s for common scans.
//!
//! - [`DynamicChecker`] answers "does this text contain any region at all?".
//! - [`Collector`] swaps every region for a fixed placeholder and remembers
//!   the expressions, the way prepared statements replace named parameters
//!   with `?`.
use alloc::{string::String, vec::Vec};
use core::{
    cell::{Cell, RefCell},
    convert::Infallible,
};

use crate::{TokenHandler, TokenParser};

/// Records whether the parser found at least one closed region.
///
/// Every region is replaced with an empty string; only the flag matters.
#[derive(Debug, Default)]
pub struct DynamicChecker {
    dynamic: Cell<bool>,
}

impl DynamicChecker {
    /// A checker that has not seen any region yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any region was handed to this checker.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic.get()
    }
}

impl TokenHandler for DynamicChecker {
    type Error = Infallible;

    fn handle_token(&self, _expression: &str) -> Result<String, Infallible> {
        self.dynamic.set(true);
        Ok(String::new())
    }
}

/// Whether `text` contains a closed `open ... close` region.
///
/// Escaped and unterminated regions do not count.
///
/// ```rust
/// use tokensplice::handlers::is_dynamic;
///
/// assert!(is_dynamic("select * from ${table}", "${", "}"));
/// assert!(!is_dynamic(r"select '\${literal}'", "${", "}"));
/// assert!(!is_dynamic("select ${oops", "${", "}"));
/// ```
pub fn is_dynamic(text: &str, open: &str, close: &str) -> bool {
    let parser = TokenParser::new(open, close, DynamicChecker::new());
    parser.substitute(text);
    parser.handler().is_dynamic()
}

/// Replaces every region with `placeholder` and keeps the expressions, in
/// order.
///
/// ```rust
/// use tokensplice::{TokenParser, handlers::Collector};
///
/// let parser = TokenParser::new("#{", "}", Collector::new("?"));
/// let sql = parser.substitute("where id = #{id} and name = #{name}");
/// assert_eq!(sql, "where id = ? and name = ?");
/// assert_eq!(parser.into_handler().into_expressions(), ["id", "name"]);
/// ```
#[derive(Debug, Default)]
pub struct Collector {
    placeholder: String,
    expressions: RefCell<Vec<String>>,
}

impl Collector {
    /// A collector substituting `placeholder` for each region.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            expressions: RefCell::new(Vec::new()),
        }
    }

    /// The text substituted for each region.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of expressions collected so far.
    pub fn len(&self) -> usize {
        self.expressions.borrow().len()
    }

    /// Whether nothing has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.expressions.borrow().is_empty()
    }

    /// Drains the expressions collected so far, leaving the collector ready
    /// for another scan.
    pub fn take_expressions(&self) -> Vec<String> {
        self.expressions.take()
    }

    /// Consumes the collector, returning every expression it saw.
    pub fn into_expressions(self) -> Vec<String> {
        self.expressions.into_inner()
    }
}

impl TokenHandler for Collector {
    type Error = Infallible;

    fn handle_token(&self, expression: &str) -> Result<String, Infallible> {
        self.expressions.borrow_mut().push(expression.into());
        Ok(self.placeholder.clone())
    }
}
