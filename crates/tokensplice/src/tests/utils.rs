use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::cell::RefCell;

use crate::TokenParser;

/// Handler wrapper that records every expression it receives.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub calls: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

/// Parses `text` with an uppercasing handler and returns the output together
/// with the expressions seen, in order.
pub(crate) fn upper(open: &str, close: &str, text: &str) -> (String, Vec<String>) {
    let recorder = Recorder::default();
    let parser = TokenParser::new(open, close, |expr: &str| {
        recorder.calls.borrow_mut().push(expr.to_owned());
        expr.to_uppercase()
    });
    let out = parser.substitute(text).into_owned();
    (out, recorder.calls())
}

pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    tests
}
