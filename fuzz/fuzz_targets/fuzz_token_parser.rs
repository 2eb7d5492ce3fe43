#![no_main]
use std::cell::Cell;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tokensplice::TokenParser;

/// Delimiters are drawn from a small table most of the time so the fuzzer
/// spends its effort on the scan rather than on finding a matching token, and
/// are fully arbitrary otherwise (empty and overlapping pairs included).
static DELIMITERS: &[(&str, &str)] = &[
    ("${", "}"),
    ("#{", "}"),
    ("{{", "}}"),
    ("|", "|"),
    ("{", "}{"),
    ("<", "\\"),
    ("", "}"),
    ("${", ""),
];

#[derive(Debug, Arbitrary)]
enum Delimiters {
    Table(u8),
    Custom(String, String),
}

#[derive(Debug, Arbitrary)]
struct Input {
    delimiters: Delimiters,
    text: String,
}

fn scan(input: &Input) {
    let (open, close) = match &input.delimiters {
        Delimiters::Table(i) => DELIMITERS[usize::from(*i) % DELIMITERS.len()],
        Delimiters::Custom(open, close) => (open.as_str(), close.as_str()),
    };
    let text = input.text.as_str();

    let calls = Cell::new(0usize);
    let parser = TokenParser::new(open, close, |expr: &str| {
        calls.set(calls.get() + 1);
        format!("{open}{expr}{close}")
    });
    let out = parser.substitute(text);

    if open.is_empty() || !text.contains(open) {
        assert_eq!(out, text);
        assert_eq!(calls.get(), 0);
    } else {
        assert!(calls.get() <= text.matches(open).count());
    }
}

fuzz_target!(|input: Input| scan(&input));
