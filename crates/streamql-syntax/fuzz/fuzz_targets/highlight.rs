#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamql_syntax::{ElementType, Highlighter, Token};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    tokens: Vec<(i32, u16, bool, usize, usize)>,
}

fuzz_target!(|input: Input<'_>| {
    let highlighter = Highlighter::default();
    let tokens = input.tokens.iter().map(|&(code, rule, is_rule, start, end)| {
        let kind = if is_rule { ElementType::Rule(rule) } else { ElementType::Token(code) };
        assert!(highlighter.classify(kind).len() <= 1);
        Token::new(kind, start..end)
    });
    let _ = highlighter.highlight_html(input.text, tokens);
});
