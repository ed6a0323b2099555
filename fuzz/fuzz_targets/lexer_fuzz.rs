//! Fuzz test for the mapping lexer
//!
//! Feeds arbitrary UTF-8 to the lexer looking for panics and runaway loops.
//!
//! Run with: cargo +nightly fuzz run lexer_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use sinkmap_dsl::{Lexer, TokenKind};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let tokens = Lexer::new(input).tokenize();

        // Exactly one Eof, and it comes last
        assert_eq!(
            tokens.last().map(|t| &t.kind),
            Some(&TokenKind::Eof),
            "Last token should always be Eof"
        );
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
            1
        );

        for token in &tokens {
            assert!(token.span.start <= token.span.end, "Span start should be <= end");
            assert!(token.span.end <= input.len(), "Span should stay inside the input");
            assert!(token.span.line >= 1, "Line numbers should be >= 1");
            assert!(token.span.column >= 1, "Column numbers should be >= 1");
        }
    }
});
