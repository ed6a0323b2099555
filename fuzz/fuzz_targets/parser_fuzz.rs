//! Fuzz test for the mapping parser and compiler
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use sinkmap_dsl::{compile, print_mapping, Lexer, Parser};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        match compile(input, "fuzz") {
            Ok(compiled) => {
                // Every parsed entry lands in the mapping (possibly overwritten)
                assert!(!compiled.mapping.is_empty());

                // Canonical text must compile back to the same mapping
                let printed = print_mapping(&compiled.mapping);
                let again = compile(&printed, "fuzz").expect("printed mapping should parse");
                assert_eq!(again.mapping, compiled.mapping);
            }
            Err(err) => {
                assert!(err.parse.line >= 1, "Error line should be >= 1");
                assert!(err.parse.column >= 1, "Error column should be >= 1");
                assert!(!err.parse.message.is_empty(), "Error message should not be empty");
            }
        }

        // Parser over a collected token vector must agree with the lazy path
        let tokens = Lexer::new(input).tokenize();
        let eager = Parser::new(tokens).parse();
        let lazy = Parser::new(Lexer::new(input)).parse();
        assert_eq!(eager, lazy);
    }
});
