//! Lexer module for mapping text

pub mod token;
pub mod scanner;

pub use token::*;
pub use scanner::*;
