//! Parser module for mapping text

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::*;
