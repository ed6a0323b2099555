//! sinkmap DSL - Mapping Language Parser & Compiler
//!
//! Compiles a connector mapping setting such as
//! `c1=value.f1, c2=key.f2, __ttl=value.ttlField` into an ordered
//! column → field mapping.
//!
//! Architecture:
//! ```text
//! Mapping text
//!     ↓
//! Lexer (tokens)
//!     ↓
//! Parser (MappingAst)          ← syntax errors abort here
//!     ↓
//! Resolver (quoting, reserved column renames)
//!     ↓
//! Compiler (duplicates, field shape) → CompiledMapping { mapping, errors }
//!     ↓
//! Printer (canonical mapping text)
//! ```

pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod printer;

// Re-export key types for convenience
pub use compiler::*;
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::*;
pub use printer::{print_mapping, print_mapping_with};
pub use sinkmap_core::{ColumnMapping, ConfigError, Identifier, MappingConventions, MappingSetting};
