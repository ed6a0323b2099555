//! AST type definitions

use crate::lexer::Span;
use serde::{Deserialize, Serialize};

// ============================================================================
// AST TYPES
// ============================================================================

/// A parsed mapping: entries in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingAst {
    pub entries: Vec<EntryNode>,
}

/// `column '=' field`
#[derive(Debug, Clone, PartialEq)]
pub struct EntryNode {
    pub column: IdentifierNode,
    pub field: FieldNode,
    pub span: Span,
}

/// A column or field name as written.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierNode {
    /// Unquoted text, verbatim.
    Literal { text: String, span: Span },
    /// Content between the delimiters, doubled delimiters not yet decoded.
    Quoted { inner: String, span: Span },
}

impl IdentifierNode {
    pub fn span(&self) -> Span {
        match self {
            IdentifierNode::Literal { span, .. } | IdentifierNode::Quoted { span, .. } => *span,
        }
    }
}

/// Right-hand side of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldNode {
    Identifier(IdentifierNode),
    /// Zero-argument call such as `now()`.
    Function { name: String, span: Span },
}

impl FieldNode {
    pub fn span(&self) -> Span {
        match self {
            FieldNode::Identifier(ident) => ident.span(),
            FieldNode::Function { span, .. } => *span,
        }
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// Parse error with line/column information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not be parsed at line {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}
