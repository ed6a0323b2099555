//! Identifier resolution: AST nodes → resolved identifiers

use crate::parser::ast::*;
use sinkmap_core::{Identifier, MappingConventions};

/// How a field identifier was written. The validator only rewrites literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    Literal,
    Quoted,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub ident: Identifier,
    pub origin: FieldOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub column: Identifier,
    pub field: ResolvedField,
}

/// Resolve a column. Literal `__ttl` / `__timestamp` become the write path's
/// bound variables; quoted columns are taken as written.
pub fn resolve_column(node: &IdentifierNode, conventions: &MappingConventions) -> Identifier {
    match node {
        IdentifierNode::Literal { text, .. } => match conventions.bound_variable_for(text) {
            Some(bound) => Identifier::from_internal(bound),
            None => Identifier::from_internal(text.as_str()),
        },
        IdentifierNode::Quoted { inner, .. } => Identifier::from_quoted_inner(inner),
    }
}

pub fn resolve_field(node: &FieldNode) -> ResolvedField {
    match node {
        FieldNode::Identifier(IdentifierNode::Literal { text, .. }) => ResolvedField {
            ident: Identifier::from_internal(text.as_str()),
            origin: FieldOrigin::Literal,
        },
        FieldNode::Identifier(IdentifierNode::Quoted { inner, .. }) => ResolvedField {
            ident: Identifier::from_quoted_inner(inner),
            origin: FieldOrigin::Quoted,
        },
        FieldNode::Function { name, .. } => ResolvedField {
            ident: Identifier::from_internal(format!("{}()", name)),
            origin: FieldOrigin::Function,
        },
    }
}

pub fn resolve_entry(entry: &EntryNode, conventions: &MappingConventions) -> ResolvedEntry {
    ResolvedEntry {
        column: resolve_column(&entry.column, conventions),
        field: resolve_field(&entry.field),
    }
}
