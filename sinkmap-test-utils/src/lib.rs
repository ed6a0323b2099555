//! sinkmap Test Utilities
//!
//! Shared test infrastructure for the sinkmap workspace:
//! - Fixture mapping strings for common scenarios
//! - Proptest generators for mapping entries
//! - A reference model of what a generated mapping should compile to

pub use sinkmap_core::{quote, ColumnMapping, Identifier, MappingConventions};

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    /// Two plain entries, no errors.
    pub const HAPPY_PATH: &str = "c1=value.f1, c2=key.f2";

    /// TTL and timestamp bindings alongside a regular column.
    pub const WITH_BOUND_VARIABLES: &str =
        "c1=value.f1, __ttl=value.ttlField, __timestamp=header.ts";

    /// Whole-record bindings.
    pub const WHOLE_RECORD: &str = "k=key, v=value";

    /// Same column twice.
    pub const DUPLICATE_COLUMN: &str = "value=value.f1,value=value.f2";

    /// Multi-line setting as it would appear in a properties file.
    pub const MULTI_LINE: &str = "c1 = value.f1,\n  \"Mixed Case\" = \"key.K\",\n  c3 = now()";
}

// ============================================================================
// ENTRY SPECS
// ============================================================================

/// Column side of a generated entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSpec {
    Literal(String),
    Quoted(String),
    Ttl,
    Timestamp,
}

/// Field side of a generated entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// Literal with a namespace prefix, e.g. `value.f1`.
    Namespaced(String),
    /// Literal `key` or `value`.
    WholeRecord(&'static str),
    /// Quoted text of any shape.
    Quoted(String),
    /// Zero-argument function call.
    Function(String),
    /// Literal with no prefix, never valid.
    Bare(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntrySpec {
    pub column: ColumnSpec,
    pub field: FieldSpec,
}

impl ColumnSpec {
    pub fn render(&self) -> String {
        match self {
            ColumnSpec::Literal(text) => text.clone(),
            ColumnSpec::Quoted(text) => quote(text),
            ColumnSpec::Ttl => MappingConventions::STANDARD.external_ttl.to_string(),
            ColumnSpec::Timestamp => MappingConventions::STANDARD.external_timestamp.to_string(),
        }
    }

    pub fn expected(&self) -> Identifier {
        let conv = MappingConventions::STANDARD;
        match self {
            ColumnSpec::Literal(text) | ColumnSpec::Quoted(text) => Identifier::from(text.as_str()),
            ColumnSpec::Ttl => Identifier::from(conv.ttl_variable),
            ColumnSpec::Timestamp => Identifier::from(conv.timestamp_variable),
        }
    }
}

impl FieldSpec {
    pub fn render(&self) -> String {
        match self {
            FieldSpec::Namespaced(text) | FieldSpec::Bare(text) => text.clone(),
            FieldSpec::WholeRecord(side) => side.to_string(),
            FieldSpec::Quoted(text) => quote(text),
            FieldSpec::Function(name) => format!("{}()", name),
        }
    }

    /// The identifier the compiler should record, and whether it is valid.
    pub fn expected(&self) -> (Identifier, bool) {
        let conv = MappingConventions::STANDARD;
        match self {
            FieldSpec::Namespaced(text) => (Identifier::from(text.as_str()), true),
            FieldSpec::WholeRecord(side) => (Identifier::from(conv.self_reference(side)), true),
            FieldSpec::Quoted(text) => (
                Identifier::from(text.as_str()),
                conv.has_namespace_prefix(text) || conv.is_supported_function(text),
            ),
            FieldSpec::Function(name) => {
                let text = format!("{}()", name);
                let valid = conv.is_supported_function(&text);
                (Identifier::from(text), valid)
            }
            FieldSpec::Bare(text) => (Identifier::from(text.as_str()), false),
        }
    }
}

/// Join entries into mapping text, using `padding[i]` around the separators of entry `i`.
pub fn render_mapping(entries: &[EntrySpec], padding: &[String]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let pad = padding.get(i).map(String::as_str).unwrap_or("");
            format!(
                "{pad}{}{pad}={pad}{}{pad}",
                entry.column.render(),
                entry.field.render()
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Reference model: the mapping and error count a compile should produce.
pub fn expected_outcome(entries: &[EntrySpec]) -> (ColumnMapping, usize) {
    let mut mapping = ColumnMapping::new();
    let mut errors = 0;
    for entry in entries {
        let column = entry.column.expected();
        if mapping.contains_column(&column) {
            errors += 1;
        }
        let (field, valid) = entry.field.expected();
        if !valid {
            errors += 1;
        }
        mapping.insert(column, field);
    }
    (mapping, errors)
}

// ============================================================================
// GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use proptest::prelude::*;

    /// Unquoted names. Never starts with `_`, so never a reserved column.
    pub fn arb_literal_name() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{0,8}"
    }

    /// Arbitrary printable text, including delimiters and separators.
    pub fn arb_quoted_text() -> impl Strategy<Value = String> {
        "[ -~]{0,12}"
    }

    pub fn arb_column() -> impl Strategy<Value = ColumnSpec> {
        prop_oneof![
            6 => arb_literal_name().prop_map(ColumnSpec::Literal),
            3 => arb_quoted_text().prop_map(ColumnSpec::Quoted),
            1 => Just(ColumnSpec::Ttl),
            1 => Just(ColumnSpec::Timestamp),
        ]
    }

    pub fn arb_field() -> impl Strategy<Value = FieldSpec> {
        prop_oneof![
            6 => "(key|value|header)\\.[a-zA-Z0-9_.-]{0,8}".prop_map(FieldSpec::Namespaced),
            2 => prop_oneof![Just("key"), Just("value")].prop_map(FieldSpec::WholeRecord),
            2 => prop_oneof![
                arb_quoted_text(),
                "(key|value|header)\\.[ -~]{0,6}",
                Just("now()".to_string()),
            ]
            .prop_map(FieldSpec::Quoted),
            1 => prop_oneof![Just("now".to_string()), arb_literal_name()]
                .prop_map(FieldSpec::Function),
            1 => "[a-z][a-z0-9_]{0,6}"
                .prop_filter("whole-record names are rewritten", |s| s != "key" && s != "value")
                .prop_map(FieldSpec::Bare),
        ]
    }

    pub fn arb_entry() -> impl Strategy<Value = EntrySpec> {
        (arb_column(), arb_field()).prop_map(|(column, field)| EntrySpec { column, field })
    }

    /// Whitespace the lexer must ignore.
    pub fn arb_padding() -> impl Strategy<Value = String> {
        "[ \t\r\n]{0,2}"
    }

    /// Entries plus matching padding.
    pub fn arb_mapping(max_entries: usize) -> impl Strategy<Value = (Vec<EntrySpec>, Vec<String>)> {
        prop::collection::vec((arb_entry(), arb_padding()), 1..=max_entries)
            .prop_map(|pairs| pairs.into_iter().unzip())
    }
}
