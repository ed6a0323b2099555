//! Canonical printer: ColumnMapping → mapping text
//!
//! Identifiers are written bare when the lexer would read them back verbatim
//! and quoted otherwise, so compiling the printed text of a valid mapping gives
//! the same mapping back.

use crate::lexer::is_literal_char;
use sinkmap_core::{quote, ColumnMapping, Identifier, MappingConventions};

/// Print a mapping with the standard conventions.
pub fn print_mapping(mapping: &ColumnMapping) -> String {
    print_mapping_with(mapping, &MappingConventions::STANDARD)
}

pub fn print_mapping_with(mapping: &ColumnMapping, conventions: &MappingConventions) -> String {
    mapping
        .iter()
        .map(|(column, field)| {
            format!(
                "{}={}",
                print_column(column, conventions),
                print_field(field, conventions)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_column(column: &Identifier, conventions: &MappingConventions) -> String {
    let text = column.as_internal();
    // A bare `__ttl` would be renamed on the way back in.
    if needs_quotes(text) || conventions.bound_variable_for(text).is_some() {
        quote(text)
    } else {
        text.to_string()
    }
}

fn print_field(field: &Identifier, conventions: &MappingConventions) -> String {
    let text = field.as_internal();
    // A bare `value` would be rewritten to the self reference.
    if needs_quotes(text) || conventions.is_whole_record_field(text) {
        quote(text)
    } else {
        text.to_string()
    }
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty() || !text.chars().all(is_literal_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    #[test]
    fn test_print_plain() {
        let compiled = compile("c1 = value.f1 ,c2=key", "mapping").unwrap();
        assert_eq!(print_mapping(&compiled.mapping), "c1=value.f1, c2=key.__self");
    }

    #[test]
    fn test_print_quotes_when_needed() {
        let compiled = compile(
            r#""my col"=value.f1, "__ttl"=value.t, c3="value", c4=now()"#,
            "mapping",
        )
        .unwrap();
        assert_eq!(
            print_mapping(&compiled.mapping),
            r#""my col"=value.f1, "__ttl"=value.t, c3="value", c4="now()""#
        );
    }

    #[test]
    fn test_printed_text_compiles_to_same_mapping() {
        let source = r#""A""b"=value.x, kafka_internal_ttl=header.t, c=now(), "="=key"#;
        let first = compile(source, "mapping").unwrap();
        let second = compile(&print_mapping(&first.mapping), "mapping").unwrap();
        assert_eq!(first.mapping, second.mapping);
        assert_eq!(first.errors, second.errors);
    }

    #[test]
    fn test_print_empty_mapping() {
        assert_eq!(print_mapping(&ColumnMapping::new()), "");
    }
}
