//! Mapping Compiler - Turn mapping text into a validated column mapping
//!
//! Compilation runs in two phases that never go back:
//!
//! ```text
//! text → Lexer → Parser → MappingAst        (fail fast: MappingSyntaxError)
//!                            ↓
//!               resolve → validate → CompiledMapping { mapping, errors }
//!                                          (fail soft: errors collected)
//! ```

pub mod resolve;

use crate::parser::{parse, MappingAst, ParseError};
use resolve::{resolve_entry, FieldOrigin, ResolvedField};
use serde::Serialize;
use sinkmap_core::{
    ColumnMapping, ConfigError, ConfigResult, Identifier, MappingConventions, MappingSetting,
};
use thiserror::Error;

// ============================================================================
// COMPILE ERRORS
// ============================================================================

/// Mapping text that does not match the grammar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid value '{mapping}' for configuration {setting}: {parse}")]
pub struct MappingSyntaxError {
    /// Configuration key the text came from.
    pub setting: String,
    /// The raw mapping text.
    pub mapping: String,
    #[source]
    pub parse: ParseError,
}

impl From<MappingSyntaxError> for ConfigError {
    fn from(err: MappingSyntaxError) -> Self {
        ConfigError::invalid_value(
            err.setting,
            format!("'{}'", err.mapping),
            err.parse.to_string(),
        )
    }
}

pub type CompileResult<T> = Result<T, MappingSyntaxError>;

// ============================================================================
// COMPILED MAPPING
// ============================================================================

/// A compiled mapping plus every semantic problem found while building it.
///
/// Entries with semantic errors are still present in `mapping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledMapping {
    pub mapping: ColumnMapping,
    pub errors: Vec<String>,
    #[serde(skip)]
    conventions: MappingConventions,
}

impl CompiledMapping {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether a column is bound to the record TTL.
    pub fn has_ttl_binding(&self) -> bool {
        self.mapping
            .contains_column(&Identifier::from_internal(self.conventions.ttl_variable))
    }

    /// Whether a column is bound to the write timestamp.
    pub fn has_timestamp_binding(&self) -> bool {
        self.mapping
            .contains_column(&Identifier::from_internal(self.conventions.timestamp_variable))
    }

    /// Table columns, i.e. everything except the TTL/timestamp bound variables.
    pub fn regular_columns(&self) -> impl Iterator<Item = &Identifier> {
        self.mapping
            .columns()
            .filter(|c| !self.conventions.is_bound_variable(c.as_internal()))
    }

    /// Columns whose value comes from a supported function such as `now()`.
    pub fn function_columns(&self) -> impl Iterator<Item = &Identifier> {
        self.mapping
            .iter()
            .filter(|(_, f)| self.conventions.is_supported_function(f.as_internal()))
            .map(|(c, _)| c)
    }

    pub fn into_parts(self) -> (ColumnMapping, Vec<String>) {
        (self.mapping, self.errors)
    }
}

// ============================================================================
// COMPILER
// ============================================================================

/// Compiles mapping text against a set of naming conventions.
#[derive(Debug, Clone, Copy)]
pub struct MappingCompiler<'c> {
    conventions: &'c MappingConventions,
}

impl Default for MappingCompiler<'static> {
    fn default() -> Self {
        Self::new(&MappingConventions::STANDARD)
    }
}

impl<'c> MappingCompiler<'c> {
    pub fn new(conventions: &'c MappingConventions) -> Self {
        Self { conventions }
    }

    /// Parse and validate `mapping`. `setting` only labels the syntax error.
    pub fn compile(&self, mapping: &str, setting: &str) -> CompileResult<CompiledMapping> {
        let ast = parse(mapping).map_err(|parse| {
            tracing::debug!(setting, error = %parse, "mapping could not be parsed");
            MappingSyntaxError {
                setting: setting.to_string(),
                mapping: mapping.to_string(),
                parse,
            }
        })?;

        let compiled = self.compile_ast(&ast);
        tracing::debug!(
            setting,
            entries = compiled.mapping.len(),
            errors = compiled.errors.len(),
            "compiled mapping"
        );
        Ok(compiled)
    }

    /// Resolve and validate a parsed mapping. Never fails; problems are
    /// collected in the result.
    pub fn compile_ast(&self, ast: &MappingAst) -> CompiledMapping {
        let mut mapping = ColumnMapping::new();
        let mut errors = Vec::new();

        for entry in &ast.entries {
            let resolved = resolve_entry(entry, self.conventions);

            if mapping.contains_column(&resolved.column) {
                errors.push(format!(
                    "Mapping already defined for column '{}'",
                    resolved.column.as_internal()
                ));
            }

            let field = match self.validate_field(resolved.field) {
                Ok(field) => field,
                Err((field, message)) => {
                    errors.push(message);
                    field
                }
            };

            mapping.insert(resolved.column, field);
        }

        for error in &errors {
            tracing::debug!(error = %error, "mapping entry rejected");
        }

        CompiledMapping {
            mapping,
            errors,
            conventions: *self.conventions,
        }
    }

    /// Rewrite whole-record fields and check the shape of everything else.
    /// The field is returned either way so the entry can still be recorded.
    fn validate_field(&self, field: ResolvedField) -> Result<Identifier, (Identifier, String)> {
        let text = field.ident.as_internal();

        if field.origin == FieldOrigin::Literal && self.conventions.is_whole_record_field(text) {
            return Ok(Identifier::from_internal(
                self.conventions.self_reference(text),
            ));
        }

        if self.conventions.has_namespace_prefix(text)
            || self.conventions.is_supported_function(text)
        {
            Ok(field.ident)
        } else {
            let message = self.invalid_field_message(text);
            Err((field.ident, message))
        }
    }

    fn invalid_field_message(&self, field: &str) -> String {
        let whole = self
            .conventions
            .whole_record_fields
            .iter()
            .map(|f| format!("'{}'", f))
            .collect::<Vec<_>>()
            .join(", ");
        let prefixes = self
            .conventions
            .namespace_prefixes
            .iter()
            .map(|p| format!("'{}'", p))
            .collect::<Vec<_>>()
            .join(" or ");
        format!(
            "Invalid field name '{}': field names in mapping must be {}, or start with {}, or be one of supported functions: '{}'.",
            field,
            whole,
            prefixes,
            self.conventions.supported_functions_display()
        )
    }
}

/// Compile with the standard conventions.
pub fn compile(mapping: &str, setting: &str) -> CompileResult<CompiledMapping> {
    MappingCompiler::default().compile(mapping, setting)
}

pub fn compile_with(
    mapping: &str,
    setting: &str,
    conventions: &MappingConventions,
) -> CompileResult<CompiledMapping> {
    MappingCompiler::new(conventions).compile(mapping, setting)
}

/// Compile a table's mapping setting, treating any problem as fatal.
///
/// Semantic errors are reported together, one per line.
pub fn compile_setting(setting: &MappingSetting, mapping: &str) -> ConfigResult<CompiledMapping> {
    let name = setting.setting_name();
    let compiled = compile(mapping, &name).map_err(|err| {
        tracing::warn!(setting = %name, error = %err.parse, "rejecting mapping setting");
        ConfigError::from(err)
    })?;

    if compiled.is_valid() {
        Ok(compiled)
    } else {
        tracing::warn!(
            setting = %name,
            errors = compiled.errors.len(),
            "rejecting mapping setting"
        );
        Err(ConfigError::invalid_value(
            name,
            format!("'{}'", mapping),
            compiled.errors.join("\n"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::from(s)
    }

    fn pairs(compiled: &CompiledMapping) -> Vec<(&str, &str)> {
        compiled
            .mapping
            .iter()
            .map(|(c, f)| (c.as_internal(), f.as_internal()))
            .collect()
    }

    #[test]
    fn test_happy_path() {
        let compiled = compile("c1=value.f1, c2=key.f2", "mapping").unwrap();
        assert_eq!(pairs(&compiled), vec![("c1", "value.f1"), ("c2", "key.f2")]);
        assert!(compiled.is_valid());
    }

    #[test]
    fn test_duplicate_column_last_write_wins() {
        let compiled = compile("value=value.f1,value=value.f2", "mapping").unwrap();
        assert_eq!(pairs(&compiled), vec![("value", "value.f2")]);
        assert_eq!(
            compiled.errors,
            vec!["Mapping already defined for column 'value'".to_string()]
        );
    }

    #[test]
    fn test_whole_record_rewrite() {
        let compiled = compile("c1=value, c2=key", "mapping").unwrap();
        assert_eq!(
            pairs(&compiled),
            vec![("c1", "value.__self"), ("c2", "key.__self")]
        );
        assert!(compiled.is_valid());
    }

    #[test]
    fn test_quoted_value_is_not_rewritten() {
        let compiled = compile(r#"c1="value""#, "mapping").unwrap();
        assert_eq!(pairs(&compiled), vec![("c1", "value")]);
        assert_eq!(compiled.errors.len(), 1);
        assert!(compiled.errors[0].starts_with("Invalid field name 'value'"));
    }

    #[test]
    fn test_invalid_field_message() {
        let compiled = compile("c1=foo", "mapping").unwrap();
        assert_eq!(
            compiled.errors,
            vec!["Invalid field name 'foo': field names in mapping must be 'key', 'value', or start with 'key.' or 'value.' or 'header.', or be one of supported functions: '[now()]'.".to_string()]
        );
        assert_eq!(compiled.mapping.get(&id("c1")), Some(&id("foo")));
    }

    #[test]
    fn test_duplicate_and_invalid_field_both_reported() {
        let compiled = compile("c1=value.a, c1=bogus", "mapping").unwrap();
        assert_eq!(compiled.errors.len(), 2);
        assert!(compiled.errors[0].contains("column 'c1'"));
        assert!(compiled.errors[1].contains("'bogus'"));
        assert_eq!(pairs(&compiled), vec![("c1", "bogus")]);
    }

    #[test]
    fn test_functions() {
        let compiled = compile("c1=now(), c2=later()", "mapping").unwrap();
        assert_eq!(pairs(&compiled), vec![("c1", "now()"), ("c2", "later()")]);
        assert_eq!(compiled.errors.len(), 1);
        assert!(compiled.errors[0].starts_with("Invalid field name 'later()'"));
        let fn_cols: Vec<_> = compiled.function_columns().collect();
        assert_eq!(fn_cols, vec![&id("c1")]);
    }

    #[test]
    fn test_bound_variable_queries() {
        let compiled = compile(
            "c1=value.f1, __ttl=value.ttl, __timestamp=header.ts",
            "mapping",
        )
        .unwrap();
        assert!(compiled.has_ttl_binding());
        assert!(compiled.has_timestamp_binding());
        let regular: Vec<_> = compiled.regular_columns().collect();
        assert_eq!(regular, vec![&id("c1")]);

        let quoted = compile(r#""__ttl"=value.ttl"#, "mapping").unwrap();
        assert!(!quoted.has_ttl_binding());
    }

    #[test]
    fn test_into_parts() {
        let (mapping, errors) = compile("c1=value.f1, c2=foo", "mapping")
            .unwrap()
            .into_parts();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&Identifier::from("c2")), Some(&Identifier::from("foo")));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'foo'"));
    }

    #[test]
    fn test_syntax_error_display() {
        let err = compile("c1=", "topic.t.mapping").unwrap_err();
        assert_eq!(err.parse.line, 1);
        assert_eq!(err.parse.column, 4);
        assert_eq!(
            err.to_string(),
            "Invalid value 'c1=' for configuration topic.t.mapping: Could not be parsed at line 1:4: mismatched input '<EOF>' expecting field"
        );
    }

    #[test]
    fn test_custom_conventions() {
        const CUSTOM: MappingConventions = MappingConventions {
            supported_functions: &["now()", "uuid()"],
            ..MappingConventions::STANDARD
        };
        let compiled = compile_with("c1=uuid()", "mapping", &CUSTOM).unwrap();
        assert!(compiled.is_valid());
        let standard = compile("c1=uuid()", "mapping").unwrap();
        assert!(!standard.is_valid());
    }

    #[test]
    fn test_compile_setting_strict() {
        let setting = MappingSetting::new("mytopic");
        assert!(compile_setting(&setting, "c1=value.f1").is_ok());

        let err = compile_setting(&setting, "c1=foo, c1=bar").unwrap_err();
        match err {
            ConfigError::InvalidValue {
                setting,
                value,
                reason,
            } => {
                assert_eq!(setting, "topic.mytopic.mapping");
                assert_eq!(value, "'c1=foo, c1=bar'");
                assert_eq!(reason.lines().count(), 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_compile_setting_syntax_error() {
        let setting = MappingSetting::new("mytopic");
        let err = compile_setting(&setting, "c1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value 'c1' for configuration topic.mytopic.mapping: Could not be parsed at line 1:3: missing '=' at '<EOF>'"
        );
    }
}
