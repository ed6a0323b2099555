//! Fixed naming conventions shared by the mapping compiler and the write path

/// Names the mapping language treats specially.
///
/// The values are immutable; the compiler borrows a conventions value for the
/// duration of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingConventions {
    /// User-facing column name that binds the record's time-to-live.
    pub external_ttl: &'static str,
    /// User-facing column name that binds the record's write timestamp.
    pub external_timestamp: &'static str,
    /// Bound variable the write path expects for the TTL.
    pub ttl_variable: &'static str,
    /// Bound variable the write path expects for the write timestamp.
    pub timestamp_variable: &'static str,
    /// Suffix meaning "the entire key/value payload".
    pub self_marker: &'static str,
    /// Record sides that can be bound whole (`key`, `value`).
    pub whole_record_fields: &'static [&'static str],
    /// Prefixes a field reference must start with.
    pub namespace_prefixes: &'static [&'static str],
    /// Function calls usable as a field.
    pub supported_functions: &'static [&'static str],
}

impl MappingConventions {
    /// The set used by the connector.
    pub const STANDARD: MappingConventions = MappingConventions {
        external_ttl: "__ttl",
        external_timestamp: "__timestamp",
        ttl_variable: "kafka_internal_ttl",
        timestamp_variable: "kafka_internal_timestamp",
        self_marker: "__self",
        whole_record_fields: &["key", "value"],
        namespace_prefixes: &["key.", "value.", "header."],
        supported_functions: &["now()"],
    };

    /// Map a literal column name onto its bound variable, if it is reserved.
    pub fn bound_variable_for(&self, column: &str) -> Option<&'static str> {
        if column == self.external_ttl {
            Some(self.ttl_variable)
        } else if column == self.external_timestamp {
            Some(self.timestamp_variable)
        } else {
            None
        }
    }

    pub fn is_bound_variable(&self, column: &str) -> bool {
        column == self.ttl_variable || column == self.timestamp_variable
    }

    pub fn is_whole_record_field(&self, field: &str) -> bool {
        self.whole_record_fields.contains(&field)
    }

    /// `value` becomes `value.__self`.
    pub fn self_reference(&self, side: &str) -> String {
        format!("{}.{}", side, self.self_marker)
    }

    pub fn has_namespace_prefix(&self, field: &str) -> bool {
        self.namespace_prefixes
            .iter()
            .any(|prefix| field.starts_with(prefix))
    }

    pub fn is_supported_function(&self, field: &str) -> bool {
        self.supported_functions.contains(&field)
    }

    /// The supported function set as shown in error messages, e.g. `[now()]`.
    pub fn supported_functions_display(&self) -> String {
        format!("[{}]", self.supported_functions.join(", "))
    }
}

impl Default for MappingConventions {
    fn default() -> Self {
        Self::STANDARD
    }
}
