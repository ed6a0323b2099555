//! Per-topic mapping setting names

use crate::{ConfigError, ConfigResult};
use std::fmt;

const TOPIC_PREFIX: &str = "topic.";

/// Option name of the mapping string among a topic's settings.
pub const MAPPING_OPTION: &str = "mapping";

/// Build the `topic.<topic>.<option>` key of a per-topic option.
pub fn topic_setting_name(topic: &str, option: &str) -> String {
    format!("{}{}.{}", TOPIC_PREFIX, topic, option)
}

/// Identifies the `topic.<topic>.mapping` key a mapping string was read from.
///
/// Keyspace and table are sibling options of the same topic
/// (`topic.<topic>.keyspace`, `topic.<topic>.table`), not part of this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingSetting {
    pub topic: String,
}

impl MappingSetting {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    /// The full configuration key.
    pub fn setting_name(&self) -> String {
        topic_setting_name(&self.topic, MAPPING_OPTION)
    }

    /// Recover the topic from a configuration key.
    ///
    /// Topic names may contain dots; the last segment is the option name and
    /// must be `mapping`.
    pub fn parse(name: &str) -> ConfigResult<Self> {
        let invalid = || ConfigError::InvalidSettingName {
            name: name.to_string(),
        };

        let (topic, option) = name
            .strip_prefix(TOPIC_PREFIX)
            .and_then(|rest| rest.rsplit_once('.'))
            .ok_or_else(invalid)?;

        if topic.is_empty() || option != MAPPING_OPTION {
            return Err(invalid());
        }

        Ok(Self::new(topic))
    }
}

impl fmt::Display for MappingSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.setting_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_name() {
        let setting = MappingSetting::new("mytopic");
        assert_eq!(setting.setting_name(), "topic.mytopic.mapping");
        assert_eq!(setting.to_string(), "topic.mytopic.mapping");
    }

    #[test]
    fn test_topic_setting_name_for_sibling_options() {
        assert_eq!(topic_setting_name("mytopic", "keyspace"), "topic.mytopic.keyspace");
        assert_eq!(topic_setting_name("mytopic", "table"), "topic.mytopic.table");
        assert_eq!(
            topic_setting_name("mytopic", MAPPING_OPTION),
            MappingSetting::new("mytopic").setting_name()
        );
    }

    #[test]
    fn test_parse_connector_key() {
        let setting = MappingSetting::parse("topic.mytopic.mapping").unwrap();
        assert_eq!(setting, MappingSetting::new("mytopic"));
    }

    #[test]
    fn test_parse_dotted_topic() {
        let setting = MappingSetting::parse("topic.my.dotted.topic.mapping").unwrap();
        assert_eq!(setting.topic, "my.dotted.topic");
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for name in [
            "topic.mapping",
            "topic..mapping",
            "mytopic.mapping",
            "topic.mytopic.keyspace",
            "topic.mytopic.ks.tbl.ttl",
            "topic.mytopic",
        ] {
            assert!(
                matches!(
                    MappingSetting::parse(name),
                    Err(ConfigError::InvalidSettingName { .. })
                ),
                "{name} should be rejected"
            );
        }
    }
}
