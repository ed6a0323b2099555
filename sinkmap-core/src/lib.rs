//! sinkmap Core - Mapping Data Types
//!
//! Plain data structures shared by the mapping compiler and its consumers:
//! identifiers, the ordered column mapping, the fixed naming conventions and
//! configuration errors. No parsing lives here.

pub mod conventions;
pub mod error;
pub mod identifier;
pub mod mapping;
pub mod setting;

pub use conventions::MappingConventions;
pub use error::{ConfigError, ConfigResult};
pub use identifier::{quote, Identifier, QUOTE};
pub use mapping::ColumnMapping;
pub use setting::{topic_setting_name, MappingSetting, MAPPING_OPTION};
