//! Logic for loading configuration in to an object model

use std::str::FromStr;

use displaydoc::Display;
use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use schemars::schema::RootSchema;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error, Display)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// could not deserialize configuration: {0}
    DeserializeConfigError(serde_yaml::Error),
    /// {message}: {error}
    InvalidConfiguration {
        message: &'static str,
        error: String,
    },
}

/// The configuration of query execution.
///
/// Can be created through `serde::Deserialize` from various formats, from YAML with
/// [`FromStr`], or inline in Rust code with the builder.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Configuration options pertaining to query execution.
    #[serde(default)]
    pub(crate) execution: Execution,
}

#[buildstructor::buildstructor]
impl Configuration {
    #[builder]
    pub fn new(execution: Option<Execution>) -> Self {
        Self {
            execution: execution.unwrap_or_default(),
        }
    }
}

impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let configuration: Configuration =
            serde_yaml::from_str(s).map_err(ConfigurationError::DeserializeConfigError)?;
        configuration.validate()
    }
}

impl Configuration {
    fn validate(self) -> Result<Self, ConfigurationError> {
        if self.execution.call_data_type.trim().is_empty() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "execution.call_data_type must name a schema type",
                error: format!("{:?}", self.execution.call_data_type),
            });
        }
        Ok(self)
    }
}

/// Configuration options pertaining to query execution.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Execution {
    /// Maximum nesting depth of a query's selections
    /// default: 512
    #[serde(default = "default_recursion_limit")]
    pub(crate) recursion_limit: usize,

    /// Schema type whose object arguments are evaluated as call data predicates
    /// default: "Data"
    #[serde(default = "default_call_data_type")]
    pub(crate) call_data_type: String,
}

#[buildstructor::buildstructor]
impl Execution {
    #[builder]
    pub fn new(recursion_limit: Option<usize>, call_data_type: Option<String>) -> Self {
        Self {
            recursion_limit: recursion_limit.unwrap_or_else(default_recursion_limit),
            call_data_type: call_data_type.unwrap_or_else(default_call_data_type),
        }
    }
}

impl Default for Execution {
    fn default() -> Self {
        Execution::builder().build()
    }
}

fn default_recursion_limit() -> usize {
    // well below what would overflow the stack, well above any legitimate query
    512
}

fn default_call_data_type() -> String {
    String::from("Data")
}

/// Generate a JSON schema for the configuration.
pub fn generate_config_schema() -> RootSchema {
    let settings = SchemaSettings::draft2019_09().with(|s| {
        s.option_nullable = true;
        s.option_add_null_type = false;
        s.inline_subschemas = true;
    });
    settings.into_generator().into_root_schema_for::<Configuration>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let configuration = Configuration::default();
        assert_eq!(configuration.execution.recursion_limit, 512);
        assert_eq!(configuration.execution.call_data_type, "Data");

        let configuration: Configuration = "execution: {}\n".parse().unwrap();
        assert_eq!(configuration.execution.recursion_limit, 512);
    }

    #[test]
    fn from_yaml() {
        let configuration: Configuration = r#"
execution:
  recursion_limit: 8
  call_data_type: CallData
"#
        .parse()
        .unwrap();
        assert_eq!(configuration.execution.recursion_limit, 8);
        assert_eq!(configuration.execution.call_data_type, "CallData");
    }

    #[test]
    fn builder() {
        let configuration = Configuration::builder()
            .execution(Execution::builder().recursion_limit(3).build())
            .build();
        assert_eq!(configuration.execution.recursion_limit, 3);
        assert_eq!(configuration.execution.call_data_type, "Data");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = "execution:\n  depth: 3\n"
            .parse::<Configuration>()
            .unwrap_err();
        assert!(matches!(error, ConfigurationError::DeserializeConfigError(_)));
    }

    #[test]
    fn empty_call_data_type_is_rejected() {
        let error = "execution:\n  call_data_type: ''\n"
            .parse::<Configuration>()
            .unwrap_err();
        insta::assert_snapshot!(
            error.to_string(),
            @r#"execution.call_data_type must name a schema type: """#
        );
    }

    #[test]
    fn config_schema() {
        let schema = serde_json::to_string(&generate_config_schema()).unwrap();
        assert!(schema.contains("\"recursion_limit\""));
        assert!(schema.contains("\"call_data_type\""));
    }
}
