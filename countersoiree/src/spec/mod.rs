#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

mod predicate;
pub(crate) mod query;
mod schema;
mod selection;

use displaydoc::Display;
pub(crate) use predicate::*;
pub use query::Query;
pub use schema::Schema;
pub(crate) use schema::PENDING_TRANSACTION_FIELD;
pub(crate) use selection::*;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// GraphQL query and schema errors.
///
/// These are structural failures: the query and the schema do not agree with each
/// other, or the query uses a construct the engine does not evaluate. They abort the
/// whole execution.
#[derive(Error, Debug, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SpecError {
    /// selection processing recursion limit exceeded
    RecursionLimitExceeded,
    /// failed to find object type '{0}'
    UnknownType(String),
    /// invalid type error, expected a named object type instead of '{0}'
    InvalidType(String),
    /// cannot query field '{0}' on type '{1}'
    InvalidField(String, String),
    /// expected {expected} value, encountered {found}
    UnexpectedValue {
        /// The JSON kind the engine required.
        expected: String,
        /// The JSON kind found in the input.
        found: String,
    },
    /// unsupported selection kind '{0}'
    UnsupportedSelection(String),
    /// unsupported argument kind '{0}'
    UnsupportedArgument(String),
    /// unable to resolve a predicate for type '{0}'
    UnresolvedPredicateType(String),
    /// parsing error: {0}
    ParsingError(String),
}

impl SpecError {
    /// A stable, machine readable code for this error.
    pub fn extension_code(&self) -> &'static str {
        match self {
            SpecError::RecursionLimitExceeded => "RECURSION_LIMIT_EXCEEDED",
            SpecError::UnknownType(_) => "UNKNOWN_TYPE",
            SpecError::InvalidType(_) => "INVALID_TYPE",
            SpecError::InvalidField(_, _) => "INVALID_FIELD",
            SpecError::UnexpectedValue { .. } => "UNEXPECTED_VALUE",
            SpecError::UnsupportedSelection(_) => "UNSUPPORTED_SELECTION",
            SpecError::UnsupportedArgument(_) => "UNSUPPORTED_ARGUMENT",
            SpecError::UnresolvedPredicateType(_) => "UNRESOLVED_PREDICATE_TYPE",
            SpecError::ParsingError(_) => "PARSING_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        insta::assert_snapshot!(
            SpecError::InvalidField("gas".into(), "PendingTransaction".into()).to_string(),
            @"cannot query field 'gas' on type 'PendingTransaction'"
        );
        insta::assert_snapshot!(
            SpecError::UnexpectedValue {
                expected: "string".into(),
                found: "number".into(),
            }
            .to_string(),
            @"expected string value, encountered number"
        );
        insta::assert_snapshot!(
            SpecError::UnresolvedPredicateType("Address".into()).to_string(),
            @"unable to resolve a predicate for type 'Address'"
        );
    }

    #[test]
    fn extension_codes() {
        assert_eq!(
            SpecError::UnknownType("Block".into()).extension_code(),
            "UNKNOWN_TYPE"
        );
        assert_eq!(
            SpecError::UnsupportedSelection("FragmentSpread".into()).extension_code(),
            "UNSUPPORTED_SELECTION"
        );
    }
}
