//! Filter and project pending transactions with GraphQL queries.
//!
//! A query selects fields of the `pendingTransaction` root field. Arguments on a
//! field filter the transaction: a field whose arguments are not satisfied is
//! `null`. Call data can be matched against a contract function interface:
//!
//! ```graphql
//! {
//!   pendingTransaction {
//!     hash
//!     data(interface: "function transfer(address,uint256) returns (bool)")
//!   }
//! }
//! ```

#![warn(unreachable_pub)]

pub mod abi;
mod configuration;
pub mod error;
pub mod json_ext;
mod spec;

use apollo_compiler::ast;

pub use crate::configuration::Configuration;
pub use crate::configuration::Execution;
pub use crate::configuration::generate_config_schema;
use crate::abi::ContractAbi;
use crate::json_ext::Object;
use crate::json_ext::Value;
pub use crate::spec::Query;
pub use crate::spec::Schema;
use crate::spec::SpecError;

/// Execute the query operations of `query` over a pending transaction with the
/// default configuration.
pub fn execute(
    schema: &Schema,
    abi: &dyn ContractAbi,
    query: &ast::Document,
    pending_transaction: &Value,
) -> Result<Object, SpecError> {
    execute_with_configuration(
        &Configuration::default(),
        schema,
        abi,
        query,
        pending_transaction,
    )
}

/// Execute the query operations of `query` over a pending transaction.
pub fn execute_with_configuration(
    configuration: &Configuration,
    schema: &Schema,
    abi: &dyn ContractAbi,
    query: &ast::Document,
    pending_transaction: &Value,
) -> Result<Object, SpecError> {
    Query::from_document(query, schema, configuration)?.execute(
        schema,
        abi,
        configuration,
        pending_transaction,
    )
}
