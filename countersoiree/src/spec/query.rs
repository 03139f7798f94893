//! Query processing.
//!
//! Compiles query documents against a schema and executes them over a pending
//! transaction.

use apollo_compiler::ast;
use serde_json_bytes::ByteString;

use crate::Configuration;
use crate::abi::ContractAbi;
use crate::json_ext::Object;
use crate::json_ext::Value;
use crate::json_ext::ValueExt;
use crate::spec::PENDING_TRANSACTION_FIELD;
use crate::spec::Predicates;
use crate::spec::Schema;
use crate::spec::Selection;
use crate::spec::SpecError;

/// A GraphQL query, checked against a schema.
///
/// Only `query` operations are kept. Every field selection is resolved against the
/// schema when the query is built, so executing it can only fail on the data.
#[derive(Debug, Clone, Default)]
pub struct Query {
    operations: Vec<Operation>,
}

#[derive(Debug, Clone)]
struct Operation {
    name: Option<String>,
    selection_set: Vec<Selection>,
}

impl Query {
    /// Parse and compile a query document.
    pub fn parse(
        query: &str,
        schema: &Schema,
        configuration: &Configuration,
    ) -> Result<Self, SpecError> {
        let document = ast::Document::parse(query, "query.graphql").map_err(|invalid| {
            let errors = invalid.errors.to_string();
            tracing::debug!("parsing error(s): {}", errors);
            SpecError::ParsingError(errors)
        })?;
        Self::from_document(&document, schema, configuration)
    }

    /// Compile the query operations of an already parsed document.
    ///
    /// Mutations and subscriptions are skipped, as are definitions that are not
    /// operations.
    pub fn from_document(
        document: &ast::Document,
        schema: &Schema,
        configuration: &Configuration,
    ) -> Result<Self, SpecError> {
        let recursion_limit = configuration.execution.recursion_limit;
        let operations = document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::Definition::OperationDefinition(operation) => Some(operation),
                _ => None,
            })
            .filter(|operation| {
                let is_query = operation.operation_type == ast::OperationType::Query;
                if !is_query {
                    tracing::trace!(
                        operation_type = ?operation.operation_type,
                        "ignoring operation"
                    );
                }
                is_query
            })
            .map(|operation| Operation::from_ast(operation, schema, recursion_limit))
            .collect::<Result<Vec<_>, SpecError>>()?;

        Ok(Query { operations })
    }

    /// Names of the compiled operations, in document order.
    pub fn operation_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.operations
            .iter()
            .map(|operation| operation.name.as_deref())
    }

    /// Resolve the query over a pending transaction.
    ///
    /// The results of all operations are merged into one object, later operations
    /// overwriting the fields of earlier ones. The transaction is never modified.
    #[tracing::instrument(skip_all, level = "trace")]
    pub fn execute(
        &self,
        schema: &Schema,
        abi: &dyn ContractAbi,
        configuration: &Configuration,
        pending_transaction: &Value,
    ) -> Result<Object, SpecError> {
        let predicates =
            Predicates::new(schema, abi, configuration.execution.call_data_type.as_str());

        let mut root = Object::new();
        root.insert(
            ByteString::from(PENDING_TRANSACTION_FIELD),
            pending_transaction.clone(),
        );
        let input = Value::Object(root);

        let mut output = Object::new();
        for operation in &self.operations {
            self.apply_selection_set(
                &operation.selection_set,
                &predicates,
                Some(&input),
                &mut output,
            )?;
        }
        Ok(output)
    }

    /// Project `input` on a selection set, nulling out fields whose arguments are not
    /// satisfied.
    ///
    /// Arguments are evaluated on the complete input value of the field, not on its
    /// projection, so a filter can look at data that is not selected.
    fn apply_selection_set(
        &self,
        selection_set: &[Selection],
        predicates: &Predicates<'_>,
        input: Option<&Value>,
        output: &mut Object,
    ) -> Result<(), SpecError> {
        for selection in selection_set {
            let input_value = input.and_then(|input| input.get_path(selection.name.as_str()));

            let mut output_value = match &selection.selection_set {
                Some(selection_set) => {
                    let mut object = Object::new();
                    self.apply_selection_set(selection_set, predicates, input_value, &mut object)?;
                    match input_value {
                        Some(Value::Object(_)) => Value::Object(object),
                        _ => Value::Null,
                    }
                }
                None => input_value.cloned().unwrap_or(Value::Null),
            };

            if !selection.arguments.is_empty()
                && !predicates.arguments_satisfied(
                    &selection.field_type,
                    &selection.arguments,
                    input_value,
                )?
            {
                tracing::debug!(field = selection.name.as_str(), "arguments not satisfied");
                output_value = Value::Null;
            }

            output.insert(selection.name.clone(), output_value);
        }
        Ok(())
    }
}

impl Operation {
    fn from_ast(
        operation: &ast::OperationDefinition,
        schema: &Schema,
        recursion_limit: usize,
    ) -> Result<Self, SpecError> {
        let selection_set = operation
            .selection_set
            .iter()
            .map(|selection| {
                Selection::from_ast(selection, schema.root(), schema, recursion_limit, 0)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Operation {
            name: operation.name.as_ref().map(|name| name.to_string()),
            selection_set,
        })
    }
}
