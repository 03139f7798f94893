//! Field arguments as filters.
//!
//! Arguments on a field are predicates over the transaction: a field whose
//! arguments are not all satisfied resolves to `null`. Predicates that simply do
//! not hold, including ones naming data the transaction does not have, evaluate to
//! `false`. A predicate the schema cannot give a meaning to is an error.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast;

use super::schema::named_type;
use crate::abi::ContractAbi;
use crate::json_ext::Value;
use crate::json_ext::ValueExt;
use crate::spec::Schema;
use crate::spec::SpecError;

/// Call data predicate matching the function the transaction invokes.
pub(crate) const INTERFACE_PREDICATE: &str = "interface";

/// Evaluates field arguments against input values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Predicates<'a> {
    schema: &'a Schema,
    abi: &'a dyn ContractAbi,
    call_data_type: &'a str,
}

impl<'a> Predicates<'a> {
    pub(crate) fn new(schema: &'a Schema, abi: &'a dyn ContractAbi, call_data_type: &'a str) -> Self {
        Self {
            schema,
            abi,
            call_data_type,
        }
    }

    /// Whether `value`, the complete input value of a field declared as `field_type`,
    /// satisfies every argument of that field.
    ///
    /// Every argument is evaluated so that an invalid argument is reported even when
    /// an earlier one is not satisfied.
    pub(crate) fn arguments_satisfied(
        &self,
        field_type: &ast::Type,
        arguments: &[Node<ast::Argument>],
        value: Option<&Value>,
    ) -> Result<bool, SpecError> {
        let mut satisfied = true;
        for argument in arguments {
            satisfied &= self.argument_satisfied(field_type, argument, value)?;
        }
        Ok(satisfied)
    }

    fn argument_satisfied(
        &self,
        field_type: &ast::Type,
        argument: &ast::Argument,
        value: Option<&Value>,
    ) -> Result<bool, SpecError> {
        let type_name = named_type(field_type)?;
        if type_name == self.call_data_type {
            // on call data, an argument is a single predicate over the field's own value
            let fields = [(argument.name.clone(), argument.value.clone())];
            return self.value_satisfies_object_argument(type_name, &fields, value);
        }
        if !self.schema.is_object_type(type_name) {
            return self.value_satisfies_argument(field_type, &argument.value, value);
        }

        // on an object field, an argument filters on the member it is named after
        let object_type = self.schema.object_type(type_name)?;
        let field_definition = Schema::field_definition(object_type, argument.name.as_str())?;
        let member = match value {
            None | Some(Value::Null) => return Ok(false),
            Some(Value::Object(object)) => object.get(argument.name.as_str()),
            Some(other) => {
                return Err(SpecError::UnexpectedValue {
                    expected: "object".to_owned(),
                    found: other.kind().to_owned(),
                });
            }
        };
        match member {
            Some(member) => {
                self.value_satisfies_argument(&field_definition.ty, &argument.value, Some(member))
            }
            None => Ok(false),
        }
    }

    /// Whether `value`, declared as `ty`, satisfies an argument literal.
    fn value_satisfies_argument(
        &self,
        ty: &ast::Type,
        argument: &ast::Value,
        value: Option<&Value>,
    ) -> Result<bool, SpecError> {
        match argument {
            ast::Value::String(expected) => {
                Ok(value.and_then(Value::as_str) == Some(expected.as_str()))
            }
            ast::Value::Object(fields) => {
                self.value_satisfies_object_argument(named_type(ty)?, fields, value)
            }
            ast::Value::Null => Err(SpecError::UnsupportedArgument("Null".to_owned())),
            ast::Value::Enum(_) => Err(SpecError::UnsupportedArgument("Enum".to_owned())),
            ast::Value::Variable(_) => Err(SpecError::UnsupportedArgument("Variable".to_owned())),
            ast::Value::Float(_) => Err(SpecError::UnsupportedArgument("Float".to_owned())),
            ast::Value::Int(_) => Err(SpecError::UnsupportedArgument("Int".to_owned())),
            ast::Value::Boolean(_) => Err(SpecError::UnsupportedArgument("Boolean".to_owned())),
            ast::Value::List(_) => Err(SpecError::UnsupportedArgument("List".to_owned())),
        }
    }

    /// Object literals are interpreted according to the type of the value they filter.
    fn value_satisfies_object_argument(
        &self,
        type_name: &str,
        fields: &[(Name, Node<ast::Value>)],
        value: Option<&Value>,
    ) -> Result<bool, SpecError> {
        if type_name != self.call_data_type {
            return Err(SpecError::UnresolvedPredicateType(type_name.to_owned()));
        }

        let call_data = match value {
            None => return Ok(false),
            Some(Value::String(call_data)) => call_data.as_str(),
            Some(other) => {
                return Err(SpecError::UnexpectedValue {
                    expected: "string".to_owned(),
                    found: other.kind().to_owned(),
                });
            }
        };

        Ok(fields
            .iter()
            .all(|(name, predicate)| self.call_data_satisfies(name, predicate, call_data)))
    }

    fn call_data_satisfies(&self, name: &Name, predicate: &ast::Value, call_data: &str) -> bool {
        if name.as_str() == INTERFACE_PREDICATE {
            return self.call_data_satisfies_interface(predicate, call_data);
        }

        tracing::debug!(predicate = %name, "unrecognized call data predicate is never satisfied");
        false
    }

    /// Call data satisfies an interface when it starts with the selector of the
    /// function the interface resolves to.
    fn call_data_satisfies_interface(&self, interface: &ast::Value, call_data: &str) -> bool {
        let ast::Value::String(interface) = interface else {
            return false;
        };

        match self.abi.resolve_function(Some(interface)) {
            Some(function) => self.abi.function_selector(&function).is_prefix_of(call_data),
            None => false,
        }
    }
}
