use apollo_compiler::Node;
use apollo_compiler::ast;
use serde_json_bytes::ByteString;

use crate::spec::Schema;
use crate::spec::SpecError;

/// A field selection checked against the schema.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    pub(crate) name: ByteString,
    pub(crate) arguments: Vec<Node<ast::Argument>>,
    pub(crate) selection_set: Option<Vec<Selection>>,
    /// Type declared for this field on its parent object type.
    pub(crate) field_type: ast::Type,
}

impl Selection {
    /// Resolve an AST selection against its enclosing object type.
    ///
    /// Only field selections are supported. Nested selection sets are resolved against
    /// the object type named by the field's declared type.
    pub(crate) fn from_ast(
        selection: &ast::Selection,
        current_type: &ast::ObjectTypeDefinition,
        schema: &Schema,
        recursion_limit: usize,
        mut count: usize,
    ) -> Result<Self, SpecError> {
        if count > recursion_limit {
            tracing::error!("selection processing recursion limit({recursion_limit}) exceeded");
            return Err(SpecError::RecursionLimitExceeded);
        }
        count += 1;

        let field = match selection {
            ast::Selection::Field(field) => field,
            ast::Selection::FragmentSpread(_) => {
                return Err(SpecError::UnsupportedSelection("FragmentSpread".to_owned()));
            }
            ast::Selection::InlineFragment(_) => {
                return Err(SpecError::UnsupportedSelection("InlineFragment".to_owned()));
            }
        };

        let field_type = Schema::field_definition(current_type, field.name.as_str())?
            .ty
            .clone();

        let selection_set = if field.selection_set.is_empty() {
            None
        } else {
            let object_type = schema.selectable_type(&field_type)?;
            Some(
                field
                    .selection_set
                    .iter()
                    .map(|selection| {
                        Selection::from_ast(selection, object_type, schema, recursion_limit, count)
                    })
                    .collect::<Result<_, _>>()?,
            )
        };

        Ok(Self {
            name: field.name.as_str().into(),
            arguments: field.arguments.clone(),
            selection_set,
            field_type,
        })
    }
}
