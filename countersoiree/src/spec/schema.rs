//! GraphQL schema.

use apollo_compiler::Node;
use apollo_compiler::ast;
use apollo_compiler::name;
use indexmap::IndexMap;
use indexmap::IndexSet;

use crate::spec::SpecError;

/// The single field exposed by the root type.
pub(crate) const PENDING_TRANSACTION_FIELD: &str = "pendingTransaction";

const PENDING_TRANSACTION_SDL: &str = include_str!("../../schema.graphql");

const BUILT_IN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// A GraphQL schema.
///
/// Holds the object type definitions of a parsed schema document, indexed by name.
/// Field types are resolved lazily by name while a query is traversed, so types may
/// reference each other freely.
#[derive(Debug, Clone)]
pub struct Schema {
    object_types: IndexMap<String, Node<ast::ObjectTypeDefinition>>,
    /// Declared types that cannot carry a selection set.
    leaf_types: IndexSet<String>,
    root: Node<ast::ObjectTypeDefinition>,
}

impl Schema {
    /// Parse a schema from SDL.
    pub fn parse(sdl: &str) -> Result<Self, SpecError> {
        let document = ast::Document::parse(sdl, "schema.graphql")
            .map_err(|invalid| SpecError::ParsingError(invalid.errors.to_string()))?;
        Ok(Self::from_document(&document))
    }

    /// The bundled schema describing a mempool pending transaction.
    pub fn pending_transaction() -> Result<Self, SpecError> {
        Self::parse(PENDING_TRANSACTION_SDL)
    }

    /// Collect the object type definitions of an already parsed schema document.
    ///
    /// Other definitions are ignored. When a name is defined twice, the first
    /// definition wins.
    pub fn from_document(document: &ast::Document) -> Self {
        let mut object_types = IndexMap::new();
        let mut leaf_types: IndexSet<String> =
            BUILT_IN_SCALARS.iter().map(|name| (*name).to_owned()).collect();
        for definition in &document.definitions {
            match definition {
                ast::Definition::ObjectTypeDefinition(object_type) => {
                    object_types
                        .entry(object_type.name.to_string())
                        .or_insert_with(|| object_type.clone());
                }
                ast::Definition::ScalarTypeDefinition(scalar) => {
                    leaf_types.insert(scalar.name.to_string());
                }
                ast::Definition::EnumTypeDefinition(enum_type) => {
                    leaf_types.insert(enum_type.name.to_string());
                }
                ast::Definition::InterfaceTypeDefinition(interface) => {
                    leaf_types.insert(interface.name.to_string());
                }
                ast::Definition::UnionTypeDefinition(union_type) => {
                    leaf_types.insert(union_type.name.to_string());
                }
                ast::Definition::InputObjectTypeDefinition(input_object) => {
                    leaf_types.insert(input_object.name.to_string());
                }
                _ => {}
            }
        }
        tracing::trace!(
            object_types = object_types.len(),
            leaf_types = leaf_types.len(),
            "schema loaded"
        );

        Self {
            object_types,
            leaf_types,
            root: root_type(),
        }
    }

    /// The synthetic type queries are resolved against.
    pub(crate) fn root(&self) -> &ast::ObjectTypeDefinition {
        &self.root
    }

    pub(crate) fn object_type(&self, name: &str) -> Result<&ast::ObjectTypeDefinition, SpecError> {
        self.object_types
            .get(name)
            .map(|object_type| &**object_type)
            .ok_or_else(|| SpecError::UnknownType(name.to_owned()))
    }

    pub(crate) fn is_object_type(&self, name: &str) -> bool {
        self.object_types.contains_key(name)
    }

    /// The object type a selection set on a field of type `ty` is resolved against.
    pub(crate) fn selectable_type(
        &self,
        ty: &ast::Type,
    ) -> Result<&ast::ObjectTypeDefinition, SpecError> {
        let name = named_type(ty)?;
        match self.object_types.get(name) {
            Some(object_type) => Ok(object_type),
            None if self.leaf_types.contains(name) => Err(SpecError::InvalidType(ty.to_string())),
            None => Err(SpecError::UnknownType(name.to_owned())),
        }
    }

    pub(crate) fn field_definition<'a>(
        object_type: &'a ast::ObjectTypeDefinition,
        field_name: &str,
    ) -> Result<&'a ast::FieldDefinition, SpecError> {
        object_type
            .fields
            .iter()
            .find(|field| field.name.as_str() == field_name)
            .map(|field| &**field)
            .ok_or_else(|| {
                SpecError::InvalidField(field_name.to_owned(), object_type.name.to_string())
            })
    }
}

/// Returns the name of a named type, nullable or not.
///
/// Lists are not projected and fail with [`SpecError::InvalidType`].
pub(crate) fn named_type(ty: &ast::Type) -> Result<&str, SpecError> {
    match ty {
        ast::Type::Named(name) | ast::Type::NonNullNamed(name) => Ok(name.as_str()),
        ast::Type::List(_) | ast::Type::NonNullList(_) => {
            Err(SpecError::InvalidType(ty.to_string()))
        }
    }
}

/// `type __CounterSoiree__ { pendingTransaction: PendingTransaction }`
fn root_type() -> Node<ast::ObjectTypeDefinition> {
    Node::new(ast::ObjectTypeDefinition {
        description: None,
        name: name!("__CounterSoiree__"),
        implements_interfaces: Vec::new(),
        directives: Default::default(),
        fields: vec![Node::new(ast::FieldDefinition {
            description: None,
            name: name!("pendingTransaction"),
            arguments: Vec::new(),
            ty: ast::Type::Named(name!("PendingTransaction")),
            directives: Default::default(),
        })],
    })
}
