mod async_graphql;

use async_graphql_value::ConstValue;
use indexmap::IndexMap;

use crate::error::Error;

/// A read-only view of a GraphQL schema, indexed by type name.
///
/// Built once before generation (see [`Schema::parse()`]) and never mutated
/// afterwards, so it can be shared freely between concurrent generation
/// calls. The schema is assumed to be well-formed: validation is the
/// parser's job, not ours.
#[derive(Debug)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    query_root: String,
    mutation_root: String,
}

impl Schema {
    /// Parse SDL into a [Schema].
    pub fn parse(sdl: &str) -> Result<Self, Error> {
        Ok(async_graphql_parser::parse_schema(sdl)?.into())
    }

    /// Look up a named type. Built-in scalars are not part of the map.
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// The name of the root query type (`Query` unless the schema definition
    /// says otherwise).
    pub fn query_root_name(&self) -> &str {
        &self.query_root
    }

    /// The name of the root mutation type.
    pub fn mutation_root_name(&self) -> &str {
        &self.mutation_root
    }

    /// All object types that declare an implementation of the given
    /// interface, in declaration order.
    pub fn implementers_of(&self, interface_name: &str) -> Vec<&str> {
        self.types
            .values()
            .filter_map(|definition| match definition {
                TypeDefinition::Object(object) if object.implements.iter().any(|name| name == interface_name) => {
                    Some(object.name.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

/// A named type definition.
#[derive(Debug)]
pub enum TypeDefinition {
    /// An object type.
    Object(ObjectType),
    /// An interface type.
    Interface(InterfaceType),
    /// A union type.
    Union(UnionType),
    /// An enum type.
    Enum(EnumType),
    /// A custom scalar.
    Scalar(ScalarType),
    /// An input object type.
    InputObject(InputObjectType),
}

impl TypeDefinition {
    /// The name of the definition.
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(object) => &object.name,
            TypeDefinition::Interface(interface) => &interface.name,
            TypeDefinition::Union(r#union) => &r#union.name,
            TypeDefinition::Enum(r#enum) => &r#enum.name,
            TypeDefinition::Scalar(scalar) => &scalar.name,
            TypeDefinition::InputObject(input_object) => &input_object.name,
        }
    }
}

/// An object type and its fields.
#[derive(Debug)]
pub struct ObjectType {
    /// Type name.
    pub name: String,
    /// Names of the interfaces this type implements.
    pub implements: Vec<String>,
    /// Fields, in declaration order.
    pub fields: Vec<FieldDefinition>,
}

/// An interface type and its declared fields.
#[derive(Debug)]
pub struct InterfaceType {
    /// Type name.
    pub name: String,
    /// Fields, in declaration order.
    pub fields: Vec<FieldDefinition>,
}

/// A union type.
#[derive(Debug)]
pub struct UnionType {
    /// Type name.
    pub name: String,
    /// Member type names, in declaration order.
    pub members: Vec<String>,
}

/// An enum type.
#[derive(Debug)]
pub struct EnumType {
    /// Type name.
    pub name: String,
    /// Declared values, in declaration order.
    pub values: Vec<String>,
}

/// A custom scalar.
#[derive(Debug)]
pub struct ScalarType {
    /// Type name.
    pub name: String,
}

/// An input object type.
#[derive(Debug)]
pub struct InputObjectType {
    /// Type name.
    pub name: String,
    /// Input fields, in declaration order.
    pub fields: Vec<InputValueDefinition>,
}

/// A field of an object or interface type.
#[derive(Debug)]
pub struct FieldDefinition {
    /// Field name.
    pub name: String,
    /// Return type.
    pub ty: TypeRef,
    /// Arguments, in declaration order.
    pub arguments: Vec<InputValueDefinition>,
    /// Directives applied to the field.
    pub directives: Vec<Directive>,
}

/// An argument of a field, or a field of an input object type.
#[derive(Debug)]
pub struct InputValueDefinition {
    /// Argument name.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Declared default value, if any.
    pub default_value: Option<ConstValue>,
}

/// A directive applied to a field, with its constant arguments.
#[derive(Debug)]
pub struct Directive {
    /// Directive name, without the `@`.
    pub name: String,
    /// Arguments, in declaration order.
    pub arguments: Vec<(String, ConstValue)>,
}

/// A reference to a type, together with its list and non-null wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A named type.
    Named(String),
    /// A list wrapper.
    List(Box<TypeRef>),
    /// A non-null wrapper.
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The innermost type name, with all wrappers stripped.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.name(),
        }
    }

    /// Whether the outermost wrapper is non-null.
    pub fn is_required(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
