use async_graphql_parser::types::{self, BaseType, ServiceDocument, TypeKind, TypeSystemDefinition};
use indexmap::IndexMap;

use super::{
    Directive, EnumType, FieldDefinition, InputObjectType, InputValueDefinition, InterfaceType, ObjectType,
    ScalarType, Schema, TypeDefinition, TypeRef, UnionType,
};

impl From<ServiceDocument> for Schema {
    fn from(document: ServiceDocument) -> Self {
        let mut schema_types = IndexMap::new();
        let mut query_root = "Query".to_owned();
        let mut mutation_root = "Mutation".to_owned();

        for definition in document.definitions {
            match definition {
                TypeSystemDefinition::Schema(schema_definition) => {
                    if let Some(query) = schema_definition.node.query {
                        query_root = query.node.to_string();
                    }
                    if let Some(mutation) = schema_definition.node.mutation {
                        mutation_root = mutation.node.to_string();
                    }
                }
                TypeSystemDefinition::Type(type_definition) => {
                    let converted = convert_type(type_definition.node);
                    schema_types.insert(converted.name().to_owned(), converted);
                }
                TypeSystemDefinition::Directive(_) => (),
            }
        }

        Schema {
            types: schema_types,
            query_root,
            mutation_root,
        }
    }
}

fn convert_type(definition: types::TypeDefinition) -> TypeDefinition {
    let name = definition.name.node.to_string();

    match definition.kind {
        TypeKind::Scalar => TypeDefinition::Scalar(ScalarType { name }),
        TypeKind::Object(object) => TypeDefinition::Object(ObjectType {
            name,
            implements: object.implements.iter().map(|name| name.node.to_string()).collect(),
            fields: object
                .fields
                .into_iter()
                .map(|field| convert_field(field.node))
                .collect(),
        }),
        TypeKind::Interface(interface) => TypeDefinition::Interface(InterfaceType {
            name,
            fields: interface
                .fields
                .into_iter()
                .map(|field| convert_field(field.node))
                .collect(),
        }),
        TypeKind::Union(r#union) => TypeDefinition::Union(UnionType {
            name,
            members: r#union.members.iter().map(|member| member.node.to_string()).collect(),
        }),
        TypeKind::Enum(r#enum) => TypeDefinition::Enum(EnumType {
            name,
            values: r#enum
                .values
                .iter()
                .map(|value| value.node.value.node.to_string())
                .collect(),
        }),
        TypeKind::InputObject(input_object) => TypeDefinition::InputObject(InputObjectType {
            name,
            fields: input_object
                .fields
                .into_iter()
                .map(|field| convert_input_value(field.node))
                .collect(),
        }),
    }
}

fn convert_field(field: types::FieldDefinition) -> FieldDefinition {
    FieldDefinition {
        name: field.name.node.to_string(),
        ty: convert_type_ref(&field.ty.node),
        arguments: field
            .arguments
            .into_iter()
            .map(|argument| convert_input_value(argument.node))
            .collect(),
        directives: field
            .directives
            .into_iter()
            .map(|directive| convert_directive(directive.node))
            .collect(),
    }
}

fn convert_input_value(value: types::InputValueDefinition) -> InputValueDefinition {
    InputValueDefinition {
        name: value.name.node.to_string(),
        ty: convert_type_ref(&value.ty.node),
        default_value: value.default_value.map(|value| value.node),
    }
}

fn convert_directive(directive: types::ConstDirective) -> Directive {
    Directive {
        name: directive.name.node.to_string(),
        arguments: directive
            .arguments
            .into_iter()
            .map(|(name, value)| (name.node.to_string(), value.node))
            .collect(),
    }
}

fn convert_type_ref(ty: &types::Type) -> TypeRef {
    let base = match &ty.base {
        BaseType::Named(name) => TypeRef::Named(name.to_string()),
        BaseType::List(inner) => TypeRef::List(Box::new(convert_type_ref(inner))),
    };

    if ty.nullable {
        base
    } else {
        TypeRef::NonNull(Box::new(base))
    }
}
