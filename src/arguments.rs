//! Argument materialization: deciding which arguments of a field must be
//! included, and producing a value for each of them.
//!
//! Every included argument becomes one variable named
//! `EnclosingType__fieldName__argumentName`; the argument node references the
//! variable and the value lands in the variable-values map. Values come, in
//! order, from: a random enum pick, a provider (field bundle first, specific
//! key second), placeholder synthesis, or an explicit `null` for nullable
//! arguments. A non-null argument that reaches the end of the chain is a
//! fatal error.

use async_graphql_value::ConstValue;
use serde_json::Value;

use crate::{
    ast,
    config::Configuration,
    error::Error,
    generate::GenerationContext,
    providers::VariableValues,
    schema::{FieldDefinition, InputValueDefinition, TypeDefinition, TypeRef},
};

/// The `@listSize` directive, as far as the generator is concerned.
pub(crate) struct ListSize {
    pub(crate) slicing_arguments: Vec<String>,
    pub(crate) require_one_slicing_argument: bool,
}

pub(crate) fn list_size_directive(field: &FieldDefinition) -> Option<ListSize> {
    let directive = field.directives.iter().find(|directive| directive.name == "listSize")?;

    let mut slicing_arguments = Vec::new();
    let mut require_one_slicing_argument = true;

    for (name, value) in &directive.arguments {
        match (name.as_str(), value) {
            ("slicingArguments", ConstValue::List(items)) => {
                slicing_arguments = items
                    .iter()
                    .filter_map(|item| match item {
                        ConstValue::String(path) => Some(path.clone()),
                        _ => None,
                    })
                    .collect();
            }
            ("requireOneSlicingArgument", ConstValue::Boolean(require)) => {
                require_one_slicing_argument = *require;
            }
            _ => (),
        }
    }

    Some(ListSize {
        slicing_arguments,
        require_one_slicing_argument,
    })
}

/// The arguments a field selection must carry, plus the slicing path (split
/// into segments) that applies to one of them, if any.
pub(crate) struct ArgumentPlan<'a> {
    pub(crate) arguments: Vec<&'a InputValueDefinition>,
    pub(crate) slicing_path: Option<Vec<String>>,
}

pub(crate) fn required_arguments<'a>(
    field: &'a FieldDefinition,
    config: &Configuration,
) -> Result<ArgumentPlan<'a>, Error> {
    let mut required_names: Vec<&str> = Vec::new();

    for argument in &field.arguments {
        if consider_argument(argument, config)? {
            required_names.push(&argument.name);
        }
    }

    let list_size = list_size_directive(field);

    // The winning slicing path: first declared path whose head segment names
    // an actual argument of the field. Paths naming nothing are ignored.
    let slicing_path = list_size.as_ref().and_then(|list_size| {
        list_size
            .slicing_arguments
            .iter()
            .map(|path| path.split('.').map(str::to_owned).collect::<Vec<_>>())
            .find(|segments| field.arguments.iter().any(|argument| argument.name == segments[0]))
    });

    if let Some(list_size) = &list_size {
        let covered = list_size.slicing_arguments.iter().any(|path| {
            let head = path.split('.').next().unwrap_or(path);
            required_names.contains(&head)
        });

        if list_size.require_one_slicing_argument && !covered {
            if let Some(segments) = &slicing_path {
                if let Some(argument) = field.arguments.iter().find(|argument| argument.name == segments[0]) {
                    required_names.push(&argument.name);
                }
            }
        }
    }

    // Emission follows the schema's declaration order, whatever order the
    // names were collected in.
    let arguments = field
        .arguments
        .iter()
        .filter(|argument| required_names.contains(&argument.name.as_str()))
        .collect();

    Ok(ArgumentPlan { arguments, slicing_path })
}

fn consider_argument(argument: &InputValueDefinition, config: &Configuration) -> Result<bool, Error> {
    let ignored = config.arguments_to_ignore.iter().any(|name| *name == argument.name);
    let considered = config.arguments_to_consider.iter().any(|name| *name == argument.name);
    let mandatory = argument.ty.is_required();

    if mandatory && ignored {
        return Err(Error::IgnoredNonNullableArgument {
            argument: argument.name.clone(),
        });
    }

    if ignored && considered {
        return Err(Error::ConflictingArgumentPolicy {
            argument: argument.name.clone(),
        });
    }

    if mandatory || considered {
        return Ok(true);
    }

    if ignored {
        return Ok(false);
    }

    Ok(!config.ignore_optional_arguments)
}

pub(crate) fn materialize_arguments(
    ctx: &mut GenerationContext<'_>,
    type_name: &str,
    field: &FieldDefinition,
) -> Result<Vec<ast::Argument>, Error> {
    let plan = required_arguments(field, &ctx.config)?;

    if plan.arguments.is_empty() {
        return Ok(Vec::new());
    }

    let bundle = field_bundle(ctx, type_name, &field.name)?;
    let mut arguments = Vec::with_capacity(plan.arguments.len());

    for argument in plan.arguments {
        let variable = format!("{type_name}__{}__{}", field.name, argument.name);
        let slicing_tail = plan
            .slicing_path
            .as_deref()
            .filter(|segments| segments[0] == argument.name)
            .map(|segments| &segments[1..]);

        let value = argument_value(ctx, &variable, argument, bundle.as_ref(), slicing_tail)?;
        ctx.bind_variable(variable.clone(), argument.ty.clone(), value);

        arguments.push(ast::Argument {
            name: argument.name.clone(),
            variable,
        });
    }

    Ok(arguments)
}

/// A `Type__field` provider supplies values for a whole argument list in one
/// shot. Only object-shaped values qualify.
fn field_bundle(
    ctx: &GenerationContext<'_>,
    type_name: &str,
    field_name: &str,
) -> Result<Option<VariableValues>, Error> {
    let key = format!("{type_name}__{field_name}");

    Ok(match ctx.config.provider_map.resolve(&key, &ctx.variable_values, None)? {
        Some(Value::Object(bundle)) => Some(bundle),
        _ => None,
    })
}

fn argument_value(
    ctx: &mut GenerationContext<'_>,
    variable: &str,
    argument: &InputValueDefinition,
    bundle: Option<&VariableValues>,
    slicing_tail: Option<&[String]>,
) -> Result<Value, Error> {
    let schema = ctx.schema;

    // Enum arguments never consult providers: any declared value works.
    if let Some(TypeDefinition::Enum(enum_type)) = schema.get_type(argument.ty.name()) {
        if !enum_type.values.is_empty() {
            let index = ctx.random.pick(enum_type.values.len());
            return Ok(Value::String(enum_type.values[index].clone()));
        }
    }

    // Bundle first, specific key second: the 3-part provider overrides
    // whatever the field bundle said about this argument.
    let mut provided = bundle.and_then(|bundle| bundle.get(&argument.name)).cloned();
    if let Some(specific) = ctx
        .config
        .provider_map
        .resolve(variable, &ctx.variable_values, Some(&argument.ty))?
    {
        provided = Some(specific);
    }

    if let Some(value) = provided {
        return Ok(value);
    }

    if ctx.config.provide_placeholders {
        let mut value = placeholder_value(ctx, &argument.ty)?;

        if let Some(tail) = slicing_tail {
            if !tail.is_empty() {
                if let Some(addition) = slicing_default(ctx, &argument.ty, tail)? {
                    deep_merge(&mut value, addition);
                }
            }
        }

        return Ok(value);
    }

    if argument.ty.is_required() {
        return Err(Error::MissingProvider {
            variable: variable.to_owned(),
            ty: argument.ty.to_string(),
        });
    }

    Ok(Value::Null)
}

fn placeholder_value(ctx: &mut GenerationContext<'_>, ty: &TypeRef) -> Result<Value, Error> {
    let schema = ctx.schema;

    match ty {
        TypeRef::NonNull(inner) => placeholder_value(ctx, inner),
        TypeRef::List(inner) => Ok(Value::Array(vec![placeholder_value(ctx, inner)?])),
        TypeRef::Named(name) => match name.as_str() {
            "Int" => Ok(10.into()),
            "Float" => Ok(10.0.into()),
            "Boolean" => Ok(true.into()),
            "String" | "ID" => Ok("PLACEHOLDER".into()),
            _ => match schema.get_type(name) {
                Some(TypeDefinition::Enum(enum_type)) if !enum_type.values.is_empty() => {
                    let index = ctx.random.pick(enum_type.values.len());
                    Ok(Value::String(enum_type.values[index].clone()))
                }
                Some(TypeDefinition::InputObject(input_object)) => {
                    let mut object = VariableValues::new();

                    for field in &input_object.fields {
                        if consider_argument(field, &ctx.config)? {
                            object.insert(field.name.clone(), placeholder_value(ctx, &field.ty)?);
                        }
                    }

                    Ok(Value::Object(object))
                }
                _ => Ok("PLACEHOLDER".into()),
            },
        },
    }
}

/// A default for the nested field chain a slicing path points at, shaped as
/// nested single-key objects ready to be merged into the synthesized
/// argument.
fn slicing_default(
    ctx: &mut GenerationContext<'_>,
    ty: &TypeRef,
    path: &[String],
) -> Result<Option<Value>, Error> {
    let schema = ctx.schema;
    let mut current_type_name = ty.name();
    let mut leaf_type = None;

    for (position, segment) in path.iter().enumerate() {
        let Some(TypeDefinition::InputObject(input_object)) = schema.get_type(current_type_name) else {
            return Ok(None);
        };
        let Some(field) = input_object.fields.iter().find(|field| field.name == *segment) else {
            return Ok(None);
        };

        if position + 1 == path.len() {
            leaf_type = Some(&field.ty);
        } else {
            current_type_name = field.ty.name();
        }
    }

    let Some(leaf_type) = leaf_type else { return Ok(None) };
    let mut value = placeholder_value(ctx, leaf_type)?;

    for segment in path.iter().rev() {
        let mut object = VariableValues::new();
        object.insert(segment.clone(), value);
        value = Value::Object(object);
    }

    Ok(Some(value))
}

/// Merge `addition` into `target`, descending into objects instead of
/// overwriting siblings.
fn deep_merge(target: &mut Value, addition: Value) {
    match (target, addition) {
        (Value::Object(target), Value::Object(addition)) => {
            for (key, value) in addition {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, addition) => *target = addition,
    }
}
