//! The selection-set builder and the public entry points.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    arguments::materialize_arguments,
    ast::{
        Document, Field, InlineFragment, OperationDefinition, OperationType, Selection, SelectionSet,
        VariableDefinition,
    },
    config::Configuration,
    error::Error,
    providers::VariableValues,
    random::RandomStream,
    schema::{FieldDefinition, Schema, TypeDefinition, TypeRef},
};

/// The result of one generation call.
#[derive(Debug)]
pub struct GeneratedOperation {
    /// The generated document. `document.to_string()` renders the canonical
    /// textual syntax.
    pub document: Document,
    /// One value per variable definition of the operation, in
    /// first-encountered order.
    pub variable_values: VariableValues,
    /// The seed that drove the random stream. Passing it back through
    /// [Configuration::seed](crate::Configuration::seed) replays the exact
    /// document.
    pub seed: u64,
    /// Number of type expansions visited.
    pub type_count: u64,
    /// Number of field selections emitted.
    pub resolve_count: u64,
}

/// Generate a random query against the schema's root query type.
pub fn generate_random_query(schema: &Schema, config: Configuration) -> Result<GeneratedOperation, Error> {
    generate(schema, config, OperationType::Query)
}

/// Generate a random mutation against the schema's root mutation type.
pub fn generate_random_mutation(schema: &Schema, config: Configuration) -> Result<GeneratedOperation, Error> {
    generate(schema, config, OperationType::Mutation)
}

fn generate(
    schema: &Schema,
    config: Configuration,
    operation_type: OperationType,
) -> Result<GeneratedOperation, Error> {
    let seed = match config.seed {
        Some(seed) => seed,
        None => rand::random(),
    };

    let root_name = match operation_type {
        OperationType::Query => schema.query_root_name(),
        OperationType::Mutation => schema.mutation_root_name(),
    };
    let root = match schema.get_type(root_name) {
        Some(root @ TypeDefinition::Object(_)) => root,
        _ => return Err(Error::MissingRootType { operation_type }),
    };

    tracing::debug!(seed, operation = %operation_type, "generating random operation");

    let mut ctx = GenerationContext {
        schema,
        config,
        random: RandomStream::new(seed),
        variable_definitions: IndexMap::new(),
        variable_values: VariableValues::new(),
        type_count: 0,
        resolve_count: 0,
    };

    let selection_set = ctx.selection_set_for(root, 0)?.unwrap_or_default();

    if selection_set.selections.is_empty() {
        return Err(Error::EmptyRootSelection { operation_type });
    }

    let GenerationContext {
        variable_definitions,
        variable_values,
        type_count,
        resolve_count,
        ..
    } = ctx;

    tracing::debug!(type_count, resolve_count, "random operation generated");

    let name = match operation_type {
        OperationType::Query => "RandomQuery",
        OperationType::Mutation => "RandomMutation",
    };

    let operation = OperationDefinition {
        operation_type,
        name: name.to_owned(),
        variable_definitions: variable_definitions
            .into_iter()
            .map(|(name, ty)| VariableDefinition { name, ty })
            .collect(),
        selection_set,
    };

    Ok(GeneratedOperation {
        document: Document {
            operations: vec![operation],
        },
        variable_values,
        seed,
        type_count,
        resolve_count,
    })
}

/// The mutable state of one generation call, threaded down the recursion.
/// Never shared between calls.
pub(crate) struct GenerationContext<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) config: Configuration,
    pub(crate) random: RandomStream,
    pub(crate) variable_definitions: IndexMap<String, TypeRef>,
    pub(crate) variable_values: VariableValues,
    pub(crate) type_count: u64,
    pub(crate) resolve_count: u64,
}

impl<'a> GenerationContext<'a> {
    /// Record one variable. Re-binding an existing name keeps its original
    /// position and overwrites the value, so definition order stays
    /// first-encountered and the definition and value key sets always agree.
    pub(crate) fn bind_variable(&mut self, name: String, ty: TypeRef, value: serde_json::Value) {
        self.variable_definitions.insert(name.clone(), ty);
        self.variable_values.insert(name, value);
    }

    /// Build the selection set for a composite type at the given depth.
    /// Returns `None` once the maximum depth is reached.
    fn selection_set_for(&mut self, definition: &'a TypeDefinition, depth: usize) -> Result<Option<SelectionSet>, Error> {
        if depth >= self.config.max_depth {
            return Ok(None);
        }

        self.type_count += 1;

        let mut selections = Vec::new();

        match definition {
            TypeDefinition::Object(object) => {
                self.select_fields(&object.name, &object.fields, depth, &mut selections)?;
            }
            TypeDefinition::Interface(interface) => {
                self.select_fields(&interface.name, &interface.fields, depth, &mut selections)?;

                let implementers = self.schema.implementers_of(&interface.name);
                self.expand_concrete_types(&implementers, depth, &mut selections)?;
            }
            TypeDefinition::Union(r#union) => {
                let members: Vec<&str> = r#union.members.iter().map(String::as_str).collect();
                self.expand_concrete_types(&members, depth, &mut selections)?;
            }
            _ => return Ok(None),
        }

        // Below the root, an empty selection set would render invalid
        // syntax; the introspection leaf is always available instead. At the
        // root, emptiness bubbles up as the documented fatal error.
        if selections.is_empty() && depth > 0 {
            selections.push(Selection::Field(typename_field()));
        }

        assign_aliases(&mut selections);

        Ok(Some(SelectionSet { selections }))
    }

    fn select_fields(
        &mut self,
        type_name: &str,
        fields: &'a [FieldDefinition],
        depth: usize,
        selections: &mut Vec<Selection>,
    ) -> Result<(), Error> {
        let schema = self.schema;
        let mut nested: Vec<&FieldDefinition> = Vec::new();
        let mut flat: Vec<&FieldDefinition> = Vec::new();

        for field in fields {
            match schema.get_type(field.ty.name()) {
                Some(TypeDefinition::Object(_)) => nested.push(field),
                Some(TypeDefinition::Interface(_)) if self.config.consider_interfaces => nested.push(field),
                Some(TypeDefinition::Union(_)) if self.config.consider_unions => nested.push(field),
                // Excluded by policy: selecting these bare would be invalid.
                Some(TypeDefinition::Interface(_) | TypeDefinition::Union(_) | TypeDefinition::InputObject(_)) => (),
                // Enums, declared scalars and built-in scalars.
                _ => flat.push(field),
            }
        }

        // One level before the last, a nested field whose target offers no
        // leaf of its own can only dead-end. Drop it from the pool.
        if depth + 2 == self.config.max_depth {
            nested.retain(|field| self.type_has_leaf(field.ty.name()));
        }

        let next_is_terminal = depth + 1 == self.config.max_depth;
        let breadth = self.config.breadth_probability.at(depth);

        let pick_nested = if depth == 0 && self.config.pick_nested_query_field {
            true
        } else {
            let probability = self.config.depth_probability.at(depth);
            self.random.chance(probability)
        };

        let mut picked: Vec<&FieldDefinition> = Vec::new();

        if pick_nested && !nested.is_empty() && !next_is_terminal {
            let index = self.random.pick(nested.len());
            picked.push(nested[index]);

            for (position, field) in nested.iter().copied().enumerate() {
                if position != index && self.random.chance(breadth) {
                    picked.push(field);
                }
            }
        }

        for field in flat.iter().copied() {
            if self.random.chance(breadth) {
                picked.push(field);
            }
        }

        // Ensure at least one field gets selected.
        if picked.is_empty() {
            let pool: Vec<&FieldDefinition> = if next_is_terminal {
                flat.clone()
            } else {
                nested.iter().chain(flat.iter()).copied().collect()
            };

            if pool.is_empty() {
                // A type offering only nested fields at the last level can
                // still select the introspection leaf. A type offering
                // nothing at all yields an empty selection, which is fatal
                // at the root.
                if !nested.is_empty() {
                    selections.push(Selection::Field(typename_field()));
                }
                return Ok(());
            }

            let index = self.random.pick(pool.len());
            picked.push(pool[index]);
        }

        for field in picked {
            self.resolve_count += 1;

            let selection_set = match schema.get_type(field.ty.name()) {
                Some(
                    target @ (TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_)),
                ) => self.selection_set_for(target, depth + 1)?,
                _ => None,
            };

            let arguments = materialize_arguments(self, type_name, field)?;

            selections.push(Selection::Field(Field {
                alias: None,
                name: field.name.clone(),
                arguments,
                selection_set,
            }));
        }

        Ok(())
    }

    /// Expand an interface's implementers or a union's members into inline
    /// fragments, one breadth draw per candidate, forcing one random
    /// candidate when none survives.
    fn expand_concrete_types(
        &mut self,
        candidates: &[&'a str],
        depth: usize,
        selections: &mut Vec<Selection>,
    ) -> Result<(), Error> {
        if candidates.is_empty() {
            return Ok(());
        }

        let breadth = self.config.breadth_probability.at(depth);
        let mut surviving: Vec<&str> = Vec::new();

        for name in candidates.iter().copied() {
            if self.random.chance(breadth) {
                surviving.push(name);
            }
        }

        if surviving.is_empty() {
            let index = self.random.pick(candidates.len());
            surviving.push(candidates[index]);
        }

        let schema = self.schema;

        for name in surviving {
            let definition = match schema.get_type(name) {
                Some(definition @ TypeDefinition::Object(_)) => definition,
                _ => {
                    return Err(Error::InvalidFragmentTarget {
                        type_name: name.to_owned(),
                    })
                }
            };

            // An inline fragment selects on the same response level, so the
            // concrete type is expanded at the current depth.
            if let Some(selection_set) = self.selection_set_for(definition, depth)? {
                selections.push(Selection::InlineFragment(InlineFragment {
                    type_condition: name.to_owned(),
                    selection_set,
                }));
            }
        }

        Ok(())
    }

    /// Whether the type offers a directly selectable leaf field, descending
    /// through union members.
    fn type_has_leaf(&self, type_name: &str) -> bool {
        match self.schema.get_type(type_name) {
            Some(TypeDefinition::Object(object)) => object.fields.iter().any(|field| self.is_leaf_field(field)),
            Some(TypeDefinition::Interface(interface)) => {
                interface.fields.iter().any(|field| self.is_leaf_field(field))
            }
            Some(TypeDefinition::Union(r#union)) => r#union.members.iter().any(|member| self.type_has_leaf(member)),
            _ => false,
        }
    }

    fn is_leaf_field(&self, field: &FieldDefinition) -> bool {
        matches!(
            self.schema.get_type(field.ty.name()),
            None | Some(TypeDefinition::Scalar(_) | TypeDefinition::Enum(_))
        )
    }
}

fn typename_field() -> Field {
    Field {
        alias: None,
        name: "__typename".to_owned(),
        arguments: Vec::new(),
        selection_set: None,
    }
}

/// Alias colliding field names within one selection set. The namespace is
/// flat across top-level fields and the immediate children of inline
/// fragments; the first occurrence keeps its bare name, duplicates get
/// `name2`, `name3`, ...
fn assign_aliases(selections: &mut [Selection]) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    let mut visit = |field: &mut Field| {
        let count = seen.entry(field.name.clone()).or_insert(0);
        *count += 1;
        let count = *count;

        if count > 1 {
            field.alias = Some(format!("{}{count}", field.name));
        }
    };

    for selection in selections.iter_mut() {
        match selection {
            Selection::Field(field) => visit(field),
            Selection::InlineFragment(fragment) => {
                for nested in fragment.selection_set.selections.iter_mut() {
                    if let Selection::Field(field) = nested {
                        visit(field);
                    }
                }
            }
        }
    }
}
