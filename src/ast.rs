//! The AST of generated documents.
//!
//! Nodes are tagged variants so downstream printers and validators can match
//! exhaustively. Every node also implements [Display](std::fmt::Display),
//! rendering the canonical textual syntax, so `document.to_string()` is
//! ready to be sent to any GraphQL endpoint or validator.

use std::fmt::{self, Display, Write};

use crate::schema::TypeRef;

/// The two kinds of operations the generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// A read.
    Query,
    /// A write.
    Mutation,
}

impl Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Query => f.write_str("query"),
            OperationType::Mutation => f.write_str("mutation"),
        }
    }
}

/// A generated document. Holds exactly one operation per generation call.
#[derive(Debug)]
pub struct Document {
    /// The operations of the document.
    pub operations: Vec<OperationDefinition>,
}

/// One query or mutation operation.
#[derive(Debug)]
pub struct OperationDefinition {
    /// Query or mutation.
    pub operation_type: OperationType,
    /// The operation name, `RandomQuery` or `RandomMutation`.
    pub name: String,
    /// Variable definitions, in first-encountered order.
    pub variable_definitions: Vec<VariableDefinition>,
    /// The root selection set. Never empty on successful generation.
    pub selection_set: SelectionSet,
}

/// A variable declared by an operation.
#[derive(Debug)]
pub struct VariableDefinition {
    /// The synthesized `Type__field__argument` variable name, without the `$`.
    pub name: String,
    /// The declared type, taken from the schema's argument type.
    pub ty: TypeRef,
}

/// The selections requested at one level of the document.
#[derive(Debug, Default)]
pub struct SelectionSet {
    /// Fields and inline fragments, in emission order.
    pub selections: Vec<Selection>,
}

/// A single entry of a selection set.
#[derive(Debug)]
pub enum Selection {
    /// A field selection.
    Field(Field),
    /// A type-conditioned inline fragment.
    InlineFragment(InlineFragment),
}

/// A field selection.
#[derive(Debug)]
pub struct Field {
    /// Alias, only present when a sibling already claimed the field name.
    pub alias: Option<String>,
    /// Field name.
    pub name: String,
    /// Arguments, each bound to a variable.
    pub arguments: Vec<Argument>,
    /// Subselection for composite return types.
    pub selection_set: Option<SelectionSet>,
}

/// An argument of a field selection. Generated arguments always reference a
/// variable, never an inline value.
#[derive(Debug)]
pub struct Argument {
    /// Argument name.
    pub name: String,
    /// The referenced variable name, without the `$`.
    pub variable: String,
}

/// An inline fragment produced by interface or union expansion.
#[derive(Debug)]
pub struct InlineFragment {
    /// The concrete object type the fragment is conditioned on.
    pub type_condition: String,
    /// The fragment's selections.
    pub selection_set: SelectionSet,
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operations = self.operations.iter().peekable();

        while let Some(operation) = operations.next() {
            operation.fmt(f)?;
            if operations.peek().is_some() {
                f.write_str("\n\n")?;
            }
        }

        Ok(())
    }
}

impl Display for OperationDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation_type, self.name)?;

        if !self.variable_definitions.is_empty() {
            f.write_char('(')?;

            let mut variables = self.variable_definitions.iter().peekable();
            while let Some(variable) = variables.next() {
                write!(f, "${}: {}", variable.name, variable.ty)?;
                if variables.peek().is_some() {
                    f.write_str(", ")?;
                }
            }

            f.write_char(')')?;
        }

        f.write_char(' ')?;
        write_selection_set(f, &self.selection_set, 1)
    }
}

fn write_selection_set(f: &mut fmt::Formatter<'_>, selection_set: &SelectionSet, indent: usize) -> fmt::Result {
    f.write_str("{\n")?;

    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => write_field(f, field, indent)?,
            Selection::InlineFragment(fragment) => {
                write_indent(f, indent)?;
                write!(f, "... on {} ", fragment.type_condition)?;
                write_selection_set(f, &fragment.selection_set, indent + 1)?;
                f.write_char('\n')?;
            }
        }
    }

    write_indent(f, indent - 1)?;
    f.write_char('}')
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &Field, indent: usize) -> fmt::Result {
    write_indent(f, indent)?;

    if let Some(alias) = &field.alias {
        write!(f, "{alias}: ")?;
    }

    f.write_str(&field.name)?;

    if !field.arguments.is_empty() {
        f.write_char('(')?;

        let mut arguments = field.arguments.iter().peekable();
        while let Some(argument) = arguments.next() {
            write!(f, "{}: ${}", argument.name, argument.variable)?;
            if arguments.peek().is_some() {
                f.write_str(", ")?;
            }
        }

        f.write_char(')')?;
    }

    if let Some(selection_set) = &field.selection_set {
        f.write_char(' ')?;
        write_selection_set(f, selection_set, indent + 1)?;
    }

    f.write_char('\n')
}

fn write_indent(f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        f.write_str("  ")?;
    }
    Ok(())
}
