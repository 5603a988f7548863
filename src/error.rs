use crate::ast::OperationType;

/// All the ways a generation call can fail. Fatal errors abort the whole
/// call: there is no partial document and no retry inside the generator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider map key is not composed of two or three `__`-separated
    /// parts.
    #[error("invalid provider key \"{key}\": expected two or three parts separated by \"__\"")]
    MalformedProviderKey {
        /// The offending key.
        key: String,
    },
    /// An argument appears in both `arguments_to_consider` and
    /// `arguments_to_ignore`.
    #[error("cannot both ignore and consider argument \"{argument}\"")]
    ConflictingArgumentPolicy {
        /// The offending argument name.
        argument: String,
    },
    /// A non-null argument appears in `arguments_to_ignore`.
    #[error("cannot ignore non-null argument \"{argument}\"")]
    IgnoredNonNullableArgument {
        /// The offending argument name.
        argument: String,
    },
    /// An inline fragment would have to be spread on something that is not
    /// an object type.
    #[error("cannot spread an inline fragment on \"{type_name}\": not an object type")]
    InvalidFragmentTarget {
        /// The type condition that was rejected.
        type_name: String,
    },
    /// The schema does not define a root type for the requested operation.
    #[error("schema does not define a {operation_type} root type")]
    MissingRootType {
        /// The operation that was requested.
        operation_type: OperationType,
    },
    /// No field could be selected at the root level.
    #[error("could not create {operation_type}: no selection was possible at the root level")]
    EmptyRootSelection {
        /// The operation that was requested.
        operation_type: OperationType,
    },
    /// A non-null argument has no provider and placeholder synthesis is
    /// disabled.
    #[error(
        "missing provider for non-null variable \"{variable}\" of type \"{ty}\": \
         add a provider (wildcards such as \"*__*\" or \"*__*__*\" are accepted), \
         or enable the provide_placeholders configuration option"
    )]
    MissingProvider {
        /// The synthesized variable name that could not be bound.
        variable: String,
        /// The declared type of the argument.
        ty: String,
    },
    /// The schema text could not be parsed.
    #[error("invalid schema: {0}")]
    SchemaParse(#[from] async_graphql_parser::Error),
}
