//! Random, reproducible query and mutation generation for GraphQL schemas,
//! for producing realistic test corpora without handwriting operations. The
//! intended workflow is the following:
//!
//! - Parse the schema with [Schema::parse()] (or convert an already parsed
//!   `async_graphql_parser` service document with `Schema::from`).
//! - Describe the generation policy with a [Configuration], including a
//!   [ProviderMap] for the variable values the schema's arguments need.
//! - Call [generate_random_query()] or [generate_random_mutation()]; print
//!   the returned document with `to_string()` and send it together with the
//!   returned variable values.
//!
//! Generation is driven by a single seeded random stream: the same schema,
//! configuration and seed always produce the same document and values, and
//! the seed actually used is echoed back so any run can be replayed.
//!
//! ```
//! use graphql_query_generator::{generate_random_query, Configuration, ProviderMap, Schema};
//!
//! let schema = Schema::parse(
//!     r#"
//!     type Query {
//!         orders(first: Int!): [Order]
//!     }
//!
//!     type Order {
//!         id: ID
//!         date: String
//!     }
//!     "#,
//! )
//! .unwrap();
//!
//! let config = Configuration {
//!     provider_map: ProviderMap::default().with("*__*__first", 10),
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let generated = generate_random_query(&schema, config).unwrap();
//!
//! assert!(!generated.document.to_string().is_empty());
//! assert_eq!(generated.seed, 42);
//! ```

mod arguments;
mod ast;
mod config;
mod error;
mod generate;
mod providers;
mod random;
mod schema;

pub use ast::{
    Argument, Document, Field, InlineFragment, OperationDefinition, OperationType, Selection, SelectionSet,
    VariableDefinition,
};
pub use config::{Configuration, Probability};
pub use error::Error;
pub use generate::{generate_random_mutation, generate_random_query, GeneratedOperation};
pub use providers::{match_var_name, Provider, ProviderFn, ProviderMap, VariableValues};
pub use schema::{
    Directive, EnumType, FieldDefinition, InputObjectType, InputValueDefinition, InterfaceType, ObjectType,
    ScalarType, Schema, TypeDefinition, TypeRef, UnionType,
};
