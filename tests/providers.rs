//! Provider resolution during generation: bundles, precedence, functions and
//! the configuration error paths.

use graphql_query_generator::{generate_random_query, Configuration, Error, ProviderMap, Schema};

fn repository_schema() -> Schema {
    Schema::parse(
        r#"
        type Query {
            name: String
            repository(name: String!, owner: String!): String
        }
        "#,
    )
    .unwrap()
}

fn deterministic_config() -> Configuration {
    Configuration {
        depth_probability: 1.0.into(),
        breadth_probability: 1.0.into(),
        seed: Some(1),
        ..Default::default()
    }
}

#[test]
fn field_bundles_supply_whole_argument_lists() {
    let config = Configuration {
        provider_map: ProviderMap::default().with(
            "Query__repository",
            serde_json::json!({ "name": "grafbase", "owner": "grafbase-org" }),
        ),
        ..deterministic_config()
    };

    let generated = generate_random_query(&repository_schema(), config).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({
            "Query__repository__name": "grafbase",
            "Query__repository__owner": "grafbase-org",
        })
    );
}

#[test]
fn specific_providers_override_the_bundle() {
    let config = Configuration {
        provider_map: ProviderMap::default()
            .with(
                "Query__repository",
                serde_json::json!({ "name": "grafbase", "owner": "grafbase-org" }),
            )
            .with("Query__repository__owner", "someone-else"),
        ..deterministic_config()
    };

    let generated = generate_random_query(&repository_schema(), config).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({
            "Query__repository__name": "grafbase",
            "Query__repository__owner": "someone-else",
        })
    );
}

#[test]
fn provider_functions_observe_earlier_bindings() {
    let config = Configuration {
        provider_map: ProviderMap::default()
            .with_fn("*__*__name", |bound, _| {
                if bound.contains_key("Query__repository__owner") {
                    "second".into()
                } else {
                    "first".into()
                }
            })
            .with_fn("*__*__owner", |bound, _| {
                if bound.contains_key("Query__repository__name") {
                    "second".into()
                } else {
                    "first".into()
                }
            }),
        ..deterministic_config()
    };

    let generated = generate_random_query(&repository_schema(), config).unwrap();

    // Arguments materialize in declaration order: `name` binds before
    // `owner`, so only `owner` sees an earlier binding.
    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({
            "Query__repository__name": "first",
            "Query__repository__owner": "second",
        })
    );
}

#[test]
fn provider_functions_receive_the_argument_type() {
    let schema = Schema::parse(
        r#"
        type Query {
            search(query: String!, limit: Int!): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        provider_map: ProviderMap::default().with_fn("*__*__*", |_, argument_type| {
            match argument_type.map(|ty| ty.name()) {
                Some("Int") => 1.into(),
                Some("String") => "test".into(),
                _ => serde_json::Value::Null,
            }
        }),
        ..deterministic_config()
    };

    let generated = generate_random_query(&schema, config).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({
            "Query__search__query": "test",
            "Query__search__limit": 1,
        })
    );
}

#[test]
fn null_providers_are_allowed() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(user: String!): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        provider_map: ProviderMap::default().with("*__*__*", serde_json::Value::Null),
        ..deterministic_config()
    };

    let generated = generate_random_query(&schema, config).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({ "Query__field__user": null })
    );
}

#[test]
fn enum_arguments_ignore_providers() {
    let schema = Schema::parse(
        r#"
        enum Fruit {
            MANGO
        }

        type Query {
            field(fruit: Fruit!): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        provider_map: ProviderMap::default().with("*__*__fruit", "BANANA"),
        ..deterministic_config()
    };

    let generated = generate_random_query(&schema, config).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({ "Query__field__fruit": "MANGO" })
    );
}

#[test]
fn malformed_provider_keys_are_a_configuration_error() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(user: String!): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        provider_map: ProviderMap::default().with("Query__field__user__extra", "value"),
        ..deterministic_config()
    };

    let error = generate_random_query(&schema, config).unwrap_err();

    assert!(matches!(
        error,
        Error::MalformedProviderKey { key } if key == "Query__field__user__extra"
    ));
}

#[test]
fn an_argument_cannot_be_both_considered_and_ignored() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(first: Int): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        arguments_to_consider: vec!["first".to_owned()],
        arguments_to_ignore: vec!["first".to_owned()],
        ..deterministic_config()
    };

    let error = generate_random_query(&schema, config).unwrap_err();

    assert!(matches!(error, Error::ConflictingArgumentPolicy { argument } if argument == "first"));
}

#[test]
fn a_non_null_argument_cannot_be_ignored() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(user: String!): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        arguments_to_ignore: vec!["user".to_owned()],
        ..deterministic_config()
    };

    let error = generate_random_query(&schema, config).unwrap_err();

    assert!(matches!(error, Error::IgnoredNonNullableArgument { argument } if argument == "user"));
}

#[test]
fn considered_arguments_are_included_even_when_optional() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(first: Int, other: Int): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        arguments_to_consider: vec!["first".to_owned()],
        provide_placeholders: true,
        ..deterministic_config()
    };

    let generated = generate_random_query(&schema, config).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({ "Query__field__first": 10 })
    );
}
