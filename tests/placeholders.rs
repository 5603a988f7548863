//! Placeholder synthesis: default values for required arguments no provider
//! covers.

use graphql_query_generator::{generate_random_query, Configuration, Error, Schema};

fn deterministic_config() -> Configuration {
    Configuration {
        depth_probability: 1.0.into(),
        breadth_probability: 1.0.into(),
        provide_placeholders: true,
        seed: Some(1),
        ..Default::default()
    }
}

#[test]
fn every_scalar_kind_has_a_placeholder() {
    let schema = Schema::parse(
        r#"
        scalar Custom

        type Query {
            field(user: String!, active: Boolean!, age: Int, worth: Float, id: ID, custom: Custom): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        ignore_optional_arguments: false,
        ..deterministic_config()
    };

    let generated = generate_random_query(&schema, config).unwrap();

    expect_test::expect![[r#"
        query RandomQuery($Query__field__user: String!, $Query__field__active: Boolean!, $Query__field__age: Int, $Query__field__worth: Float, $Query__field__id: ID, $Query__field__custom: Custom) {
          field(user: $Query__field__user, active: $Query__field__active, age: $Query__field__age, worth: $Query__field__worth, id: $Query__field__id, custom: $Query__field__custom)
        }"#]]
    .assert_eq(&generated.document.to_string());
    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({
            "Query__field__user": "PLACEHOLDER",
            "Query__field__active": true,
            "Query__field__age": 10,
            "Query__field__worth": 10.0,
            "Query__field__id": "PLACEHOLDER",
            "Query__field__custom": "PLACEHOLDER",
        })
    );
}

#[test]
fn list_arguments_get_a_single_element_list() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(ids: [ID!]!): String
        }
        "#,
    )
    .unwrap();

    let generated = generate_random_query(&schema, deterministic_config()).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({ "Query__field__ids": ["PLACEHOLDER"] })
    );
}

#[test]
fn enum_arguments_pick_a_declared_value() {
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

    let generated = generate_random_query(&schema, deterministic_config()).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({ "Query__field__fruit": "MANGO" })
    );
}

#[test]
fn enum_input_object_fields_pick_a_declared_value() {
    let schema = Schema::parse(
        r#"
        enum Direction {
            ASCENDING
        }

        input OrderBy {
            direction: Direction!
            nulls: Int
        }

        type Query {
            field(orderBy: OrderBy!): String
        }
        "#,
    )
    .unwrap();

    let generated = generate_random_query(&schema, deterministic_config()).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({ "Query__field__orderBy": { "direction": "ASCENDING" } })
    );
}

#[test]
fn nullable_arguments_fall_back_to_null_without_placeholders() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(age: Int): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        ignore_optional_arguments: false,
        provide_placeholders: false,
        ..deterministic_config()
    };

    let generated = generate_random_query(&schema, config).unwrap();

    assert_eq!(
        serde_json::Value::Object(generated.variable_values),
        serde_json::json!({ "Query__field__age": null })
    );
}

#[test]
fn missing_provider_for_a_required_argument_is_fatal() {
    let schema = Schema::parse(
        r#"
        type Query {
            field(user: String!): String
        }
        "#,
    )
    .unwrap();
    let config = Configuration {
        provide_placeholders: false,
        ..deterministic_config()
    };

    let error = generate_random_query(&schema, config).unwrap_err();

    assert!(matches!(
        &error,
        Error::MissingProvider { variable, ty } if variable == "Query__field__user" && ty == "String!"
    ));
    let message = error.to_string();
    assert!(message.contains("Query__field__user"));
    assert!(message.contains("String!"));
}
