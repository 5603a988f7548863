//! Variable providers: the values bound to the arguments of a generated
//! operation.
//!
//! Providers are registered under 2-or-3-part keys of the shape
//! `TypeName__fieldName` or `TypeName__fieldName__argumentName`, where any
//! part may be the wildcard `*`. A 2-part key supplies a bundle of argument
//! values for a whole field; a 3-part key supplies (and overrides) the value
//! of one specific argument.

use indexmap::IndexMap;
use serde_json::Value;

use crate::{error::Error, schema::TypeRef};

/// Values bound to the variables of a generated operation, keyed by the
/// synthesized variable name, in first-encountered order.
pub type VariableValues = serde_json::Map<String, Value>;

/// The signature of a generator provider: receives the variables bound so
/// far in the current generation call (so it can make cross-argument
/// decisions) and the declared type of the argument being bound.
pub type ProviderFn = dyn Fn(&VariableValues, Option<&TypeRef>) -> Value + Send + Sync;

/// A registered provider: a constant or a generator function.
pub enum Provider {
    /// A constant value, cloned on every resolution. A `null` constant is a
    /// legitimate provider and binds an explicit `null`.
    Value(Value),
    /// A generator function invoked on every resolution.
    Function(Box<ProviderFn>),
}

/// The provider registry.
///
/// Lookup is exact-match first; otherwise the first structurally matching
/// key in *registration order* wins, so more specific keys should be
/// registered before broad wildcards.
#[derive(Default)]
pub struct ProviderMap {
    providers: IndexMap<String, Provider>,
}

impl ProviderMap {
    /// Register a constant provider.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.providers.insert(key.into(), Provider::Value(value.into()));
        self
    }

    /// Register a generator function.
    pub fn with_fn(
        mut self,
        key: impl Into<String>,
        f: impl Fn(&VariableValues, Option<&TypeRef>) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.providers.insert(key.into(), Provider::Function(Box::new(f)));
        self
    }

    /// Whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve a variable name against the registered providers.
    ///
    /// `Ok(None)` is a soft miss, not an error: the argument materializer
    /// decides whether a miss is fatal.
    pub(crate) fn resolve(
        &self,
        var_name: &str,
        bound: &VariableValues,
        argument_type: Option<&TypeRef>,
    ) -> Result<Option<Value>, Error> {
        let Some(key) = match_var_name(var_name, self.providers.keys().map(String::as_str))? else {
            return Ok(None);
        };

        match &self.providers[key] {
            Provider::Value(value) => Ok(Some(value.clone())),
            Provider::Function(f) => Ok(Some(f(bound, argument_type))),
        }
    }
}

/// Find the candidate key matching a variable name.
///
/// An exact match always wins. Otherwise a candidate matches when it has the
/// same number of parts and every part pair is equal or a wildcard on either
/// side; the first such candidate wins. Malformed keys (not 2 or 3
/// `__`-separated parts) on either side are a configuration error.
pub fn match_var_name<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Result<Option<&'a str>, Error> {
    let query_parts = key_parts(query)?;
    let mut structural = None;

    for candidate in candidates {
        if candidate == query {
            return Ok(Some(candidate));
        }

        let candidate_parts = key_parts(candidate)?;
        let matches = candidate_parts.len() == query_parts.len()
            && query_parts
                .iter()
                .zip(&candidate_parts)
                .all(|(query_part, candidate_part)| parts_match(query_part, candidate_part));

        if matches && structural.is_none() {
            structural = Some(candidate);
        }
    }

    Ok(structural)
}

fn key_parts(key: &str) -> Result<Vec<&str>, Error> {
    let parts: Vec<&str> = key.split("__").collect();

    if matches!(parts.len(), 2 | 3) {
        Ok(parts)
    } else {
        Err(Error::MalformedProviderKey { key: key.to_owned() })
    }
}

fn parts_match(a: &str, b: &str) -> bool {
    a == b || a == "*" || b == "*"
}
