use std::fmt;

use crate::providers::ProviderMap;

/// The generation policy for one call.
///
/// The generator never mutates the configuration; counters and random state
/// live in an internal context created per call, so one configuration value
/// describes one call and concurrent calls must each receive their own.
pub struct Configuration {
    /// Probability of descending into a nested field at each level.
    pub depth_probability: Probability,
    /// Probability of including each individual candidate field.
    pub breadth_probability: Probability,
    /// Nesting level at which recursion stops.
    pub max_depth: usize,
    /// Skip nullable arguments that are neither slicing arguments nor listed
    /// in [arguments_to_consider](Configuration::arguments_to_consider).
    pub ignore_optional_arguments: bool,
    /// Argument names to always exclude. Ignoring a non-null argument is a
    /// configuration error.
    pub arguments_to_ignore: Vec<String>,
    /// Argument names to always include.
    pub arguments_to_consider: Vec<String>,
    /// Providers for variable values, consulted per required argument.
    pub provider_map: ProviderMap,
    /// Expand fields returning interface types into inline fragments.
    pub consider_interfaces: bool,
    /// Expand fields returning union types into inline fragments.
    pub consider_unions: bool,
    /// Seed for the random stream. When absent, one is drawn and echoed back
    /// in the result for replay.
    pub seed: Option<u64>,
    /// Force the root level to include at least one nested field.
    pub pick_nested_query_field: bool,
    /// Synthesize placeholder values for required arguments no provider
    /// covers, instead of failing.
    pub provide_placeholders: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            depth_probability: Probability::Constant(0.5),
            breadth_probability: Probability::Constant(0.5),
            max_depth: 5,
            ignore_optional_arguments: true,
            arguments_to_ignore: Vec::new(),
            arguments_to_consider: Vec::new(),
            provider_map: ProviderMap::default(),
            consider_interfaces: false,
            consider_unions: false,
            seed: None,
            pick_nested_query_field: false,
            provide_placeholders: false,
        }
    }
}

/// A probability that is either fixed or a function of the current nesting
/// depth.
pub enum Probability {
    /// The same probability at every depth.
    Constant(f64),
    /// Evaluated against the current depth, e.g. to thin out deep levels.
    PerDepth(Box<dyn Fn(usize) -> f64 + Send + Sync>),
}

impl Probability {
    /// Create a depth-dependent probability.
    pub fn per_depth(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Probability::PerDepth(Box::new(f))
    }

    pub(crate) fn at(&self, depth: usize) -> f64 {
        match self {
            Probability::Constant(probability) => *probability,
            Probability::PerDepth(f) => f(depth),
        }
    }
}

impl From<f64> for Probability {
    fn from(probability: f64) -> Self {
        Probability::Constant(probability)
    }
}

impl fmt::Debug for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probability::Constant(probability) => f.debug_tuple("Constant").field(probability).finish(),
            Probability::PerDepth(_) => f.debug_tuple("PerDepth").field(&"..").finish(),
        }
    }
}
