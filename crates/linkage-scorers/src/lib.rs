#![deny(unsafe_code)]

use std::collections::BTreeMap;

use rapidfuzz::distance::jaro_winkler;

/// A scorer is a pure function over two column values, returning a
/// similarity in `[0, 100]`. Dispatch is over boxed closures held in a
/// name-keyed table, not a trait-object hierarchy (spec §4.B, §9).
pub type Scorer = Box<dyn Fn(&str, &str) -> f64 + Send + Sync>;

pub const EXACT_MATCH: &str = "exact_match";
pub const JARO_WINKLER: &str = "jaro_winkler";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScorerError {
    #[error("scorer not found: {0:?}")]
    NotFound(String),
}

/// `100.0` if the two values are byte-identical, else `0.0`. The one
/// built-in the registry is required to carry (spec §4.B).
pub fn exact_match(x: &str, y: &str) -> f64 {
    if x == y { 100.0 } else { 0.0 }
}

/// Jaro-Winkler similarity rescaled from `[0, 1]` to `[0, 100]`. A second
/// built-in demonstrating that the registry is not limited to exact
/// matching; embedders are free to register their own in its place.
pub fn jaro_winkler_match(x: &str, y: &str) -> f64 {
    jaro_winkler::similarity(x.chars(), y.chars()) * 100.0
}

/// Name → scorer table, plus a settable default scorer name.
///
/// Always contains `exact_match`. Construct with [`ScorerRegistry::new`]
/// to also get `jaro_winkler` pre-registered; use
/// [`ScorerRegistry::minimal`] for just the mandatory scorer.
pub struct ScorerRegistry {
    scorers: BTreeMap<String, Scorer>,
    default: String,
}

impl ScorerRegistry {
    /// A registry containing only the mandatory `exact_match` scorer.
    pub fn minimal() -> Self {
        let mut scorers: BTreeMap<String, Scorer> = BTreeMap::new();
        scorers.insert(EXACT_MATCH.to_string(), Box::new(exact_match));
        Self {
            scorers,
            default: EXACT_MATCH.to_string(),
        }
    }

    /// The mandatory scorer plus the `jaro_winkler` demonstration scorer.
    pub fn new() -> Self {
        let mut registry = Self::minimal();
        registry.register(JARO_WINKLER, Box::new(jaro_winkler_match));
        registry
    }

    /// Registers (or replaces) a scorer under `name`.
    pub fn register(&mut self, name: impl Into<String>, scorer: Scorer) {
        self.scorers.insert(name.into(), scorer);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scorers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scorers.keys().map(String::as_str)
    }

    /// Scores `x` against `y` using the scorer registered under `name`.
    /// Returns `None` if `name` is not registered.
    pub fn score(&self, name: &str, x: &str, y: &str) -> Option<f64> {
        self.scorers.get(name).map(|scorer| scorer(x, y))
    }

    /// Looks up the callable registered under `name`, for callers that want
    /// to hold onto a scorer across many invocations instead of going
    /// through [`ScorerRegistry::score`] by name each time.
    pub fn get(&self, name: &str) -> Option<&Scorer> {
        self.scorers.get(name)
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    /// Changes the default scorer name. Fails if `name` is not registered.
    pub fn set_default(&mut self, name: impl Into<String>) -> Result<(), ScorerError> {
        let name = name.into();
        if !self.scorers.contains_key(&name) {
            return Err(ScorerError::NotFound(name));
        }
        self.default = name;
        Ok(())
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
