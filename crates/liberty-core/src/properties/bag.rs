use std::collections::BTreeMap;
use std::ffi::OsString;

use super::namespace::{ClassifiedProperty, ConfigNamespace, classify};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// The two flat property namespaces scanned for `liberty.*` keys.
///
/// `build` holds the build descriptor's properties; `system` holds
/// properties supplied to the running build (system properties or the
/// process environment). `system` is classified second and therefore
/// wins on key collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySources {
    pub build: BTreeMap<String, String>,
    pub system: BTreeMap<String, String>,
}

impl PropertySources {
    pub fn new(build: BTreeMap<String, String>, system: BTreeMap<String, String>) -> Self {
        Self { build, system }
    }

    /// Use the current process environment as the system namespace.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn with_process_env(build: BTreeMap<String, String>) -> Self {
        Self {
            build,
            system: readable_env(std::env::vars_os()),
        }
    }
}

fn readable_env<I>(vars: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Per-namespace accumulator of classified properties.
///
/// Map namespaces keep one value per key and the last classification
/// wins. The JVM namespace is an append-only list of option strings; its
/// keys are only used for classification and never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    pub bootstrap: BTreeMap<String, String>,
    pub env: BTreeMap<String, String>,
    pub jvm: Vec<String>,
    pub var: BTreeMap<String, String>,
    pub default_var: BTreeMap<String, String>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify build properties, then system properties, into a fresh bag.
    pub fn from_sources(sources: &PropertySources, diagnostics: &mut Diagnostics) -> Self {
        let mut bag = Self::new();
        bag.classify_all(&sources.build, diagnostics);
        bag.classify_all(&sources.system, diagnostics);
        bag
    }

    /// Route every matching entry of `properties` into this bag.
    /// Entries outside the `liberty.*` namespaces are skipped silently.
    pub fn classify_all<I, K, V>(&mut self, properties: I, diagnostics: &mut Diagnostics)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in properties {
            let (key, value) = (key.as_ref(), value.as_ref());
            if let Some(property) = classify(key, value) {
                diagnostics.debug(
                    DiagnosticKind::PropertyProcessed,
                    format!(
                        "Processing Liberty configuration from property with key {key} and value {value}"
                    ),
                );
                self.insert(property);
            }
        }
    }

    pub fn insert(&mut self, property: ClassifiedProperty) {
        let ClassifiedProperty {
            namespace,
            key,
            value,
        } = property;
        match namespace {
            ConfigNamespace::Bootstrap => {
                self.bootstrap.insert(key, value);
            }
            ConfigNamespace::Env => {
                self.env.insert(key, value);
            }
            ConfigNamespace::Jvm => self.jvm.push(value),
            ConfigNamespace::Var => {
                self.var.insert(key, value);
            }
            ConfigNamespace::DefaultVar => {
                self.default_var.insert(key, value);
            }
        }
    }

    /// Whether either variable namespace has entries.
    pub fn has_variables(&self) -> bool {
        !self.var.is_empty() || !self.default_var.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.bootstrap.is_empty() && self.env.is_empty() && self.jvm.is_empty() && !self.has_variables()
    }
}
