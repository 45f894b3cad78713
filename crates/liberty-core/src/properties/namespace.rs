use std::sync::LazyLock;

use regex::Regex;

/// Matches a recognised prefix followed by at least one more character.
static LIBERTY_CONFIG_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(liberty\.(env|jvm|bootstrap|var|defaultVar)\.).+").unwrap()
});

/// Configuration namespace a `liberty.*` property belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigNamespace {
    Bootstrap,
    Env,
    Jvm,
    Var,
    DefaultVar,
}

impl ConfigNamespace {
    pub const ALL: [ConfigNamespace; 5] = [
        Self::Bootstrap,
        Self::Env,
        Self::Jvm,
        Self::Var,
        Self::DefaultVar,
    ];

    /// The literal key prefix, including the trailing dot.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Bootstrap => "liberty.bootstrap.",
            Self::Env => "liberty.env.",
            Self::Jvm => "liberty.jvm.",
            Self::Var => "liberty.var.",
            Self::DefaultVar => "liberty.defaultVar.",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.prefix() == prefix)
    }
}

impl std::fmt::Display for ConfigNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bootstrap => "bootstrap",
            Self::Env => "env",
            Self::Jvm => "jvm",
            Self::Var => "var",
            Self::DefaultVar => "defaultVar",
        };
        f.write_str(name)
    }
}

/// A property routed into a namespace, with the prefix stripped from its key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedProperty {
    pub namespace: ConfigNamespace,
    pub key: String,
    pub value: String,
}

/// Classify a raw property. Keys outside the five namespaces yield `None`.
///
/// Matching is case-sensitive: `liberty.defaultvar.x` is not a default
/// variable.
pub fn classify(key: &str, value: &str) -> Option<ClassifiedProperty> {
    let captures = LIBERTY_CONFIG_PROPERTY.captures(key)?;
    let prefix = captures.get(1)?;
    let namespace = ConfigNamespace::from_prefix(prefix.as_str())?;

    Some(ClassifiedProperty {
        namespace,
        key: key[prefix.end()..].to_string(),
        value: value.to_string(),
    })
}
