use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdError;

/// Namespace used when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "hookforge";

/// A namespaced identifier such as `hookforge:stat_boost`.
///
/// Used for materials, fluids, items, modifiers, module types, and hooks.
/// Serializes as its `namespace:path` string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    /// Build an identifier from its two halves, validating both.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, IdError> {
        let namespace = namespace.into();
        let path = path.into();
        if namespace.is_empty() || !namespace.chars().all(valid_namespace_char) {
            return Err(IdError::InvalidNamespace(format!("{namespace}:{path}")));
        }
        if path.is_empty() || !path.chars().all(valid_path_char) {
            return Err(IdError::InvalidPath(format!("{namespace}:{path}")));
        }
        Ok(Self { namespace, path })
    }

    /// Parse `namespace:path`, or a bare `path` in the default namespace.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }

    /// An id in the default namespace for a built-in path.
    ///
    /// The path is checked in debug builds only.
    pub fn builtin(path: &'static str) -> Self {
        debug_assert!(!path.is_empty() && path.chars().all(valid_path_char));
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// The namespace half.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path half.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_namespace() {
        let id = ResourceId::parse("minecraft:water").unwrap();
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "water");
        assert_eq!(id.to_string(), "minecraft:water");
    }

    #[test]
    fn bare_path_uses_default_namespace() {
        let id: ResourceId = "wood".parse().unwrap();
        assert_eq!(id.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(id.to_string(), "hookforge:wood");
    }

    #[test]
    fn builtin_matches_parse() {
        assert_eq!(ResourceId::builtin("empty"), ResourceId::parse("empty").unwrap());
    }

    #[test]
    fn nested_paths_allowed() {
        let id = ResourceId::parse("hookforge:shards/iron").unwrap();
        assert_eq!(id.path(), "shards/iron");
    }

    #[test]
    fn rejects_bad_characters() {
        assert!(matches!(
            ResourceId::parse("Bad:thing"),
            Err(IdError::InvalidNamespace(_))
        ));
        assert!(matches!(
            ResourceId::parse("ok:Thing"),
            Err(IdError::InvalidPath(_))
        ));
        assert!(ResourceId::parse("a/b:c").is_err());
        assert!(ResourceId::parse("ns:").is_err());
        assert!(ResourceId::parse("").is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let id = ResourceId::parse("hookforge:lava").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"hookforge:lava\"");
        let back: ResourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ResourceId>("\"NOPE\"").is_err());
    }
}
