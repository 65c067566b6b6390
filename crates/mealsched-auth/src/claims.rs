//! Claim sets carried inside bearer tokens.
//!
//! # Design
//! - Claim names are case-sensitive and map to one or more string values.
//! - Multi-valued claims (roles) keep insertion order so encode/decode is stable.
//! - Values are plain strings; loosely typed JSON is resolved at the decode boundary.

use std::collections::BTreeMap;

/// Claim carrying the authenticated subject's display name.
pub const NAME_CLAIM: &str = "name";
/// Reserved claim that may carry a single role or a list of roles.
pub const ROLE_CLAIM: &str = "role";
/// Registered claim names owned by the token codec rather than the application.
pub const REGISTERED_CLAIMS: &[&str] = &["exp", "iss", "aud", "iat", "nbf", "jti"];

/// Set of named claims asserted about a subject.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimSet {
    entries: BTreeMap<String, Vec<String>>,
}

impl ClaimSet {
    /// Construct an empty claim set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Append a value for `name`, keeping any existing values.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Builder-style variant of [`ClaimSet::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// First value recorded for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// All values recorded for `name`, in insertion order.
    #[must_use]
    pub fn values(&self, name: &str) -> &[String] {
        self.entries
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Subject name, when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.first(NAME_CLAIM)
    }

    /// Role claims, in insertion order.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.values(ROLE_CLAIM)
    }

    /// Whether the subject holds `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles().iter().any(|candidate| candidate == role)
    }

    /// Whether at least one value exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether the set holds no claims at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of individual claims (multi-valued claims count once per value).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterate over every `(name, value)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(name, values)| {
            values
                .iter()
                .map(move |value| (name.as_str(), value.as_str()))
        })
    }

    /// Copy of this set without the codec-owned registered claims.
    #[must_use]
    pub fn without_registered(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(name, _)| !REGISTERED_CLAIMS.contains(&name.as_str()))
                .map(|(name, values)| (name.clone(), values.clone()))
                .collect(),
        }
    }

    #[cfg(feature = "signing")]
    pub(crate) fn grouped(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ClaimSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
