use super::joins::referenced_aliases;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Prefixes that turn a filter key into a lower bound
pub const LOWER_BOUND_PREFIXES: [&str; 2] = ["min", "start"];
/// Prefixes that turn a filter key into an upper bound
pub const UPPER_BOUND_PREFIXES: [&str; 2] = ["max", "end"];

/// Ordered lookup from logical filter key to qualified column (`"price" -> "t.price"`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated key replaces the earlier column
    pub fn with(mut self, key: &str, column: &str) -> Self {
        self.insert(key, column);
        self
    }

    pub fn insert(&mut self, key: &str, column: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = column.to_string(),
            None => self.entries.push((key.to_string(), column.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, C: AsRef<str>> FromIterator<(K, C)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut mapping = ColumnMapping::new();
        for (key, column) in iter {
            mapping.insert(key.as_ref(), column.as_ref());
        }
        mapping
    }
}

impl Serialize for ColumnMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, column) in &self.entries {
            map.serialize_entry(key, column)?;
        }
        map.end()
    }
}

/// Deserializes from a map, keeping document order
impl<'de> Deserialize<'de> for ColumnMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColumnMappingVisitor;

        impl<'de> Visitor<'de> for ColumnMappingVisitor {
            type Value = ColumnMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of filter keys to qualified column names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = ColumnMapping::new();
                while let Some((key, column)) = access.next_entry::<String, String>()? {
                    if mapping.get(&key).is_some() {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate column mapping key '{key}'"
                        )));
                    }
                    mapping.insert(&key, &column);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(ColumnMappingVisitor)
    }
}

/// Range direction encoded in a filter key's prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Lower,
    Upper,
}

impl RangeBound {
    /// Classify a key by its prefix (`minPrice`, `startDate` → lower; `maxPrice`, `endDate` → upper)
    pub fn of_key(key: &str) -> Option<Self> {
        if LOWER_BOUND_PREFIXES.iter().any(|p| key.starts_with(p)) {
            Some(RangeBound::Lower)
        } else if UPPER_BOUND_PREFIXES.iter().any(|p| key.starts_with(p)) {
            Some(RangeBound::Upper)
        } else {
            None
        }
    }

    pub fn operator(&self) -> &'static str {
        match self {
            RangeBound::Lower => ">=",
            RangeBound::Upper => "<=",
        }
    }
}

/// Maps filter keys onto qualified columns
pub struct ColumnResolver;

impl ColumnResolver {
    /// Resolve `key` against `mappings`.
    ///
    /// Exact matches win. Otherwise a `min`/`max`/`start`/`end` prefix is
    /// stripped, the next character lower-cased, and the remainder looked up
    /// (`minPrice` → `price`). Returns `None` for keys with no column.
    pub fn resolve<'a>(key: &str, mappings: &'a ColumnMapping) -> Option<&'a str> {
        if let Some(column) = mappings.get(key) {
            return Some(column);
        }

        Self::strip_range_prefix(key).and_then(|stripped| mappings.get(&stripped))
    }

    /// `maxCapacity` → `capacity`; `None` when no range prefix applies
    pub fn strip_range_prefix(key: &str) -> Option<String> {
        let remainder = LOWER_BOUND_PREFIXES
            .iter()
            .chain(UPPER_BOUND_PREFIXES.iter())
            .find_map(|prefix| key.strip_prefix(prefix))?;

        let mut chars = remainder.chars();
        let first = chars.next()?;
        Some(first.to_lowercase().chain(chars).collect())
    }

    /// Aliases a column expression reads from, in order of appearance.
    ///
    /// Plain `alias.column` and expressions such as `LOWER(t.name)` are both
    /// understood; an expression with no qualified reference belongs to
    /// `base_alias`.
    pub fn aliases_of(column: &str, base_alias: &str) -> Vec<String> {
        let aliases = referenced_aliases(column);
        if aliases.is_empty() {
            vec![base_alias.to_string()]
        } else {
            aliases
        }
    }
}
