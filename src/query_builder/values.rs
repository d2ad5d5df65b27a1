use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// A single bindable value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Bool(bool),
    Text(String),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    /// Anything without a dedicated bind; sent as JSON
    Json(serde_json::Value),
}

impl SqlValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Int(v) => write!(f, "{v}"),
            SqlValue::Long(v) => write!(f, "{v}"),
            SqlValue::Double(v) => write!(f, "{v}"),
            SqlValue::Float(v) => write!(f, "{v}"),
            SqlValue::Bool(v) => write!(f, "{v}"),
            SqlValue::Text(v) => write!(f, "'{v}'"),
            SqlValue::Timestamp(v) => write!(f, "'{v}'"),
            SqlValue::Date(v) => write!(f, "'{v}'"),
            SqlValue::Json(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_sql_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    SqlValue::$variant(value)
                }
            }
        )*
    };
}

impl_sql_value_from!(
    i32 => Int,
    i64 => Long,
    f64 => Double,
    f32 => Float,
    bool => Bool,
    String => Text,
    NaiveDateTime => Timestamp,
    NaiveDate => Date,
    serde_json::Value => Json,
);

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// The value of one search filter: a scalar, or a list for `IN (...)` matching
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Scalar(SqlValue),
    List(Vec<SqlValue>),
}

impl FilterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::Scalar(value) => value.as_str(),
            FilterValue::List(_) => None,
        }
    }
}

macro_rules! impl_filter_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::Scalar(value.into())
                }
            }

            impl From<Vec<$ty>> for FilterValue {
                fn from(values: Vec<$ty>) -> Self {
                    FilterValue::List(values.into_iter().map(Into::into).collect())
                }
            }
        )*
    };
}

impl_filter_value_from!(
    i32,
    i64,
    f64,
    f32,
    bool,
    String,
    &str,
    NaiveDateTime,
    NaiveDate,
    serde_json::Value,
    SqlValue,
);

impl<T: Into<SqlValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        FilterValue::Scalar(value.into())
    }
}

/// Ordered set of active search filters.
///
/// Insertion order decides predicate order and therefore bind order.
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParameters {
    entries: Vec<(String, FilterValue)>,
}

impl SearchParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<FilterValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
