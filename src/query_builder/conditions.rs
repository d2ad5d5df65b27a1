use super::columns::{ColumnMapping, ColumnResolver, RangeBound};
use super::dependencies::KEYWORD_KEY;
use super::values::{FilterValue, SearchParameters, SqlValue};

/// How a source value is transformed before binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindTransform {
    /// Bind unchanged
    AsIs,
    /// Wrap text as `%value%` for substring matching
    Wildcard,
}

/// One entry of the bind plan: a filter value, its transform, and how many
/// times the transformed value fills consecutive placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct BindOp {
    pub key: String,
    pub value: FilterValue,
    pub transform: BindTransform,
    pub repeat: usize,
}

impl BindOp {
    pub fn new(key: &str, value: FilterValue, transform: BindTransform) -> Self {
        Self {
            key: key.to_string(),
            value,
            transform,
            repeat: 1,
        }
    }

    pub fn repeated(mut self, times: usize) -> Self {
        self.repeat = times;
        self
    }

    pub fn placeholder_count(&self) -> usize {
        let per_pass = match &self.value {
            FilterValue::Scalar(_) => 1,
            FilterValue::List(values) => values.len(),
        };
        per_pass * self.repeat
    }

    /// Values in placeholder order; lists are exploded element by element
    pub fn values(&self) -> Vec<SqlValue> {
        let pass: Vec<SqlValue> = match &self.value {
            FilterValue::Scalar(value) => vec![self.apply(value)],
            FilterValue::List(values) => values.iter().map(|v| self.apply(v)).collect(),
        };

        let mut values = Vec::with_capacity(pass.len() * self.repeat);
        for _ in 0..self.repeat {
            values.extend(pass.iter().cloned());
        }
        values
    }

    fn apply(&self, value: &SqlValue) -> SqlValue {
        match (self.transform, value) {
            (BindTransform::Wildcard, SqlValue::Text(text)) => SqlValue::Text(format!("%{text}%")),
            _ => value.clone(),
        }
    }
}

/// A WHERE fragment and the bind operation feeding its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub bind: BindOp,
}

impl Predicate {
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// Translates active search filters into predicates, in parameter order
pub struct PredicateBuilder<'a> {
    columns: &'a ColumnMapping,
    keyword_columns: &'a [String],
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(columns: &'a ColumnMapping, keyword_columns: &'a [String]) -> Self {
        Self {
            columns,
            keyword_columns,
        }
    }

    pub fn build(&self, params: &SearchParameters) -> Vec<Predicate> {
        params
            .iter()
            .filter_map(|(key, value)| self.predicate_for(key, value))
            .collect()
    }

    /// Predicate for one filter, or `None` when the filter contributes nothing
    pub fn predicate_for(&self, key: &str, value: &FilterValue) -> Option<Predicate> {
        if key == KEYWORD_KEY && value.as_str().is_some() {
            return self.keyword_predicate(key, value);
        }

        let column = ColumnResolver::resolve(key, self.columns)?;

        if let FilterValue::List(values) = value {
            if values.is_empty() {
                return None;
            }
            let placeholders = vec!["?"; values.len()].join(",");
            return Some(Predicate {
                sql: format!("{column} IN ({placeholders})"),
                bind: BindOp::new(key, value.clone(), BindTransform::AsIs),
            });
        }

        if let Some(bound) = RangeBound::of_key(key) {
            return Some(Predicate {
                sql: format!("{column} {} ?", bound.operator()),
                bind: BindOp::new(key, value.clone(), BindTransform::AsIs),
            });
        }

        if value.as_str().is_some() {
            // ids match exactly, everything else by substring
            let transform = if key == "id" {
                BindTransform::AsIs
            } else {
                BindTransform::Wildcard
            };
            return Some(Predicate {
                sql: format!("{column} LIKE ?"),
                bind: BindOp::new(key, value.clone(), transform),
            });
        }

        Some(Predicate {
            sql: format!("{column} = ?"),
            bind: BindOp::new(key, value.clone(), BindTransform::AsIs),
        })
    }

    fn keyword_predicate(&self, key: &str, value: &FilterValue) -> Option<Predicate> {
        if self.keyword_columns.is_empty() {
            return None;
        }

        let alternatives: Vec<String> = self
            .keyword_columns
            .iter()
            .map(|column| format!("{column} LIKE ?"))
            .collect();

        Some(Predicate {
            sql: format!("({})", alternatives.join(" OR ")),
            bind: BindOp::new(key, value.clone(), BindTransform::Wildcard)
                .repeated(self.keyword_columns.len()),
        })
    }
}
