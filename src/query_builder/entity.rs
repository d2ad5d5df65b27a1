use super::columns::{ColumnMapping, ColumnResolver};
use super::joins::{contains_placeholder, JoinSpec};
use crate::error::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn default_order_by() -> String {
    "name".to_string()
}

/// Everything a data-access object declares about searching one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySearchConfig {
    pub base_table: String,
    pub base_alias: String,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub joins: Vec<JoinSpec>,
    /// Columns matched by the `keyword` filter, OR-ed together
    #[serde(default)]
    pub keyword_columns: Vec<String>,
    /// Base-table column for ORDER BY
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

impl EntitySearchConfig {
    pub fn new(base_table: &str, base_alias: &str) -> Self {
        Self {
            base_table: base_table.to_string(),
            base_alias: base_alias.to_string(),
            columns: ColumnMapping::new(),
            joins: Vec::new(),
            keyword_columns: Vec::new(),
            order_by: default_order_by(),
        }
    }

    pub fn column(mut self, key: &str, column: &str) -> Self {
        self.columns.insert(key, column);
        self
    }

    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    pub fn join(mut self, join: JoinSpec) -> Self {
        self.joins.push(join);
        self
    }

    pub fn keyword_columns(mut self, columns: &[&str]) -> Self {
        self.keyword_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by = column.to_string();
        self
    }

    /// Reject configurations that could never produce valid SQL
    pub fn validate(&self) -> Result<()> {
        if self.base_table.trim().is_empty() {
            return Err(QueryError::configuration("base_table must not be empty"));
        }
        if self.base_alias.trim().is_empty() {
            return Err(QueryError::configuration(format!(
                "base_alias for '{}' must not be empty",
                self.base_table
            )));
        }
        if self.order_by.trim().is_empty() {
            return Err(QueryError::configuration(format!(
                "order_by for '{}' must not be empty",
                self.base_table
            )));
        }

        let mut aliases: HashSet<&str> = HashSet::new();
        aliases.insert(self.base_alias.as_str());
        for join in &self.joins {
            if join.alias.trim().is_empty() || join.table.trim().is_empty() {
                return Err(QueryError::configuration(format!(
                    "join on '{}' needs both a table and an alias",
                    self.base_table
                )));
            }
            if !aliases.insert(join.alias.as_str()) {
                return Err(QueryError::configuration(format!(
                    "alias '{}' is declared more than once for '{}'",
                    join.alias, self.base_table
                )));
            }
        }

        for column in &self.keyword_columns {
            for alias in ColumnResolver::aliases_of(column, &self.base_alias) {
                if !aliases.contains(alias.as_str()) {
                    return Err(QueryError::UndeclaredAlias {
                        source_name: "keyword".to_string(),
                        column: column.clone(),
                        alias,
                    });
                }
            }
        }

        for join in &self.joins {
            for projection in &join.extra_projections {
                for alias in join.projection_aliases(projection) {
                    if !aliases.contains(alias.as_str()) {
                        return Err(QueryError::UndeclaredAlias {
                            source_name: join.alias.clone(),
                            column: projection.source_column.clone(),
                            alias,
                        });
                    }
                }
            }
        }

        for (key, column) in self.columns.iter() {
            if contains_placeholder(column) {
                return Err(QueryError::configuration(format!(
                    "column '{column}' for filter '{key}' must not contain '?'"
                )));
            }
        }
        for join in &self.joins {
            if contains_placeholder(&join.condition) {
                return Err(QueryError::configuration(format!(
                    "condition of join '{}' must not contain '?' outside a quoted literal",
                    join.alias
                )));
            }
        }

        Ok(())
    }
}
