//! Works out which optional joins a search actually needs.
//!
//! Joins are pulled in three ways: they are ungated, one of their gating
//! params is active, or their alias is needed by a filter column, a keyword
//! column, or (transitively) by another included join's condition.

use super::columns::{ColumnMapping, ColumnResolver};
use super::joins::JoinSpec;
use super::values::SearchParameters;
use crate::error::{QueryError, Result};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Filter key that triggers keyword search
pub const KEYWORD_KEY: &str = "keyword";

/// Directed "join depends on alias" edges for one entity's join list
#[derive(Debug, Clone)]
pub struct JoinDependencyGraph<'a> {
    base_alias: &'a str,
    joins: &'a [JoinSpec],
    edges: HashMap<&'a str, Vec<String>>,
}

impl<'a> JoinDependencyGraph<'a> {
    pub fn new(base_alias: &'a str, joins: &'a [JoinSpec]) -> Self {
        let edges = joins
            .iter()
            .map(|join| (join.alias.as_str(), join.dependencies(base_alias)))
            .collect();

        Self {
            base_alias,
            joins,
            edges,
        }
    }

    pub fn base_alias(&self) -> &str {
        self.base_alias
    }

    /// Aliases `alias` depends on; empty for unknown aliases
    pub fn dependencies_of(&self, alias: &str) -> &[String] {
        self.edges.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn join(&self, alias: &str) -> Option<&'a JoinSpec> {
        self.joins.iter().find(|j| j.alias == alias)
    }

    fn is_known_alias(&self, alias: &str) -> bool {
        alias == self.base_alias || self.edges.contains_key(alias)
    }

    /// Aliases directly needed by active filters: every resolvable key whose
    /// column lives outside the base table, and every keyword column when a
    /// keyword string is active.
    pub fn directly_required(
        &self,
        params: &SearchParameters,
        columns: &ColumnMapping,
        keyword_columns: &[String],
    ) -> Result<Vec<String>> {
        let mut required: Vec<String> = Vec::new();

        for (key, value) in params.iter() {
            if key == KEYWORD_KEY && value.as_str().is_some() {
                for column in keyword_columns {
                    self.require_column_alias(key, column, &mut required)?;
                }
                continue;
            }
            if let Some(column) = ColumnResolver::resolve(key, columns) {
                self.require_column_alias(key, column, &mut required)?;
            }
        }

        Ok(required)
    }

    fn require_column_alias(
        &self,
        key: &str,
        column: &str,
        required: &mut Vec<String>,
    ) -> Result<()> {
        for alias in ColumnResolver::aliases_of(column, self.base_alias) {
            if !self.is_known_alias(&alias) {
                return Err(QueryError::UndeclaredAlias {
                    source_name: key.to_string(),
                    column: column.to_string(),
                    alias,
                });
            }
            if alias != self.base_alias && !required.contains(&alias) {
                required.push(alias);
            }
        }
        Ok(())
    }

    /// Gate check for a single join: ungated, or one of its params is active
    pub fn is_required(join: &JoinSpec, params: &SearchParameters) -> bool {
        !join.is_gated() || join.required_params.iter().any(|p| params.contains_key(p))
    }

    /// Follow dependency edges from `seed` until no new alias is added
    pub fn transitive_closure(&self, seed: impl IntoIterator<Item = String>) -> Result<HashSet<String>> {
        let mut closure: HashSet<String> = HashSet::new();
        let mut frontier: Vec<String> = Vec::new();

        for alias in seed {
            if closure.insert(alias.clone()) {
                frontier.push(alias);
            }
        }

        while let Some(alias) = frontier.pop() {
            for dep in self.dependencies_of(&alias) {
                if !self.is_known_alias(dep) {
                    return Err(QueryError::UndeclaredAlias {
                        source_name: alias.clone(),
                        column: self
                            .join(&alias)
                            .map(|j| j.condition.clone())
                            .unwrap_or_default(),
                        alias: dep.clone(),
                    });
                }
                if closure.insert(dep.clone()) {
                    trace!(join = %alias, dependency = %dep, "Pulled in join dependency");
                    frontier.push(dep.clone());
                }
            }
        }

        Ok(closure)
    }

    /// Joins that belong in the query, in declaration order
    pub fn included_joins(
        &self,
        params: &SearchParameters,
        columns: &ColumnMapping,
        keyword_columns: &[String],
    ) -> Result<Vec<&'a JoinSpec>> {
        let mut seed = self.directly_required(params, columns, keyword_columns)?;
        for join in self.joins {
            if Self::is_required(join, params) && !seed.contains(&join.alias) {
                seed.push(join.alias.clone());
            }
        }

        let closure = self.transitive_closure(seed)?;

        Ok(self
            .joins
            .iter()
            .filter(|join| closure.contains(&join.alias))
            .collect())
    }
}
