use super::dependencies::JoinDependencyGraph;
use super::joins::JoinSpec;
use crate::error::{QueryError, Result};
use std::collections::HashSet;

/// Orders included joins so each one follows every alias its condition uses
pub struct JoinScheduler;

impl JoinScheduler {
    /// Repeatedly schedule any join whose dependencies are already available.
    ///
    /// A scan that makes no progress is an error: either a remaining join waits
    /// on an alias that is not part of the query, or the remaining joins wait
    /// on each other.
    pub fn schedule<'a>(
        graph: &JoinDependencyGraph<'_>,
        included: &[&'a JoinSpec],
    ) -> Result<Vec<&'a JoinSpec>> {
        let included_aliases: HashSet<&str> = included.iter().map(|j| j.alias.as_str()).collect();
        let mut available: HashSet<&str> = HashSet::from([graph.base_alias()]);
        let mut ordered: Vec<&'a JoinSpec> = Vec::with_capacity(included.len());
        let mut remaining: Vec<&'a JoinSpec> = included.to_vec();

        while !remaining.is_empty() {
            let before = remaining.len();
            let mut next_remaining = Vec::new();

            for join in remaining {
                let ready = graph
                    .dependencies_of(&join.alias)
                    .iter()
                    .all(|dep| available.contains(dep.as_str()));
                if ready {
                    available.insert(join.alias.as_str());
                    ordered.push(join);
                } else {
                    next_remaining.push(join);
                }
            }

            remaining = next_remaining;
            if remaining.len() == before {
                return Err(Self::stalled(graph, &remaining, &included_aliases));
            }
        }

        Ok(ordered)
    }

    fn stalled(
        graph: &JoinDependencyGraph<'_>,
        remaining: &[&JoinSpec],
        included_aliases: &HashSet<&str>,
    ) -> QueryError {
        for join in remaining {
            if let Some(missing) = graph
                .dependencies_of(&join.alias)
                .iter()
                .find(|dep| !included_aliases.contains(dep.as_str()))
            {
                return QueryError::UnresolvedJoinDependency {
                    alias: join.alias.clone(),
                    missing: missing.clone(),
                };
            }
        }

        QueryError::JoinCycle {
            aliases: remaining.iter().map(|j| j.alias.clone()).collect(),
        }
    }
}
