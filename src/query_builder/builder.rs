use super::conditions::{BindOp, Predicate, PredicateBuilder};
use super::dependencies::JoinDependencyGraph;
use super::entity::EntitySearchConfig;
use super::joins::JoinSpec;
use super::scheduler::JoinScheduler;
use super::values::{SearchParameters, SqlValue};
use crate::error::Result;
use tracing::debug;

/// Fully planned search: SQL text plus everything needed to bind it.
///
/// Built fresh for every search and dropped after execution.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub sql: String,
    /// Joins in emitted order
    pub joins: Vec<JoinSpec>,
    /// Predicates in parameter order
    pub predicates: Vec<Predicate>,
}

impl QueryPlan {
    pub fn bind_ops(&self) -> impl Iterator<Item = &BindOp> {
        self.predicates.iter().map(|p| &p.bind)
    }

    pub fn placeholder_count(&self) -> usize {
        self.bind_ops().map(BindOp::placeholder_count).sum()
    }

    /// Flattened values, one per `?`, in placeholder order
    pub fn bind_values(&self) -> Vec<SqlValue> {
        self.bind_ops().flat_map(BindOp::values).collect()
    }

    pub fn join_aliases(&self) -> Vec<&str> {
        self.joins.iter().map(|j| j.alias.as_str()).collect()
    }
}

/// Composes the final SELECT for an entity search
pub struct QueryAssembler;

impl QueryAssembler {
    /// Plan joins, build predicates and render SQL of the form
    /// `SELECT DISTINCT a.*[, extras] FROM table a [JOIN ...] WHERE 1=1 [AND ...] ORDER BY a.name`
    pub fn build(config: &EntitySearchConfig, params: &SearchParameters) -> Result<QueryPlan> {
        config.validate()?;

        let graph = JoinDependencyGraph::new(&config.base_alias, &config.joins);
        let included = graph.included_joins(params, &config.columns, &config.keyword_columns)?;
        let joins = JoinScheduler::schedule(&graph, &included)?;

        let predicates =
            PredicateBuilder::new(&config.columns, &config.keyword_columns).build(params);

        let sql = Self::render(config, &joins, &predicates);
        let plan = QueryPlan {
            sql,
            joins: joins.into_iter().cloned().collect(),
            predicates,
        };

        debug!(
            table = %config.base_table,
            joins = ?plan.join_aliases(),
            placeholders = plan.placeholder_count(),
            sql = %plan.sql,
            "Assembled search query"
        );

        Ok(plan)
    }

    fn render(config: &EntitySearchConfig, joins: &[&JoinSpec], predicates: &[Predicate]) -> String {
        let alias = &config.base_alias;
        let mut sql = String::new();

        // SELECT clause
        sql.push_str(&format!("SELECT DISTINCT {alias}.*"));
        for join in joins {
            for projection in &join.extra_projections {
                sql.push_str(&format!(
                    ", {} AS {}",
                    projection.qualified(&join.alias),
                    projection.output_alias
                ));
            }
        }

        // FROM clause
        sql.push_str(&format!(" FROM {} {alias}", config.base_table));

        // JOIN clauses
        for join in joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        // WHERE clauses
        sql.push_str(" WHERE 1=1");
        for predicate in predicates {
            sql.push_str(" AND ");
            sql.push_str(&predicate.sql);
        }

        // ORDER BY
        sql.push_str(&format!(" ORDER BY {alias}.{}", config.order_by));

        sql
    }
}
