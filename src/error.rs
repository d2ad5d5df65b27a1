//! # Query Error Types
//!
//! Structured errors for search query construction and execution.
//!
//! Filter keys that cannot be resolved to a column are never errors; they are
//! skipped while building predicates. Everything here is either a configuration
//! problem detected while planning joins, or a failure reported by the database.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Join dependency cycle detected among aliases: {}", aliases.join(", "))]
    JoinCycle { aliases: Vec<String> },

    #[error("Join '{alias}' depends on alias '{missing}' which is not part of the query")]
    UnresolvedJoinDependency { alias: String, missing: String },

    #[error("'{source_name}' references undeclared alias '{alias}' in '{column}'")]
    UndeclaredAlias {
        source_name: String,
        column: String,
        alias: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Query execution failed: {source}")]
    Execution {
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Row mapping failed: {0}")]
    RowMapping(#[source] sqlx::Error),
}

impl QueryError {
    pub fn configuration(message: impl Into<String>) -> Self {
        QueryError::Configuration(message.into())
    }

    /// True for errors raised while planning, before any database work.
    pub fn is_planning_error(&self) -> bool {
        matches!(
            self,
            QueryError::JoinCycle { .. }
                | QueryError::UnresolvedJoinDependency { .. }
                | QueryError::UndeclaredAlias { .. }
                | QueryError::Configuration(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
