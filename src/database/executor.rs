//! # Search Execution
//!
//! Runs a [`QueryPlan`] against a pooled database connection and maps every
//! row through a caller-supplied mapper.
//!
//! Each call acquires exactly one connection for one prepare/execute/fetch
//! cycle; the connection goes back to the pool when it is dropped, on every
//! exit path. Results are all-or-nothing: an execution or mapping failure is
//! logged with the full SQL and parameters, then returned to the caller.

use super::binder::ParameterBinder;
use crate::error::{QueryError, Result};
use crate::logging::log_query_failure;
use crate::query_builder::{EntitySearchConfig, QueryAssembler, QueryPlan, SearchParameters};
use async_trait::async_trait;
use futures::TryStreamExt;
use std::time::Instant;
use tracing::debug;

#[cfg(feature = "postgres")]
use sqlx::postgres::{PgPool, PgRow};
#[cfg(feature = "sqlite")]
use sqlx::sqlite::{SqlitePool, SqliteRow};

/// Source of connections able to run a planned search
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Row: Send;

    /// Acquire a connection, bind the plan, and map each row in result order
    async fn fetch_mapped<T, F>(&self, plan: &QueryPlan, mapper: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Self::Row) -> std::result::Result<T, sqlx::Error> + Send + Sync;
}

#[cfg(feature = "postgres")]
#[async_trait]
impl ConnectionProvider for PgPool {
    type Row = PgRow;

    async fn fetch_mapped<T, F>(&self, plan: &QueryPlan, mapper: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Self::Row) -> std::result::Result<T, sqlx::Error> + Send + Sync,
    {
        let execution_error = |source| QueryError::Execution {
            sql: plan.sql.clone(),
            source,
        };

        let mut conn = self.acquire().await.map_err(execution_error)?;
        let sql = ParameterBinder::numbered_placeholders(&plan.sql);
        let query = ParameterBinder::bind_postgres(sqlx::query(&sql), plan);

        let mut rows = query.fetch(&mut *conn);
        let mut mapped = Vec::new();
        while let Some(row) = rows.try_next().await.map_err(execution_error)? {
            mapped.push(mapper(&row).map_err(QueryError::RowMapping)?);
        }

        Ok(mapped)
    }
}

#[cfg(feature = "sqlite")]
#[async_trait]
impl ConnectionProvider for SqlitePool {
    type Row = SqliteRow;

    async fn fetch_mapped<T, F>(&self, plan: &QueryPlan, mapper: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Self::Row) -> std::result::Result<T, sqlx::Error> + Send + Sync,
    {
        let execution_error = |source| QueryError::Execution {
            sql: plan.sql.clone(),
            source,
        };

        let mut conn = self.acquire().await.map_err(execution_error)?;
        let query = ParameterBinder::bind_sqlite(sqlx::query(&plan.sql), plan);

        let mut rows = query.fetch(&mut *conn);
        let mut mapped = Vec::new();
        while let Some(row) = rows.try_next().await.map_err(execution_error)? {
            mapped.push(mapper(&row).map_err(QueryError::RowMapping)?);
        }

        Ok(mapped)
    }
}

/// Executes planned searches with failure diagnostics
pub struct QueryExecutor;

impl QueryExecutor {
    /// Run `plan` and map every row. `params` is only used for failure logging.
    pub async fn execute<P, T, F>(
        provider: &P,
        plan: &QueryPlan,
        params: &SearchParameters,
        mapper: F,
    ) -> Result<Vec<T>>
    where
        P: ConnectionProvider,
        T: Send,
        F: Fn(&P::Row) -> std::result::Result<T, sqlx::Error> + Send + Sync,
    {
        let started = Instant::now();

        match provider.fetch_mapped(plan, mapper).await {
            Ok(rows) => {
                debug!(
                    rows = rows.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Search query completed"
                );
                Ok(rows)
            }
            Err(err) => {
                log_query_failure(&plan.sql, params, &err);
                Err(err)
            }
        }
    }
}

/// Build and run a search for one entity
pub async fn search<P, T, F>(
    provider: &P,
    config: &EntitySearchConfig,
    params: &SearchParameters,
    mapper: F,
) -> Result<Vec<T>>
where
    P: ConnectionProvider,
    T: Send,
    F: Fn(&P::Row) -> std::result::Result<T, sqlx::Error> + Send + Sync,
{
    let plan = QueryAssembler::build(config, params)?;
    QueryExecutor::execute(provider, &plan, params, mapper).await
}
