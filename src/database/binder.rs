//! Binds a plan's values onto a prepared sqlx query, one placeholder at a time.

use crate::query_builder::{QueryPlan, SqlValue};

#[cfg(feature = "postgres")]
use sqlx::encode::IsNull;
#[cfg(feature = "postgres")]
use sqlx::error::BoxDynError;
#[cfg(feature = "postgres")]
use sqlx::postgres::types::Oid;
#[cfg(feature = "postgres")]
use sqlx::postgres::{PgArgumentBuffer, PgArguments, PgTypeInfo, Postgres};
#[cfg(feature = "sqlite")]
use sqlx::sqlite::{Sqlite, SqliteArguments};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use sqlx::query::Query;

#[cfg(feature = "postgres")]
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;
#[cfg(feature = "sqlite")]
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// NULL parameter with no declared type; PostgreSQL infers it from the
/// surrounding expression, so `t.price = $1` stays a numeric comparison
#[cfg(feature = "postgres")]
#[derive(Debug, Clone, Copy)]
struct UntypedNull;

#[cfg(feature = "postgres")]
impl sqlx::Type<Postgres> for UntypedNull {
    fn type_info() -> PgTypeInfo {
        // OID 0 is "unspecified" in the extended query protocol
        PgTypeInfo::with_oid(Oid(0))
    }
}

#[cfg(feature = "postgres")]
impl<'q> sqlx::Encode<'q, Postgres> for UntypedNull {
    fn encode_by_ref(&self, _buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        Ok(IsNull::Yes)
    }
}

/// Type dispatch shared by every backend. `$null` is what the backend binds for `Null`.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
macro_rules! bind_sql_value {
    ($query:expr, $value:expr, $null:expr) => {
        match $value {
            SqlValue::Null => $query.bind($null),
            SqlValue::Int(v) => $query.bind(v),
            SqlValue::Long(v) => $query.bind(v),
            SqlValue::Double(v) => $query.bind(v),
            SqlValue::Float(v) => $query.bind(v),
            SqlValue::Bool(v) => $query.bind(v),
            SqlValue::Text(v) => $query.bind(v),
            SqlValue::Timestamp(v) => $query.bind(v),
            SqlValue::Date(v) => $query.bind(v),
            SqlValue::Json(v) => $query.bind(sqlx::types::Json(v)),
        }
    };
}

/// Applies a [`QueryPlan`]'s bind plan to a prepared statement
pub struct ParameterBinder;

impl ParameterBinder {
    #[cfg(feature = "postgres")]
    pub fn bind_postgres<'q>(query: PgQuery<'q>, plan: &QueryPlan) -> PgQuery<'q> {
        plan.bind_values()
            .into_iter()
            .fold(query, |query, value| bind_sql_value!(query, value, UntypedNull))
    }

    #[cfg(feature = "sqlite")]
    pub fn bind_sqlite<'q>(query: SqliteQuery<'q>, plan: &QueryPlan) -> SqliteQuery<'q> {
        plan.bind_values()
            .into_iter()
            .fold(query, |query, value| bind_sql_value!(query, value, None::<String>))
    }

    /// Rewrite positional `?` markers as `$1, $2, ...` for PostgreSQL.
    ///
    /// Markers inside single-quoted literals are left alone. Every other `?`
    /// is treated as a placeholder, so SQL handed to this function must not
    /// use PostgreSQL's `?`, `?|` or `?&` JSON operators; `jsonb_exists`
    /// and friends express the same tests. `EntitySearchConfig::validate`
    /// rejects join conditions and columns that contain a bare `?`.
    pub fn numbered_placeholders(sql: &str) -> String {
        let mut rendered = String::with_capacity(sql.len() + 8);
        let mut index = 0;
        let mut in_literal = false;

        for ch in sql.chars() {
            match ch {
                '\'' => {
                    in_literal = !in_literal;
                    rendered.push(ch);
                }
                '?' if !in_literal => {
                    index += 1;
                    rendered.push('$');
                    rendered.push_str(&index.to_string());
                }
                _ => rendered.push(ch),
            }
        }

        rendered
    }
}
