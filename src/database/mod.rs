//! # Database Operations
//!
//! The effectful edge of the search pipeline: binding planned values onto
//! prepared statements and running them on pooled connections.
//!
//! ## Key Components
//!
//! - [`binder`] - type-dispatched parameter binding per sqlx backend
//! - [`executor`] - [`ConnectionProvider`] and [`QueryExecutor`]
//! - [`connection`] - PostgreSQL pool bootstrap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use booking_query::config::DatabaseConfig;
//! use booking_query::database::{search, DatabaseConnection};
//! use booking_query::query_builder::{SearchParameters, TransportScopes};
//! use sqlx::Row;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseConnection::new(&DatabaseConfig::from_env()?).await?;
//! let params = SearchParameters::new().with("name", "Bus");
//!
//! let names: Vec<String> = search(&db, &TransportScopes::search_config(), &params, |row| {
//!     row.try_get("name")
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod binder;
#[cfg(feature = "postgres")]
pub mod connection;
pub mod executor;

pub use binder::ParameterBinder;
#[cfg(feature = "postgres")]
pub use connection::DatabaseConnection;
pub use executor::{search, ConnectionProvider, QueryExecutor};
