#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Booking Query
//!
//! Generic search query construction for the booking application's
//! data-access layer.
//!
//! ## Overview
//!
//! Every entity search answers the same question: given a base table, an
//! arbitrary set of optional filters and a set of optionally-needed joins,
//! produce a correct, minimal, safely-parameterized SQL query, run it, and map
//! the rows. This crate implements that once.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - pure planning: column resolution, join selection and
//!   ordering, predicates, SQL assembly
//! - [`database`] - parameter binding and execution on sqlx pools
//! - [`config`] - database settings and YAML entity catalogs
//! - [`logging`] - structured logging bootstrap
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use booking_query::query_builder::{LocationScopes, QueryAssembler, SearchParameters, SqlValue};
//!
//! let params = SearchParameters::new().with("keyword", "paris");
//! let plan = QueryAssembler::build(&LocationScopes::search_config(), &params).unwrap();
//!
//! assert!(plan
//!     .sql
//!     .contains("AND (l.name LIKE ? OR l.description LIKE ? OR l.country LIKE ?)"));
//! assert_eq!(plan.bind_values(), vec![SqlValue::Text("%paris%".into()); 3]);
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod query_builder;

pub use config::{DatabaseConfig, SearchCatalog};
pub use database::{search, ConnectionProvider, QueryExecutor};
pub use error::{QueryError, Result};
pub use query_builder::{
    EntitySearchConfig, FilterValue, JoinSpec, JoinType, QueryAssembler, QueryPlan,
    SearchParameters, SqlValue,
};
