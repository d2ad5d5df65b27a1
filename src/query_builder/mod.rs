//! # Query Builder System
//!
//! Dynamic search query construction shared by every entity's data-access object.
//!
//! ## Overview
//!
//! A caller describes an entity once ([`EntitySearchConfig`]: base table, alias,
//! filter-key-to-column mapping, optional joins, keyword columns) and passes an
//! ordered set of active filters ([`SearchParameters`]) per search. The builder
//! answers with a [`QueryPlan`]: minimal joins, parameterized predicates, and a
//! bind plan whose values line up exactly with the `?` placeholders.
//!
//! ## Pipeline
//!
//! - [`columns`] - filter key to column resolution (`minPrice` → `t.price`)
//! - [`dependencies`] - which joins are needed, including transitive ones
//! - [`scheduler`] - join ordering so every alias is available before use
//! - [`conditions`] - predicates and bind operations
//! - [`builder`] - final SQL text
//!
//! Every stage is a pure function of its inputs, so plans can be built
//! concurrently without coordination.
//!
//! ## Example Usage
//!
//! ```rust
//! use booking_query::query_builder::{QueryAssembler, SearchParameters, TransportScopes};
//!
//! let params = SearchParameters::new()
//!     .with("minPrice", 100)
//!     .with("maxPrice", 500);
//! let plan = QueryAssembler::build(&TransportScopes::search_config(), &params).unwrap();
//!
//! assert!(plan.sql.contains("AND t.price >= ? AND t.price <= ?"));
//! assert_eq!(plan.placeholder_count(), 2);
//! ```

pub mod builder;
pub mod columns;
pub mod conditions;
pub mod dependencies;
pub mod entity;
pub mod joins;
pub mod scheduler;
pub mod scopes;
pub mod values;

pub use builder::{QueryAssembler, QueryPlan};
pub use columns::{ColumnMapping, ColumnResolver, RangeBound};
pub use conditions::{BindOp, BindTransform, Predicate, PredicateBuilder};
pub use dependencies::{JoinDependencyGraph, KEYWORD_KEY};
pub use entity::EntitySearchConfig;
pub use joins::{JoinSpec, JoinType, ProjectedColumn};
pub use scheduler::JoinScheduler;
pub use scopes::*;
pub use values::{FilterValue, SearchParameters, SqlValue};
