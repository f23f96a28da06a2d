//! # acrules-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement [`RuleRepository`](acrules_app::ports::RuleRepository) for `SQLite`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain rules and table rows
//!
//! Absent constraints are stored as `NULL`, never as sentinel numbers.
//!
//! ## Dependency rule
//! Depends on `acrules-app` (for port traits) and `acrules-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod rule_repo;

pub use pool::{Config, Database};
pub use rule_repo::SqliteRuleRepository;
