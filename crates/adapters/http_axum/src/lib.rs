//! # acrules-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** the browser rule editor talks to
//!   (`/api/rules`, `/api/rules/active`, `/api/debug`, `/api/status`)
//! - Translate between the legacy wire format (camelCase, `-1` / `-999`
//!   sentinels, numeric enum codes) and domain types
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `acrules-app` (for port traits and services) and `acrules-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
