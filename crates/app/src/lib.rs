//! # acrules-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleRepository`: CRUD for rules, ordered by id
//!   - `TemperatureSensor`: current room temperature
//!   - `Clock`: current local hour
//!   - `AcActuator`: transmit an AC state to the unit
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RuleService`: create, edit, patch, delete, list, seed defaults
//!   - `ClimateController`: one control cycle, live evaluation, debug toggle,
//!     status snapshot
//! - Run the periodic control loop
//!
//! ## Dependency rule
//! Depends on `acrules-domain` only (plus `tokio` for the loop and locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod control_loop;
pub mod controller;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
