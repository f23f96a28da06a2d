//! # acrules-domain
//!
//! Pure domain model for the acrules air-conditioner scheduler.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Rules** (time window + temperature range → AC action)
//! - Define **AC state** (the power/mode/temperature settings a rule commands)
//! - The **evaluation engine**: pick the single active rule for an hour and a
//!   temperature reading
//! - Legacy sentinel encoding (`-1` hours, `-999` temperatures) used on the wire
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod ac_state;
pub mod defaults;
pub mod evaluation;
pub mod rule;
pub mod sentinel;
