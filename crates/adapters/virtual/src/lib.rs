//! # acrules-adapter-virtual
//!
//! Virtual hardware for running the controller without a board attached.
//!
//! ## Provided devices
//!
//! | Device | Port | Behaviour |
//! |--------|------|-----------|
//! | [`VirtualSensor`] | `TemperatureSensor` | Returns a settable reading, or fails while offline |
//! | [`SystemClock`] | `Clock` | Local wall-clock hour |
//! | [`VirtualAc`] | `AcActuator` | Logs every command and remembers the last one |
//!
//! ## Dependency rule
//!
//! Depends on `acrules-app` (port traits) and `acrules-domain` only.

mod devices;

pub use devices::{SystemClock, VirtualAc, VirtualSensor};
