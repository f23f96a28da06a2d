//! AC actuator port: transmits settings to the unit (IR, MQTT, …).

use std::future::Future;
use std::sync::Arc;

use acrules_domain::ac_state::AcState;

/// Transmission failure.
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    /// The transmitter is not ready (e.g. no codes learned yet).
    #[error("AC transmitter not ready")]
    NotReady,

    #[error("failed to transmit AC command")]
    Transmit(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Sends a complete [`AcState`] to the unit in one transmission.
pub trait AcActuator {
    fn send(&self, state: AcState) -> impl Future<Output = Result<(), ActuatorError>> + Send;
}

impl<T: AcActuator + Send + Sync> AcActuator for Arc<T> {
    fn send(&self, state: AcState) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        (**self).send(state)
    }
}
