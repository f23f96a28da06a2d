//! Temperature sensor port.

use std::future::Future;
use std::sync::Arc;

/// Why a temperature reading could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// The sensor did not answer.
    #[error("temperature sensor unavailable")]
    Unavailable,

    /// Transport-level failure talking to the sensor.
    #[error("temperature sensor I/O error")]
    Io(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Source of the current room temperature in °C.
pub trait TemperatureSensor {
    fn read_temperature(&self) -> impl Future<Output = Result<f32, SensorError>> + Send;
}

impl<T: TemperatureSensor + Send + Sync> TemperatureSensor for Arc<T> {
    fn read_temperature(&self) -> impl Future<Output = Result<f32, SensorError>> + Send {
        (**self).read_temperature()
    }
}
