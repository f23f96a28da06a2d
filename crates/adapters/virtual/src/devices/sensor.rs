//! Virtual temperature sensor: holds a reading that can be changed at runtime.

use std::future::Future;
use std::sync::Mutex;

use acrules_app::ports::{SensorError, TemperatureSensor};

/// A simulated temperature sensor.
pub struct VirtualSensor {
    reading: Mutex<Option<f32>>,
}

impl Default for VirtualSensor {
    fn default() -> Self {
        Self::new(25.0)
    }
}

impl VirtualSensor {
    /// Create a sensor reporting `celsius`.
    #[must_use]
    pub fn new(celsius: f32) -> Self {
        Self {
            reading: Mutex::new(Some(celsius)),
        }
    }

    /// Change the reported temperature.
    pub fn set_temperature(&self, celsius: f32) {
        if let Ok(mut reading) = self.reading.lock() {
            *reading = Some(celsius);
        }
    }

    /// Simulate a disconnected sensor until the next [`set_temperature`](Self::set_temperature).
    pub fn disconnect(&self) {
        if let Ok(mut reading) = self.reading.lock() {
            *reading = None;
        }
    }
}

impl TemperatureSensor for VirtualSensor {
    fn read_temperature(&self) -> impl Future<Output = Result<f32, SensorError>> + Send {
        let reading = self
            .reading
            .lock()
            .map_err(|_| SensorError::Unavailable)
            .and_then(|reading| reading.ok_or(SensorError::Unavailable));
        async move { reading }
    }
}
