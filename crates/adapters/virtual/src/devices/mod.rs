//! Virtual device implementations: sensor, clock, AC unit.

mod ac;
mod clock;
mod sensor;

pub use ac::VirtualAc;
pub use clock::SystemClock;
pub use sensor::VirtualSensor;
