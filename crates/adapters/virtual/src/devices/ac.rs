//! Virtual AC unit: logs the commands an IR transmitter would send.

use std::future::Future;
use std::sync::Mutex;

use acrules_app::ports::{AcActuator, ActuatorError};
use acrules_domain::ac_state::AcState;

/// A simulated AC unit.
#[derive(Default)]
pub struct VirtualAc {
    last: Mutex<Option<AcState>>,
}

impl VirtualAc {
    /// The last state received, if any.
    #[must_use]
    pub fn last_state(&self) -> Option<AcState> {
        self.last.lock().ok().and_then(|last| *last)
    }
}

impl AcActuator for VirtualAc {
    fn send(&self, state: AcState) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        tracing::info!(
            power = state.power,
            temperature = state.temperature,
            fan_speed = ?state.fan_speed,
            mode = ?state.mode,
            v_swing = ?state.v_swing,
            h_swing = ?state.h_swing,
            "virtual AC command"
        );
        let result = match self.last.lock() {
            Ok(mut last) => {
                *last = Some(state);
                Ok(())
            }
            Err(_) => Err(ActuatorError::NotReady),
        };
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_start_without_state() {
        assert!(VirtualAc::default().last_state().is_none());
    }

    #[tokio::test]
    async fn should_remember_last_command() {
        let ac = VirtualAc::default();
        let on = AcState {
            power: true,
            ..AcState::default()
        };

        ac.send(on).await.unwrap();
        ac.send(AcState::default()).await.unwrap();

        assert_eq!(ac.last_state(), Some(AcState::default()));
    }
}
