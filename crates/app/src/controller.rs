//! Climate controller: runs one control cycle at a time.
//!
//! A cycle reads the clock and the sensor, asks the evaluation engine for the
//! active rule, and transmits that rule's [`AcState`] when it differs from the
//! state applied last time. Debug mode bypasses that comparison and always
//! transmits. When no rule is active and the AC was left on, it is switched
//! off once.
//!
//! The controller owns what used to be global state in the firmware: the
//! previously applied AC state, the debug flag, and the status snapshot shown
//! to the UI.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;

use acrules_domain::ac_state::AcState;
use acrules_domain::error::AcRulesError;
use acrules_domain::evaluation::Evaluation;
use acrules_domain::rule::Rule;
use acrules_domain::time::Timestamp;

use crate::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};

/// What a control cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleOutcome {
    /// A rule matched and its state was transmitted.
    Applied,
    /// A rule matched but the AC is already in its state.
    Unchanged,
    /// No rule matched and the AC was switched off.
    TurnedOff,
    /// No rule matched and the AC was already off.
    Idle,
    /// No usable temperature reading; nothing was evaluated.
    SensorUnavailable,
    /// Transmission failed; the applied state is kept so the next cycle retries.
    TransmitFailed,
}

/// Snapshot of the last control cycle, for the presentation layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ControllerStatus {
    pub current_temp: Option<f32>,
    pub current_hour: Option<u8>,
    pub active_rule: Option<Rule>,
    pub ac_state: AcState,
    pub debug_mode: bool,
    pub last_cycle: Option<Timestamp>,
    pub last_outcome: Option<CycleOutcome>,
}

struct ControlState {
    applied: AcState,
    status: ControllerStatus,
}

/// Drives the AC from the rule set.
pub struct ClimateController<R, S, C, A> {
    rules: R,
    sensor: S,
    clock: C,
    actuator: A,
    debug_mode: AtomicBool,
    state: Mutex<ControlState>,
}

impl<R, S, C, A> ClimateController<R, S, C, A>
where
    R: RuleRepository + Send + Sync,
    S: TemperatureSensor + Send + Sync,
    C: Clock + Send + Sync,
    A: AcActuator + Send + Sync,
{
    /// Create a controller. The AC is assumed off until the first cycle.
    pub fn new(rules: R, sensor: S, clock: C, actuator: A) -> Self {
        Self {
            rules,
            sensor,
            clock,
            actuator,
            debug_mode: AtomicBool::new(false),
            state: Mutex::new(ControlState {
                applied: AcState::default(),
                status: ControllerStatus::default(),
            }),
        }
    }

    /// Start with debug mode already set.
    #[must_use]
    pub fn with_debug_mode(self, enabled: bool) -> Self {
        self.debug_mode.store(enabled, Ordering::Relaxed);
        self
    }

    #[must_use]
    pub fn debug_mode(&self) -> bool {
        self.debug_mode.load(Ordering::Relaxed)
    }

    /// Toggle unconditional re-transmission.
    pub fn set_debug_mode(&self, enabled: bool) {
        let previous = self.debug_mode.swap(enabled, Ordering::Relaxed);
        if previous != enabled {
            tracing::info!(enabled, "debug mode changed");
        }
    }

    /// Copy of the last cycle's status.
    pub async fn status(&self) -> ControllerStatus {
        let state = self.state.lock().await;
        ControllerStatus {
            debug_mode: self.debug_mode(),
            ..state.status.clone()
        }
    }

    /// Evaluate the rules against the live clock and sensor without touching
    /// the AC.
    ///
    /// Returns `None` when the sensor has no usable reading.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the rules cannot be loaded.
    pub async fn evaluate_now(&self) -> Result<Option<Evaluation>, AcRulesError> {
        let hour = self.clock.current_hour();
        let Some(temperature) = self.read_temperature().await else {
            return Ok(None);
        };
        let rules = self.rules.get_all().await?;
        Ok(Some(Evaluation::run(&rules, hour, temperature)))
    }

    /// Run one control cycle.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the rules cannot be loaded. Sensor and
    /// transmission failures are reported through [`CycleOutcome`] instead.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, AcRulesError> {
        let hour = self.clock.current_hour();
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        let Some(temperature) = self.read_temperature().await else {
            state.status = ControllerStatus {
                current_temp: None,
                current_hour: Some(hour),
                active_rule: None,
                ac_state: state.applied,
                debug_mode: self.debug_mode(),
                last_cycle: Some(now),
                last_outcome: Some(CycleOutcome::SensorUnavailable),
            };
            return Ok(CycleOutcome::SensorUnavailable);
        };
        tracing::debug!(temperature, hour, "control cycle");

        let rules = self.rules.get_all().await?;
        let evaluation = Evaluation::run(&rules, hour, temperature);
        let debug_mode = self.debug_mode();

        let outcome = match &evaluation.active {
            Some(rule) => {
                let target = AcState::from(&rule.action);
                if debug_mode || target.differs_from(&state.applied) {
                    tracing::info!(rule_id = %rule.id, rule_name = %rule.name, %target, debug_mode, "applying rule");
                    self.transmit(&mut state, target, CycleOutcome::Applied)
                        .await
                } else {
                    tracing::debug!(rule_id = %rule.id, "AC state unchanged");
                    CycleOutcome::Unchanged
                }
            }
            None if state.applied.power => {
                tracing::info!("no matching rule, turning AC off");
                self.transmit(&mut state, AcState::default(), CycleOutcome::TurnedOff)
                    .await
            }
            None => {
                tracing::debug!("no matching rule, AC already off");
                CycleOutcome::Idle
            }
        };

        state.status = ControllerStatus {
            current_temp: Some(temperature),
            current_hour: Some(hour),
            active_rule: evaluation.active,
            ac_state: state.applied,
            debug_mode,
            last_cycle: Some(now),
            last_outcome: Some(outcome),
        };
        Ok(outcome)
    }

    async fn read_temperature(&self) -> Option<f32> {
        match self.sensor.read_temperature().await {
            Ok(celsius) if celsius.is_finite() => Some(celsius),
            Ok(celsius) => {
                tracing::warn!(reading = celsius, "discarding non-finite temperature reading");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read temperature");
                None
            }
        }
    }

    async fn transmit(
        &self,
        state: &mut ControlState,
        target: AcState,
        success: CycleOutcome,
    ) -> CycleOutcome {
        match self.actuator.send(target).await {
            Ok(()) => {
                state.applied = target;
                success
            }
            Err(err) => {
                tracing::error!(error = %err, %target, "failed to transmit AC state");
                CycleOutcome::TransmitFailed
            }
        }
    }
}
