//! Shared application state for axum handlers.

use std::sync::Arc;

use acrules_app::controller::ClimateController;
use acrules_app::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};
use acrules_app::services::rule_service::RuleService;

/// Application state shared across all axum handlers.
///
/// Generic over the rule repository and the controller's ports to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R, S, C, A> {
    /// Rule CRUD service.
    pub rule_service: Arc<RuleService<R>>,
    /// Controller shared with the background control loop.
    pub controller: Arc<ClimateController<R, S, C, A>>,
}

impl<R, S, C, A> Clone for AppState<R, S, C, A> {
    fn clone(&self) -> Self {
        Self {
            rule_service: Arc::clone(&self.rule_service),
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<R, S, C, A> AppState<R, S, C, A>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    /// Create a new application state from the service and a controller that
    /// is already shared with the control loop.
    pub fn new(
        rule_service: RuleService<R>,
        controller: Arc<ClimateController<R, S, C, A>>,
    ) -> Self {
        Self {
            rule_service: Arc::new(rule_service),
            controller,
        }
    }
}
