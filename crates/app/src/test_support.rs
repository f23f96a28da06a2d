//! In-memory port implementations shared by the unit tests of this crate.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use acrules_domain::ac_state::AcState;
use acrules_domain::error::AcRulesError;
use acrules_domain::id::RuleId;
use acrules_domain::rule::{NewRule, Rule};

use crate::ports::{AcActuator, ActuatorError, Clock, RuleRepository, SensorError, TemperatureSensor};

// ── In-memory rule repo ────────────────────────────────────────

pub struct InMemoryRuleRepo {
    store: Mutex<BTreeMap<RuleId, Rule>>,
    next_id: AtomicU32,
}

impl Default for InMemoryRuleRepo {
    fn default() -> Self {
        Self {
            store: Mutex::new(BTreeMap::new()),
            next_id: AtomicU32::new(1),
        }
    }
}

impl InMemoryRuleRepo {
    pub fn with(rules: Vec<NewRule>) -> Self {
        let repo = Self::default();
        for rule in rules {
            repo.insert(rule);
        }
        repo
    }

    fn insert(&self, rule: NewRule) -> Rule {
        let mut store = self.store.lock().unwrap();
        self.insert_locked(&mut store, rule)
    }

    fn insert_locked(&self, store: &mut BTreeMap<RuleId, Rule>, rule: NewRule) -> Rule {
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        let rule = rule.with_id(RuleId::new(raw).unwrap());
        store.insert(rule.id, rule.clone());
        rule
    }
}

impl RuleRepository for InMemoryRuleRepo {
    fn create(&self, rule: NewRule) -> impl Future<Output = Result<Rule, AcRulesError>> + Send {
        let created = self.insert(rule);
        async { Ok(created) }
    }

    fn create_within_limit(
        &self,
        rule: NewRule,
        limit: usize,
    ) -> impl Future<Output = Result<Option<Rule>, AcRulesError>> + Send {
        let mut store = self.store.lock().unwrap();
        let created = (store.len() < limit).then(|| self.insert_locked(&mut store, rule));
        drop(store);
        async { Ok(created) }
    }

    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, AcRulesError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, AcRulesError>> + Send {
        let result: Vec<Rule> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, rule: Rule) -> impl Future<Output = Result<Rule, AcRulesError>> + Send {
        self.store.lock().unwrap().insert(rule.id, rule.clone());
        async { Ok(rule) }
    }

    fn delete(&self, id: RuleId) -> impl Future<Output = Result<bool, AcRulesError>> + Send {
        let removed = self.store.lock().unwrap().remove(&id).is_some();
        async move { Ok(removed) }
    }

    fn count(&self) -> impl Future<Output = Result<usize, AcRulesError>> + Send {
        let count = self.store.lock().unwrap().len();
        async move { Ok(count) }
    }
}

// ── Clock ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct FixedClock {
    hour: AtomicU8,
}

impl FixedClock {
    pub fn at(hour: u8) -> Self {
        Self {
            hour: AtomicU8::new(hour),
        }
    }

    pub fn set(&self, hour: u8) {
        self.hour.store(hour, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn current_hour(&self) -> u8 {
        self.hour.load(Ordering::SeqCst)
    }
}

// ── Sensor ─────────────────────────────────────────────────────

pub struct StubSensor {
    reading: Mutex<Option<f32>>,
}

impl StubSensor {
    pub fn reading(celsius: f32) -> Self {
        Self {
            reading: Mutex::new(Some(celsius)),
        }
    }

    pub fn offline() -> Self {
        Self {
            reading: Mutex::new(None),
        }
    }

    pub fn set(&self, celsius: Option<f32>) {
        *self.reading.lock().unwrap() = celsius;
    }
}

impl TemperatureSensor for StubSensor {
    fn read_temperature(&self) -> impl Future<Output = Result<f32, SensorError>> + Send {
        let reading = *self.reading.lock().unwrap();
        async move { reading.ok_or(SensorError::Unavailable) }
    }
}

// ── Spy actuator ───────────────────────────────────────────────

#[derive(Default)]
pub struct SpyActuator {
    pub sent: Mutex<Vec<AcState>>,
}

impl SpyActuator {
    pub fn sent(&self) -> Vec<AcState> {
        self.sent.lock().unwrap().clone()
    }
}

impl AcActuator for SpyActuator {
    fn send(&self, state: AcState) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        self.sent.lock().unwrap().push(state);
        async { Ok(()) }
    }
}
