//! Rule repository port: persistence for rules.

use std::future::Future;
use std::sync::Arc;

use acrules_domain::error::AcRulesError;
use acrules_domain::id::RuleId;
use acrules_domain::rule::{NewRule, Rule};

/// Repository for persisting and querying [`Rule`]s.
///
/// Listing methods return rules ordered by ascending id; the evaluation engine
/// relies on that order for its first-match priority.
pub trait RuleRepository {
    /// Store a new rule and assign it the next free id.
    fn create(&self, rule: NewRule) -> impl Future<Output = Result<Rule, AcRulesError>> + Send;

    /// Store a new rule unless `limit` rules are already stored.
    ///
    /// Returns `None` when the store is full. Counting and inserting happen as
    /// one atomic step, so concurrent callers cannot overshoot `limit`.
    fn create_within_limit(
        &self,
        rule: NewRule,
        limit: usize,
    ) -> impl Future<Output = Result<Option<Rule>, AcRulesError>> + Send;

    /// Get a rule by its identifier.
    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, AcRulesError>> + Send;

    /// Get all rules, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, AcRulesError>> + Send;

    /// Replace every field of an existing rule except its id.
    fn update(&self, rule: Rule) -> impl Future<Output = Result<Rule, AcRulesError>> + Send;

    /// Delete a rule. Returns `false` when nothing was stored under `id`.
    fn delete(&self, id: RuleId) -> impl Future<Output = Result<bool, AcRulesError>> + Send;

    /// Number of stored rules.
    fn count(&self) -> impl Future<Output = Result<usize, AcRulesError>> + Send;
}

impl<T: RuleRepository + Send + Sync> RuleRepository for Arc<T> {
    fn create(&self, rule: NewRule) -> impl Future<Output = Result<Rule, AcRulesError>> + Send {
        (**self).create(rule)
    }

    fn create_within_limit(
        &self,
        rule: NewRule,
        limit: usize,
    ) -> impl Future<Output = Result<Option<Rule>, AcRulesError>> + Send {
        (**self).create_within_limit(rule, limit)
    }

    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, AcRulesError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, AcRulesError>> + Send {
        (**self).get_all()
    }

    fn update(&self, rule: Rule) -> impl Future<Output = Result<Rule, AcRulesError>> + Send {
        (**self).update(rule)
    }

    fn delete(&self, id: RuleId) -> impl Future<Output = Result<bool, AcRulesError>> + Send {
        (**self).delete(id)
    }

    fn count(&self) -> impl Future<Output = Result<usize, AcRulesError>> + Send {
        (**self).count()
    }
}
